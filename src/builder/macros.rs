//! Macros for ergonomic hierarchy declaration.

/// Declare a field-less enum and implement [`Kind`](crate::core::Kind) for it.
///
/// # Example
///
/// ```
/// use statewright::core::Kind;
/// use statewright::kind_enum;
///
/// kind_enum! {
///     pub enum Screen {
///         Title,
///         Options,
///         Playing,
///     }
/// }
///
/// assert_eq!(Screen::Options.name(), "Options");
/// ```
#[macro_export]
macro_rules! kind_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Kind for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
