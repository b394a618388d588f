//! Frame cadence for driving a master state machine.
//!
//! A frame is: one regular tick, as many fixed ticks as the accumulated time
//! allows, then one late tick. Fixed ticks consume `fixed_step` seconds each;
//! leftover time carries over to the next frame.

use crate::core::Hierarchy;
use crate::runtime::{MasterStateMachine, TransitionError};
use thiserror::Error;

/// Physics rate used by [`FrameDriver::default`].
pub const DEFAULT_FIXED_STEP: f32 = 1.0 / 60.0;

/// Upper bound on fixed ticks per frame used by [`FrameDriver::default`].
pub const DEFAULT_MAX_FIXED_STEPS: u32 = 8;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DriverError {
    #[error("Fixed step must be a positive number of seconds, got {0}")]
    InvalidStep(f32),

    #[error("At least one fixed step per frame is required")]
    NoFixedSteps,
}

/// What one call to [`FrameDriver::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Fixed ticks run this frame.
    pub fixed_steps: u32,
    /// Fraction of a fixed step left in the accumulator, in `[0, 1)`.
    pub alpha: f32,
}

#[derive(Debug, Clone)]
pub struct FrameDriver {
    fixed_step: f32,
    max_fixed_steps: u32,
    accumulator: f32,
}

impl FrameDriver {
    pub fn new(fixed_step: f32) -> Result<Self, DriverError> {
        if !(fixed_step.is_finite() && fixed_step > 0.0) {
            return Err(DriverError::InvalidStep(fixed_step));
        }
        Ok(Self {
            fixed_step,
            max_fixed_steps: DEFAULT_MAX_FIXED_STEPS,
            accumulator: 0.0,
        })
    }

    /// Cap the fixed ticks run in one frame. Time beyond the cap is dropped
    /// so a slow frame cannot snowball into ever longer ones.
    pub fn with_max_fixed_steps(mut self, max: u32) -> Result<Self, DriverError> {
        if max == 0 {
            return Err(DriverError::NoFixedSteps);
        }
        self.max_fixed_steps = max;
        Ok(self)
    }

    pub fn fixed_step(&self) -> f32 {
        self.fixed_step
    }

    /// Run one frame of `dt` seconds against `master`.
    ///
    /// The first failing phase aborts the frame; the phases after it do not run.
    /// A negative or non-finite `dt` counts as an empty frame.
    pub fn advance<H: Hierarchy>(
        &mut self,
        master: &mut MasterStateMachine<H>,
        dt: f32,
    ) -> Result<FrameReport, TransitionError> {
        master.tick()?;

        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }
        let mut fixed_steps = 0;
        while self.accumulator >= self.fixed_step && fixed_steps < self.max_fixed_steps {
            master.fixed_tick()?;
            self.accumulator -= self.fixed_step;
            fixed_steps += 1;
        }
        if self.accumulator >= self.fixed_step {
            self.accumulator = 0.0;
        }

        master.late_tick()?;

        Ok(FrameReport {
            fixed_steps,
            alpha: self.accumulator / self.fixed_step,
        })
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self {
            fixed_step: DEFAULT_FIXED_STEP,
            max_fixed_steps: DEFAULT_MAX_FIXED_STEPS,
            accumulator: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{MasterBuilder, StateMachineBuilder};
    use crate::core::State;
    use crate::kind_enum;
    use crate::payload::PayloadError;
    use crate::runtime::StateMachineHandle;
    use std::cell::RefCell;
    use std::rc::Rc;

    kind_enum! {
        enum Mode { Main }
    }

    kind_enum! {
        enum Step { Only }
    }

    struct Test;

    impl Hierarchy for Test {
        type Machine = Mode;
        type State = Step;
        type Payload = ();
    }

    struct Counter(Rc<RefCell<Vec<&'static str>>>);

    impl State<Test> for Counter {
        fn kind(&self) -> Step {
            Step::Only
        }

        fn enter_state(
            &mut self,
            _machine: &mut StateMachineHandle<'_, Test>,
            _args: Option<()>,
        ) -> Result<(), PayloadError> {
            Ok(())
        }

        fn tick(&mut self, _machine: &mut StateMachineHandle<'_, Test>) {
            self.0.borrow_mut().push("tick");
        }

        fn fixed_tick(&mut self, _machine: &mut StateMachineHandle<'_, Test>) {
            self.0.borrow_mut().push("fixed");
        }

        fn late_tick(&mut self, _machine: &mut StateMachineHandle<'_, Test>) {
            self.0.borrow_mut().push("late");
        }
    }

    fn master(log: &Rc<RefCell<Vec<&'static str>>>) -> MasterStateMachine<Test> {
        let mut master = MasterBuilder::<Test>::new()
            .machine(StateMachineBuilder::new(Mode::Main).state(Counter(Rc::clone(log))))
            .build()
            .unwrap();
        master
            .change_state_machine(Mode::Main, Step::Only, None)
            .unwrap();
        master
    }

    #[test]
    fn rejects_non_positive_step() {
        assert_eq!(FrameDriver::new(0.0).unwrap_err(), DriverError::InvalidStep(0.0));
        assert!(FrameDriver::new(-1.0).is_err());
        assert!(FrameDriver::new(f32::NAN).is_err());
        assert!(FrameDriver::default().with_max_fixed_steps(0).is_err());
    }

    #[test]
    fn phases_run_in_frame_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut master = master(&log);
        let mut driver = FrameDriver::new(0.25).unwrap();

        let report = driver.advance(&mut master, 0.5).unwrap();

        assert_eq!(report.fixed_steps, 2);
        assert_eq!(*log.borrow(), vec!["tick", "fixed", "fixed", "late"]);
    }

    #[test]
    fn leftover_time_carries_to_next_frame() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut master = master(&log);
        let mut driver = FrameDriver::new(0.25).unwrap();

        let first = driver.advance(&mut master, 0.125).unwrap();
        assert_eq!(first.fixed_steps, 0);
        assert_eq!(first.alpha, 0.5);

        let second = driver.advance(&mut master, 0.125).unwrap();
        assert_eq!(second.fixed_steps, 1);
        assert_eq!(second.alpha, 0.0);
    }

    #[test]
    fn slow_frames_are_capped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut master = master(&log);
        let mut driver = FrameDriver::new(0.25)
            .unwrap()
            .with_max_fixed_steps(2)
            .unwrap();

        let report = driver.advance(&mut master, 2.0).unwrap();
        assert_eq!(report.fixed_steps, 2);
        assert_eq!(report.alpha, 0.0);

        let next = driver.advance(&mut master, 0.25).unwrap();
        assert_eq!(next.fixed_steps, 1);
        assert_eq!(next.alpha, 0.0);
    }

    #[test]
    fn non_finite_delta_keeps_fixed_ticks_alive() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut master = master(&log);
        let mut driver = FrameDriver::new(0.25).unwrap();

        for dt in [f32::INFINITY, f32::NAN, f32::NEG_INFINITY, -1.0] {
            let report = driver.advance(&mut master, dt).unwrap();
            assert_eq!(report.fixed_steps, 0);
            assert_eq!(report.alpha, 0.0);
        }

        let first = driver.advance(&mut master, 0.5).unwrap();
        let second = driver.advance(&mut master, 0.5).unwrap();
        assert_eq!(first.fixed_steps, 2);
        assert_eq!(second.fixed_steps, 2);
        assert_eq!(second.alpha, 0.0);
    }

    #[test]
    fn huge_finite_delta_is_capped_and_dropped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut master = master(&log);
        let mut driver = FrameDriver::new(0.25).unwrap();

        let report = driver.advance(&mut master, f32::MAX).unwrap();
        assert_eq!(report.fixed_steps, DEFAULT_MAX_FIXED_STEPS);
        assert_eq!(report.alpha, 0.0);

        let next = driver.advance(&mut master, 0.25).unwrap();
        assert_eq!(next.fixed_steps, 1);
    }

    #[test]
    fn idle_master_frames_are_no_ops() {
        let mut master = MasterBuilder::<Test>::new()
            .machine(StateMachineBuilder::new(Mode::Main).state(Counter(Rc::default())))
            .build()
            .unwrap();
        let mut driver = FrameDriver::default();

        let report = driver.advance(&mut master, 1.0).unwrap();
        assert_eq!(report.fixed_steps, DEFAULT_MAX_FIXED_STEPS);
    }
}
