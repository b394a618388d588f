//! Arcade Loop
//!
//! This example drives a small two-machine game with a fixed-step frame loop.
//!
//! Key concepts:
//! - A menu machine and a gameplay machine owned by one master
//! - States switching the active machine from their own tick
//! - A closed enum as the transition payload
//! - Diagnostics through `tracing`
//!
//! Run with: RUST_LOG=statewright=debug cargo run --example arcade

use statewright::kind_enum;
use statewright::prelude::*;
use tracing_subscriber::EnvFilter;

kind_enum! {
    pub enum Mode {
        Menu,
        Gameplay,
    }
}

kind_enum! {
    pub enum Screen {
        Title,
        Playing,
        GameOver,
    }
}

/// Arguments each screen may receive on entry.
#[derive(Debug)]
enum Args {
    NewRun { lives: u32 },
    Score(u64),
}

struct Arcade;

impl Hierarchy for Arcade {
    type Machine = Mode;
    type State = Screen;
    type Payload = Args;
}

struct Title {
    frames: u32,
}

impl State<Arcade> for Title {
    fn kind(&self) -> Screen {
        Screen::Title
    }

    fn enter_state(
        &mut self,
        _machine: &mut StateMachineHandle<'_, Arcade>,
        _args: Option<Args>,
    ) -> Result<(), PayloadError> {
        println!("  [Title] press start");
        self.frames = 0;
        Ok(())
    }

    fn tick(&mut self, machine: &mut StateMachineHandle<'_, Arcade>) {
        self.frames += 1;
        if self.frames == 3 {
            println!("  [Title] start pressed");
            let _ = machine.change_state_machine(
                Mode::Gameplay,
                Screen::Playing,
                Some(Args::NewRun { lives: 2 }),
            );
        }
    }
}

struct Playing {
    lives: u32,
    score: u64,
    physics_steps: u32,
}

impl State<Arcade> for Playing {
    fn kind(&self) -> Screen {
        Screen::Playing
    }

    fn enter_state(
        &mut self,
        _machine: &mut StateMachineHandle<'_, Arcade>,
        args: Option<Args>,
    ) -> Result<(), PayloadError> {
        let Some(Args::NewRun { lives }) = args else {
            return Err(PayloadError::Invalid(format!(
                "Playing needs Args::NewRun, got {args:?}"
            )));
        };
        self.lives = lives;
        self.score = 0;
        self.physics_steps = 0;
        println!("  [Playing] new run with {lives} lives");
        Ok(())
    }

    fn fixed_tick(&mut self, _machine: &mut StateMachineHandle<'_, Arcade>) {
        self.physics_steps += 1;
        self.score += 10;
    }

    fn late_tick(&mut self, machine: &mut StateMachineHandle<'_, Arcade>) {
        if self.physics_steps >= 4 {
            self.physics_steps = 0;
            self.lives = self.lives.saturating_sub(1);
            println!("  [Playing] lost a life, {} left", self.lives);
        }
        if self.lives == 0 {
            let _ = machine.change_state(Screen::GameOver, Some(Args::Score(self.score)));
        }
    }

    fn exit_state(&mut self, _machine: &mut StateMachineHandle<'_, Arcade>) {
        println!("  [Playing] run over");
    }
}

struct GameOver {
    score: u64,
}

impl State<Arcade> for GameOver {
    fn kind(&self) -> Screen {
        Screen::GameOver
    }

    fn enter_state(
        &mut self,
        _machine: &mut StateMachineHandle<'_, Arcade>,
        args: Option<Args>,
    ) -> Result<(), PayloadError> {
        match args {
            Some(Args::Score(score)) => {
                self.score = score;
                println!("  [GameOver] final score {score}");
                Ok(())
            }
            other => Err(PayloadError::Invalid(format!(
                "GameOver needs Args::Score, got {other:?}"
            ))),
        }
    }

    fn tick(&mut self, machine: &mut StateMachineHandle<'_, Arcade>) {
        println!("  [GameOver] back to title (best so far: {})", self.score);
        let _ = machine.change_state_machine(Mode::Menu, Screen::Title, None);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Arcade Loop Example ===\n");

    let mut master = MasterBuilder::<Arcade>::new()
        .machine(StateMachineBuilder::new(Mode::Menu).state(Title { frames: 0 }))
        .machine(
            StateMachineBuilder::new(Mode::Gameplay)
                .state(Playing {
                    lives: 0,
                    score: 0,
                    physics_steps: 0,
                })
                .state(GameOver { score: 0 }),
        )
        .build()?;

    master.change_state_machine(Mode::Menu, Screen::Title, None)?;

    let mut driver = FrameDriver::new(1.0 / 60.0)?;
    for frame in 0..24 {
        let report = driver.advance(&mut master, 1.0 / 30.0)?;
        println!(
            "frame {frame:>2}: {:?}/{:?} ({} physics steps)",
            master.active_kind(),
            master.active().and_then(|m| m.current_kind()),
            report.fixed_steps,
        );
    }

    println!("\nFinal snapshot:\n{}", master.snapshot().to_json()?);
    println!("\n=== Example Complete ===");
    Ok(())
}
