//! Recording fixture shared by the integration tests.
//!
//! Two machines: `M1` owns states `A` and `B`, `M2` owns `C` and `D`. `E` and
//! `M3` are never registered. Every hook appends an [`Event`] to a shared log.

#![allow(dead_code)]

use statewright::kind_enum;
use statewright::payload::{self, PayloadError, StateData};
use statewright::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

kind_enum! {
    pub enum Machine { M1, M2, M3 }
}

kind_enum! {
    pub enum Letter { A, B, C, D, E }
}

pub struct Fixture;

impl Hierarchy for Fixture {
    type Machine = Machine;
    type State = Letter;
    type Payload = StateData;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Enter(Letter, Option<u32>),
    Exit(Letter),
    Tick(Letter),
    FixedTick(Letter),
    LateTick(Letter),
}

pub type Log = Rc<RefCell<Vec<Event>>>;

type Script = Box<dyn FnMut(&mut StateMachineHandle<'_, Fixture>)>;

/// A state that logs every hook and can run a script on enter, exit or tick.
pub struct Recorder {
    kind: Letter,
    log: Log,
    on_enter: Option<Script>,
    on_exit: Option<Script>,
    on_tick: Option<Script>,
}

impl Recorder {
    pub fn new(kind: Letter, log: &Log) -> Self {
        Self {
            kind,
            log: Rc::clone(log),
            on_enter: None,
            on_exit: None,
            on_tick: None,
        }
    }

    pub fn on_enter(mut self, script: impl FnMut(&mut StateMachineHandle<'_, Fixture>) + 'static) -> Self {
        self.on_enter = Some(Box::new(script));
        self
    }

    pub fn on_exit(mut self, script: impl FnMut(&mut StateMachineHandle<'_, Fixture>) + 'static) -> Self {
        self.on_exit = Some(Box::new(script));
        self
    }

    pub fn on_tick(mut self, script: impl FnMut(&mut StateMachineHandle<'_, Fixture>) + 'static) -> Self {
        self.on_tick = Some(Box::new(script));
        self
    }
}

impl State<Fixture> for Recorder {
    fn kind(&self) -> Letter {
        self.kind
    }

    fn enter_state(
        &mut self,
        machine: &mut StateMachineHandle<'_, Fixture>,
        args: Option<StateData>,
    ) -> Result<(), PayloadError> {
        let level = payload::downcast_opt::<u32>(args)?;
        self.log.borrow_mut().push(Event::Enter(self.kind, level));
        if let Some(script) = self.on_enter.as_mut() {
            script(machine);
        }
        Ok(())
    }

    fn exit_state(&mut self, machine: &mut StateMachineHandle<'_, Fixture>) {
        self.log.borrow_mut().push(Event::Exit(self.kind));
        if let Some(script) = self.on_exit.as_mut() {
            script(machine);
        }
    }

    fn tick(&mut self, machine: &mut StateMachineHandle<'_, Fixture>) {
        self.log.borrow_mut().push(Event::Tick(self.kind));
        if let Some(script) = self.on_tick.as_mut() {
            script(machine);
        }
    }

    fn fixed_tick(&mut self, _machine: &mut StateMachineHandle<'_, Fixture>) {
        self.log.borrow_mut().push(Event::FixedTick(self.kind));
    }

    fn late_tick(&mut self, _machine: &mut StateMachineHandle<'_, Fixture>) {
        self.log.borrow_mut().push(Event::LateTick(self.kind));
    }
}

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

/// Build the standard two-machine master from the given recorders.
pub fn master_with(
    m1: Vec<Recorder>,
    m2: Vec<Recorder>,
) -> MasterStateMachine<Fixture> {
    let first = m1
        .into_iter()
        .fold(StateMachineBuilder::<Fixture>::new(Machine::M1), StateMachineBuilder::state);
    let second = m2
        .into_iter()
        .fold(StateMachineBuilder::<Fixture>::new(Machine::M2), StateMachineBuilder::state);

    MasterBuilder::new()
        .machine(first)
        .machine(second)
        .build()
        .expect("fixture registration is valid")
}

/// Standard master with plain recorders in every slot.
pub fn master(log: &Log) -> MasterStateMachine<Fixture> {
    master_with(
        vec![Recorder::new(Letter::A, log), Recorder::new(Letter::B, log)],
        vec![Recorder::new(Letter::C, log), Recorder::new(Letter::D, log)],
    )
}

pub fn events(log: &Log) -> Vec<Event> {
    log.borrow().clone()
}

pub fn clear(log: &Log) {
    log.borrow_mut().clear();
}
