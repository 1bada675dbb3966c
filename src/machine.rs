//! This module defines the `TuringMachine` struct, which drives a parsed `Program` against
//! a `Tape` until the current state has no rule for the symbol under the cursor.

use tracing::trace;

use crate::program::Program;
use crate::state::StateId;
use crate::tape::Tape;
use crate::types::{Halt, Step};

/// A single run of a `Program`.
///
/// The machine borrows the program and owns its tape, so the same program can back any
/// number of independent runs.
pub struct TuringMachine<'p> {
    program: &'p Program,
    tape: Tape,
    current: Option<StateId>,
    accepting: bool,
    step_count: usize,
}

impl<'p> TuringMachine<'p> {
    /// Creates a machine positioned at the program's entry state with `input` loaded on
    /// the tape, one symbol per character.
    pub fn new(program: &'p Program, input: &str) -> Self {
        Self {
            program,
            tape: Tape::new(input),
            current: Some(program.entry()),
            accepting: false,
            step_count: 0,
        }
    }

    /// Executes the current state once.
    ///
    /// The acceptance flag of the executed state is recorded before its rule is looked up,
    /// so halting reports the last state that actually ran.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(_)` if the current state had no rule for the symbol under the cursor,
    ///   or if the machine had already halted.
    pub fn step(&mut self) -> Step {
        let Some(id) = self.current else {
            return Step::Halt(self.accepting.into());
        };

        let program = self.program;
        let state = program.state(id);
        self.accepting = state.is_accepting();
        self.current = state.run(&mut self.tape);

        match self.current {
            Some(next) => {
                self.step_count += 1;
                trace!(
                    step = self.step_count,
                    from = state.name(),
                    to = program.state(next).name(),
                    position = self.tape.position(),
                    "transition"
                );
                Step::Continue
            }
            None => {
                let halt = Halt::from(self.accepting);
                trace!(state = state.name(), symbol = ?self.tape.read(), ?halt, "halted");
                Step::Halt(halt)
            }
        }
    }

    /// Runs until the machine halts. A program that never halts keeps running.
    pub fn run(&mut self) -> Halt {
        loop {
            if let Step::Halt(halt) = self.step() {
                return halt;
            }
        }
    }

    /// Name of the state that executes next, or `None` once halted.
    pub fn state(&self) -> Option<&str> {
        self.current.map(|id| self.program.state(id).name())
    }

    pub fn is_halted(&self) -> bool {
        self.current.is_none()
    }

    /// Number of transitions applied so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn into_tape(self) -> Tape {
        self.tape
    }
}
