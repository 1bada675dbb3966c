//! This module defines `Program`, the parsed state graph together with its entry state.

use std::collections::HashMap;

use crate::state::{State, StateId};
use crate::types::SyntaxError;

/// A parsed Turing Machine program. Read-only once built, so one program can drive any
/// number of independent runs.
#[derive(Debug, Clone)]
pub struct Program {
    states: Vec<State>,
    names: HashMap<String, StateId>,
    entry: StateId,
    diagnostics: Vec<SyntaxError>,
}

impl Program {
    pub(crate) fn new(
        states: Vec<State>,
        names: HashMap<String, StateId>,
        entry: StateId,
        diagnostics: Vec<SyntaxError>,
    ) -> Self {
        Self {
            states,
            names,
            entry,
            diagnostics,
        }
    }

    /// The first state declared in the program text.
    pub fn entry(&self) -> StateId {
        self.entry
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    /// Finds the state a transition naming `name` would resolve to.
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// All states in declaration order, including ones shadowed by a later header.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Lines that were skipped because they matched no production.
    pub fn diagnostics(&self) -> &[SyntaxError] {
        &self.diagnostics
    }

    pub fn transition_count(&self) -> usize {
        self.states.iter().map(State::action_count).sum()
    }
}
