//! This module defines `State`, a named node of the transition graph, and the `Action`
//! record each state keeps per input symbol.

use std::collections::HashMap;

use crate::tape::Tape;
use crate::types::{Direction, Symbol};

/// Index of a state within its `Program`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a state does for one input symbol: write, move, then continue in `next`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub write: Symbol,
    pub direction: Direction,
    pub next: StateId,
}

/// A named state with a deterministic table from input symbol to `Action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,
    accepting: bool,
    actions: HashMap<Symbol, Action>,
}

impl State {
    pub fn new(name: impl Into<String>, accepting: bool) -> Self {
        Self {
            name: name.into(),
            accepting,
            actions: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether halting after executing this state accepts the input.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// Registers the action taken when `input` is read, replacing any earlier one.
    pub fn add_action(&mut self, input: Symbol, output: Symbol, direction: Direction, next: StateId) {
        self.actions.insert(
            input,
            Action {
                write: output,
                direction,
                next,
            },
        );
    }

    /// Looks up the action for the cell value `input`. A blank cell never matches.
    pub fn action(&self, input: Option<&str>) -> Option<&Action> {
        input.and_then(|symbol| self.actions.get(symbol))
    }

    /// Number of input symbols this state has a rule for.
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Applies the rule for the symbol under the cursor and returns the next state.
    ///
    /// Returns `None` without touching the tape when no rule matches.
    pub fn run(&self, tape: &mut Tape) -> Option<StateId> {
        let action = self.action(tape.read())?;

        tape.write(action.write.as_str());
        tape.shift(action.direction);

        Some(action.next)
    }
}
