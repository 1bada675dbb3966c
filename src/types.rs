//! This module defines the core data types shared by the tape, the state graph, the parser
//! and the interpreter loop, including the error type returned by fallible operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// An opaque tape symbol.
///
/// Symbols are compared as whole tokens. A token read from a program may be longer than
/// one character, while a tape loaded from input holds one character per cell.
pub type Symbol = String;

/// Represents the possible directions the tape cursor can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the cursor one cell to the left.
    Left,
    /// Move the cursor one cell to the right.
    Right,
}

/// The outcome of a run once the machine has halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Halt {
    /// The last executed state was accepting.
    Accept,
    /// The last executed state was not accepting.
    Reject,
}

impl Halt {
    pub fn is_accepted(self) -> bool {
        self == Halt::Accept
    }
}

impl From<bool> for Halt {
    fn from(accepting: bool) -> Self {
        if accepting {
            Halt::Accept
        } else {
            Halt::Reject
        }
    }
}

/// Represents the outcome of a single interpreter step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A transition was applied and the machine may continue.
    Continue,
    /// The current state had no rule for the symbol under the cursor.
    Halt(Halt),
}

/// A program line that matched neither a state header nor a transition.
///
/// Syntax errors are not fatal: the line is skipped and parsing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxError {
    /// 1-based line number within the program text.
    pub line: usize,
    /// The offending line, without its line terminator.
    pub content: String,
    /// Why the line was rejected.
    pub reason: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} `{}`", self.line, self.reason, self.content)
    }
}

/// Represents the fatal errors that can occur while loading a Turing Machine program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The program text could not be split into lines.
    ///
    /// Every line falls back to the `invalid` grammar rule, so this only surfaces if the
    /// grammar itself is broken.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// A transition names a state that is never declared.
    #[error("No state named {name} (referenced on line {line})")]
    UndefinedState { name: String, line: usize },
    /// The program declares no state, so there is no entry state.
    #[error("Program declares no states")]
    EmptyProgram,
    /// Indicates an error related to reading program files.
    #[error("File error: {0}")]
    FileError(String),
}
