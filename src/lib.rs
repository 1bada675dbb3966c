//! This crate provides the core of a single-tape Turing Machine interpreter.
//! It includes modules for the bidirectional tape, the state graph, parsing program text
//! into that graph, and running a program to halting.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod program;
pub mod state;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
pub use program::Program;
pub use state::{Action, State, StateId};
pub use tape::Tape;
/// Re-exports the value and error types from the types module.
pub use types::{Direction, Halt, Step, Symbol, SyntaxError, TuringMachineError};
