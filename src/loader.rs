//! This module provides the `ProgramLoader` struct, which reads the two inputs of a run:
//! the program description and the initial tape content.

use crate::parser::parse;
use crate::program::Program;
use crate::types::TuringMachineError;
use std::fs;
use std::io::Read;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading program descriptions and tapes.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a program description from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the program file.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is read and its states all resolve.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * Any error returned by [`parse`] for the file content.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a program description from the provided string content.
    ///
    /// # Arguments
    ///
    /// * `content` - The program text, one header or transition per line.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        parse(content)
    }

    /// Reads the initial tape content from `reader`, up to end of stream.
    ///
    /// The bytes are kept verbatim, including any trailing newline. Byte sequences that
    /// are not valid UTF-8 become U+FFFD, one replacement symbol per invalid sequence.
    ///
    /// # Arguments
    ///
    /// * `reader` - The stream holding the tape, usually stdin.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` with one tape symbol per character.
    /// * `Err(TuringMachineError::FileError)` if reading the stream fails.
    pub fn load_tape(mut reader: impl Read) -> Result<String, TuringMachineError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read tape: {}", e))
        })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
