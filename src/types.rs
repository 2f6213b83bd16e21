//! This module defines the core data structures and types used throughout the simulator,
//! including the machine definition record, transition rules, head moves and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The blank symbol. It fills the tape to the right of the input and must be a member
/// of every tape alphabet.
pub const BLANK_SYMBOL: char = '_';
/// The maximum allowed size for a machine definition in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB
/// The number of levels explored when the caller does not choose a bound.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// An immutable description of a nondeterministic single-tape Turing machine.
///
/// The definition is built once per run (usually by the [parser](crate::parser)) and
/// only read afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MachineDefinition {
    /// Free-text name of the machine.
    pub name: String,
    /// Declared state identifiers, in file order.
    pub states: Vec<String>,
    /// Symbols an input string may contain.
    pub input_alphabet: Vec<char>,
    /// Symbols that may appear on the tape, including the blank.
    pub tape_alphabet: Vec<char>,
    pub start_state: String,
    pub accept_state: String,
    pub reject_state: String,
    /// The transition relation. Order determines the order in which nondeterministic
    /// branches are enumerated.
    pub transitions: Vec<Transition>,
}

impl MachineDefinition {
    /// Returns true if the state is either the accept or the reject state.
    pub fn is_halting(&self, state: &str) -> bool {
        state == self.accept_state || state == self.reject_state
    }

    /// Returns the symbols of `input` that are not part of the input alphabet,
    /// in order of first appearance.
    pub fn foreign_symbols(&self, input: &str) -> Vec<char> {
        let mut foreign = Vec::new();
        for c in input.chars() {
            if !self.input_alphabet.contains(&c) && !foreign.contains(&c) {
                foreign.push(c);
            }
        }
        foreign
    }
}

/// A single rule of the transition relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The state the rule applies in.
    pub state: String,
    /// The symbol that must be under the head.
    pub read: char,
    /// The state the machine moves to.
    pub next_state: String,
    /// The symbol written over the head cell.
    pub write: char,
    /// Where the head goes after writing.
    pub direction: Direction,
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Maps a move token from a definition file. `L` and `R` are the only
    /// recognized tokens, anything else keeps the head in place.
    pub fn from_token(token: &str) -> Self {
        match token {
            "L" => Direction::Left,
            "R" => Direction::Right,
            _ => Direction::Stay,
        }
    }
}

/// Represents various errors that can occur while loading or simulating a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NtmError {
    /// Missing or structurally wrong fields in a machine definition.
    #[error("Malformed definition: {0}")]
    MalformedDefinition(String),
    /// Indicates a syntax error in the tabular definition text.
    #[error("Definition parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates an inconsistency between the states, alphabets and rules of a definition.
    #[error("Definition validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations, such as reading definition files.
    #[error("File error: {0}")]
    FileError(String),
    /// Indicates a failure while writing a trace to its sink.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for NtmError {
    fn from(error: std::io::Error) -> Self {
        NtmError::Io(error.to_string())
    }
}
