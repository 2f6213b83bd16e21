//! This crate simulates nondeterministic Turing machines. It explores every configuration
//! reachable from the start configuration breadth-first up to a depth bound, decides
//! accept/reject, and reports a trace together with the machine's average branching factor.
//! It also includes modules for parsing and validating tabular machine definitions and a
//! small catalog of built-in machines.

pub mod analyzer;
pub mod explorer;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod report;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the exploration types from the explorer module.
pub use explorer::{Explorer, Outcome, Simulation, SimulationStats};
/// Re-exports the `DefinitionLoader` struct from the loader module.
pub use loader::DefinitionLoader;
/// Re-exports the transition applier from the machine module.
pub use machine::{Expansion, TuringMachine};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the built-in machine catalog.
pub use programs::{BuiltinMachine, MachineCatalog, MACHINES};
/// Re-exports the trace rendering functions and the `simulate` entry point.
pub use report::{render, render_json, simulate};
/// Re-exports `Configuration` from the tape module.
pub use tape::Configuration;
/// Re-exports the definition types and constants from the types module.
pub use types::{
    Direction, MachineDefinition, NtmError, Transition, BLANK_SYMBOL, DEFAULT_MAX_DEPTH,
    MAX_DEFINITION_SIZE,
};
