//! This module provides functions for analyzing machine definitions to detect inconsistencies
//! before simulation. This includes checks for the distinguished states, the alphabets, and
//! the states and symbols referenced by transition rules.

use crate::types::{MachineDefinition, NtmError, BLANK_SYMBOL};

/// Represents the problems that can be found during the analysis of a machine definition.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// A start, accept or reject state that is not listed among the states.
    UndeclaredState(String),
    /// Two of the start, accept and reject states are the same.
    DuplicateDistinguishedState(String),
    /// Input symbols missing from the tape alphabet.
    MissingTapeSymbols(Vec<char>),
    /// The tape alphabet does not contain the blank symbol.
    MissingBlank,
    /// Transitions reference states that are not declared.
    UndefinedTransitionStates(Vec<String>),
    /// Transitions read or write symbols outside the tape alphabet.
    UndefinedTransitionSymbols(Vec<char>),
}

impl From<AnalysisError> for NtmError {
    /// Converts an `AnalysisError` into a `NtmError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::UndeclaredState(state) => {
                NtmError::ValidationError(format!("State '{}' is not declared", state))
            }
            AnalysisError::DuplicateDistinguishedState(state) => NtmError::ValidationError(
                format!("State '{}' is used for more than one of start, accept and reject", state),
            ),
            AnalysisError::MissingTapeSymbols(symbols) => NtmError::ValidationError(format!(
                "Tape alphabet is missing input symbols: {:?}",
                symbols
            )),
            AnalysisError::MissingBlank => NtmError::ValidationError(format!(
                "Tape alphabet must contain the blank symbol '{}'",
                BLANK_SYMBOL
            )),
            AnalysisError::UndefinedTransitionStates(states) => NtmError::ValidationError(
                format!("Transitions reference undeclared states: {:?}", states),
            ),
            AnalysisError::UndefinedTransitionSymbols(symbols) => NtmError::ValidationError(
                format!("Transitions use symbols outside the tape alphabet: {:?}", symbols),
            ),
        }
    }
}

/// Analyzes a given `MachineDefinition` for consistency errors.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(NtmError::ValidationError)` describing the first problem found.
pub fn analyze(definition: &MachineDefinition) -> Result<(), NtmError> {
    [
        check_distinguished_states,
        check_alphabets,
        check_transition_states,
        check_transition_symbols,
    ]
    .iter()
    .find_map(|f| f(definition).err())
    .map_or(Ok(()), |error| Err(error.into()))
}

/// Checks that start, accept and reject are declared and pairwise distinct.
fn check_distinguished_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let distinguished = [
        &definition.start_state,
        &definition.accept_state,
        &definition.reject_state,
    ];

    if let Some(state) = distinguished
        .iter()
        .find(|state| !definition.states.contains(state))
    {
        return Err(AnalysisError::UndeclaredState(state.to_string()));
    }

    for (i, state) in distinguished.iter().enumerate() {
        if distinguished[i + 1..].contains(state) {
            return Err(AnalysisError::DuplicateDistinguishedState(state.to_string()));
        }
    }

    Ok(())
}

/// Checks that the tape alphabet covers the input alphabet and the blank.
fn check_alphabets(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let missing: Vec<char> = definition
        .input_alphabet
        .iter()
        .filter(|c| !definition.tape_alphabet.contains(c))
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::MissingTapeSymbols(missing));
    }

    if !definition.tape_alphabet.contains(&BLANK_SYMBOL) {
        return Err(AnalysisError::MissingBlank);
    }

    Ok(())
}

/// Checks that every state named by a transition is declared.
fn check_transition_states(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut undefined: Vec<String> = definition
        .transitions
        .iter()
        .flat_map(|t| [&t.state, &t.next_state])
        .filter(|state| !definition.states.contains(state))
        .cloned()
        .collect();

    undefined.sort();
    undefined.dedup();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedTransitionStates(undefined));
    }

    Ok(())
}

/// Checks that every symbol read or written by a transition is in the tape alphabet.
fn check_transition_symbols(definition: &MachineDefinition) -> Result<(), AnalysisError> {
    let mut undefined: Vec<char> = definition
        .transitions
        .iter()
        .flat_map(|t| [t.read, t.write])
        .filter(|c| !definition.tape_alphabet.contains(c))
        .collect();

    undefined.sort();
    undefined.dedup();

    if !undefined.is_empty() {
        return Err(AnalysisError::UndefinedTransitionSymbols(undefined));
    }

    Ok(())
}
