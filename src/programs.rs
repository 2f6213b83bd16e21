//! A small catalog of machine definitions embedded in the binary, each paired with the input
//! it is usually demonstrated on.

use crate::parser::parse;
use crate::types::{MachineDefinition, NtmError};

/// Embedded definitions: key, sample input, definition text.
const MACHINE_TEXTS: [(&str, &str, &str); 3] = [
    ("a_plus", "aaa", include_str!("../machines/a_plus.csv")),
    ("a_plus_dtm", "aaa", include_str!("../machines/a_plus_dtm.csv")),
    (
        "palindrome_dtm",
        "abba",
        include_str!("../machines/palindrome_dtm.csv"),
    ),
];

/// A built-in machine.
#[derive(Debug, Clone)]
pub struct BuiltinMachine {
    /// Short identifier used on the command line.
    pub key: &'static str,
    /// Input the machine is demonstrated on.
    pub sample_input: &'static str,
    pub definition: MachineDefinition,
}

lazy_static::lazy_static! {
    pub static ref MACHINES: Vec<BuiltinMachine> = MACHINE_TEXTS
        .iter()
        .filter_map(|&(key, sample_input, text)| match parse(text) {
            Ok(definition) => Some(BuiltinMachine { key, sample_input, definition }),
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to parse built-in machine");
                None
            }
        })
        .collect();
}

/// Read access to the embedded machines.
pub struct MachineCatalog;

impl MachineCatalog {
    /// Get the number of available machines
    pub fn count() -> usize {
        MACHINES.len()
    }

    /// Get a machine by its index
    pub fn get_by_index(index: usize) -> Result<&'static BuiltinMachine, NtmError> {
        MACHINES.get(index).ok_or_else(|| {
            NtmError::ValidationError(format!("Machine index {} out of range", index))
        })
    }

    /// Get a machine by its key or by its definition name
    pub fn get_by_name(name: &str) -> Result<&'static BuiltinMachine, NtmError> {
        MACHINES
            .iter()
            .find(|machine| machine.key == name || machine.definition.name == name)
            .ok_or_else(|| NtmError::ValidationError(format!("Machine '{}' not found", name)))
    }

    /// List all machine keys
    pub fn keys() -> Vec<&'static str> {
        MACHINES.iter().map(|machine| machine.key).collect()
    }

    /// Get the original text of a machine by its index
    pub fn text_by_index(index: usize) -> Result<&'static str, NtmError> {
        MACHINE_TEXTS
            .get(index)
            .map(|&(_, _, text)| text)
            .ok_or_else(|| {
                NtmError::ValidationError(format!("Machine text index {} out of range", index))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::{Explorer, Outcome};
    use crate::types::DEFAULT_MAX_DEPTH;

    #[test]
    fn test_all_machines_parse() {
        assert_eq!(MachineCatalog::count(), MACHINE_TEXTS.len());
        assert_eq!(
            MachineCatalog::keys(),
            vec!["a_plus", "a_plus_dtm", "palindrome_dtm"]
        );
    }

    #[test]
    fn test_get_by_name() {
        let machine = MachineCatalog::get_by_name("a_plus_dtm").unwrap();
        assert_eq!(machine.definition.name, "a plus (deterministic)");

        let by_title = MachineCatalog::get_by_name("palindrome (deterministic)").unwrap();
        assert_eq!(by_title.key, "palindrome_dtm");

        assert!(MachineCatalog::get_by_name("Nonexistent").is_err());
    }

    #[test]
    fn test_get_by_index() {
        assert_eq!(MachineCatalog::get_by_index(0).unwrap().key, "a_plus");
        assert!(MachineCatalog::get_by_index(999).is_err());
        assert!(MachineCatalog::text_by_index(2).unwrap().starts_with("palindrome"));
        assert!(MachineCatalog::text_by_index(999).is_err());
    }

    #[test]
    fn test_nondeterministic_a_plus() {
        let machine = MachineCatalog::get_by_name("a_plus").unwrap();
        let simulation =
            Explorer::new(machine.definition.clone(), DEFAULT_MAX_DEPTH).explore("aaa");

        assert_eq!(simulation.outcome, Outcome::Accepted { depth: 4 });
        let widths: Vec<usize> = simulation.levels.iter().map(Vec::len).collect();
        assert_eq!(widths, vec![1, 1, 2, 2, 2]);
        assert_eq!(simulation.stats.transitions, 8);
        assert_eq!(simulation.stats.non_leaf, 6);
    }

    #[test]
    fn test_palindrome_accepts_and_rejects() {
        let machine = MachineCatalog::get_by_name("palindrome_dtm").unwrap();
        let explorer = Explorer::new(machine.definition.clone(), DEFAULT_MAX_DEPTH);

        let accepted = explorer.explore("aba");
        assert_eq!(accepted.outcome, Outcome::Accepted { depth: 10 });
        assert_eq!(accepted.stats.transitions, 10);
        assert_eq!(accepted.stats.nondeterminism(), Some(1.0));

        let rejected = explorer.explore("ab");
        assert_eq!(rejected.outcome, Outcome::Rejected { depth: 3 });
        assert_eq!(rejected.stats.transitions, 4);
        assert_eq!(rejected.stats.non_leaf, 4);
    }

    #[test]
    fn test_sample_inputs_are_accepted_within_default_depth() {
        for machine in MACHINES.iter() {
            let simulation = Explorer::new(machine.definition.clone(), DEFAULT_MAX_DEPTH)
                .explore(machine.sample_input);
            assert!(
                simulation.outcome.is_accepted(),
                "'{}' on '{}' ended with {:?}",
                machine.key,
                machine.sample_input,
                simulation.outcome
            );
        }

        let palindrome = MachineCatalog::get_by_name("palindrome_dtm").unwrap();
        let simulation = Explorer::new(palindrome.definition.clone(), DEFAULT_MAX_DEPTH)
            .explore(palindrome.sample_input);
        assert_eq!(simulation.outcome, Outcome::Accepted { depth: 15 });
    }
}
