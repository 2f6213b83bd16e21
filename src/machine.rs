//! This module defines the `TuringMachine` struct, which applies the transition relation of a
//! nondeterministic machine to a single configuration and reports every successor reachable
//! in one step.

use std::collections::HashMap;

use crate::tape::Configuration;
use crate::types::{MachineDefinition, Transition};

/// The result of expanding one configuration by a single step.
///
/// Counts are returned as values so callers accumulate them instead of sharing counters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expansion {
    /// Successor configurations, in transition-table order.
    pub successors: Vec<Configuration>,
    /// Transitions taken, including an implicit reject.
    pub transitions: usize,
    /// True if at least one transition, explicit or implicit, left the configuration.
    pub has_outgoing: bool,
}

impl Expansion {
    /// True when the expansion counted an implicit reject: a transition that produced
    /// no successor.
    pub fn is_implicit_reject(&self) -> bool {
        self.has_outgoing && self.successors.is_empty()
    }
}

/// Applies the transition relation of a [`MachineDefinition`].
///
/// Rules are indexed by `(state, read)` on construction so each step only visits the rules
/// that can fire, while keeping their table order.
pub struct TuringMachine {
    definition: MachineDefinition,
    index: HashMap<(String, char), Vec<usize>>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` from a given definition.
    pub fn new(definition: MachineDefinition) -> Self {
        let mut index: HashMap<(String, char), Vec<usize>> = HashMap::new();
        for (i, transition) in definition.transitions.iter().enumerate() {
            index
                .entry((transition.state.clone(), transition.read))
                .or_default()
                .push(i);
        }

        Self { definition, index }
    }

    pub fn definition(&self) -> &MachineDefinition {
        &self.definition
    }

    /// Returns the rules matching `state` and `symbol`, in table order.
    pub fn transitions(&self, state: &str, symbol: char) -> Vec<&Transition> {
        self.index
            .get(&(state.to_string(), symbol))
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| &self.definition.transitions[i])
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Computes every configuration reachable from `config` in exactly one step.
    ///
    /// A `(state, symbol)` pair with no rule is an implicit transition to the reject state
    /// for every state other than accept and reject. It is counted as a transition and
    /// marks the configuration as a non-leaf, but no successor is produced for it.
    pub fn expand(&self, config: &Configuration) -> Expansion {
        let head = config.head();
        let successors: Vec<Configuration> = self
            .transitions(config.state(), head)
            .into_iter()
            .map(|t| config.apply(t.write, t.direction, &t.next_state))
            .collect();

        if !successors.is_empty() {
            return Expansion {
                transitions: successors.len(),
                has_outgoing: true,
                successors,
            };
        }

        if self.definition.is_halting(config.state()) {
            return Expansion::default();
        }

        Expansion {
            successors,
            transitions: 1,
            has_outgoing: true,
        }
    }
}
