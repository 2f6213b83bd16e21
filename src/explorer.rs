//! This module drives the breadth-first exploration of every configuration reachable from
//! the start configuration, one depth level at a time, and decides the terminal outcome.

use serde::Serialize;

use crate::machine::TuringMachine;
use crate::tape::Configuration;
use crate::types::MachineDefinition;

/// The terminal state of one exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// A configuration in the accept state was found at `depth`.
    Accepted { depth: usize },
    /// Level `depth` produced no successors.
    Rejected { depth: usize },
    /// Exploration stopped after `max_depth` levels without a verdict.
    DepthExhausted { max_depth: usize },
}

impl Outcome {
    /// The depth reported with the outcome.
    pub fn depth(&self) -> usize {
        match *self {
            Outcome::Accepted { depth } | Outcome::Rejected { depth } => depth,
            Outcome::DepthExhausted { max_depth } => max_depth,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    /// Every applied transition, every implicit reject, and every visit of a configuration
    /// already in the reject state.
    pub transitions: usize,
    /// Configurations with at least one outgoing transition.
    pub non_leaf: usize,
}

impl SimulationStats {
    /// The average branching factor, or `None` when no configuration had an outgoing
    /// transition.
    pub fn nondeterminism(&self) -> Option<f64> {
        (self.non_leaf > 0).then(|| self.transitions as f64 / self.non_leaf as f64)
    }
}

/// The full record of one run: the outcome, every level explored, and the counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub outcome: Outcome,
    /// `levels[d]` holds every configuration reachable in exactly `d` steps, in the order
    /// they were produced.
    pub levels: Vec<Vec<Configuration>>,
    pub stats: SimulationStats,
}

impl Simulation {
    /// The number of configurations materialized across all levels.
    pub fn configuration_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}

/// The result of expanding one whole level.
enum LevelStep {
    Accepted,
    Next(Vec<Configuration>),
}

/// Breadth-first explorer over the configurations of a machine.
pub struct Explorer {
    machine: TuringMachine,
    max_depth: usize,
}

impl Explorer {
    /// Creates an explorer that examines at most `max_depth` levels.
    pub fn new(definition: MachineDefinition, max_depth: usize) -> Self {
        Self {
            machine: TuringMachine::new(definition),
            max_depth,
        }
    }

    /// Explores the machine on `input`, starting with the head on the first input symbol.
    ///
    /// Each call owns its own levels and counters, so repeated runs with the same input
    /// produce identical results.
    pub fn explore(&self, input: &str) -> Simulation {
        let definition = self.machine.definition();
        let foreign = definition.foreign_symbols(input);
        if !foreign.is_empty() {
            tracing::warn!(
                machine = %definition.name,
                symbols = ?foreign,
                "Input contains symbols outside the input alphabet"
            );
        }

        let mut levels = vec![vec![Configuration::initial(&definition.start_state, input)]];
        let mut stats = SimulationStats::default();

        for depth in 0..self.max_depth {
            let current = &levels[depth];
            match self.expand_level(current, &mut stats) {
                LevelStep::Accepted => {
                    return self.finish(Outcome::Accepted { depth }, levels, stats);
                }
                LevelStep::Next(next) if next.is_empty() => {
                    return self.finish(Outcome::Rejected { depth }, levels, stats);
                }
                LevelStep::Next(next) => {
                    tracing::debug!(depth = depth + 1, width = next.len(), "Expanded level");
                    levels.push(next);
                }
            }
        }

        self.finish(
            Outcome::DepthExhausted {
                max_depth: self.max_depth,
            },
            levels,
            stats,
        )
    }

    /// Expands every configuration of `level` in order, stopping at the first one in the
    /// accept state.
    fn expand_level(&self, level: &[Configuration], stats: &mut SimulationStats) -> LevelStep {
        let definition = self.machine.definition();
        let mut next = Vec::new();

        for config in level {
            if config.state() == definition.accept_state {
                return LevelStep::Accepted;
            }

            if config.state() == definition.reject_state {
                stats.transitions += 1;
                continue;
            }

            let expansion = self.machine.expand(config);
            stats.transitions += expansion.transitions;
            if expansion.has_outgoing {
                stats.non_leaf += 1;
            }
            next.extend(expansion.successors);
        }

        LevelStep::Next(next)
    }

    fn finish(
        &self,
        outcome: Outcome,
        levels: Vec<Vec<Configuration>>,
        stats: SimulationStats,
    ) -> Simulation {
        tracing::info!(
            machine = %self.machine.definition().name,
            ?outcome,
            transitions = stats.transitions,
            non_leaf = stats.non_leaf,
            "Simulation finished"
        );

        Simulation {
            outcome,
            levels,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Transition, BLANK_SYMBOL};

    fn rule(state: &str, read: char, next: &str, write: char, dir: Direction) -> Transition {
        Transition {
            state: state.to_string(),
            read,
            next_state: next.to_string(),
            write,
            direction: dir,
        }
    }

    fn definition(transitions: Vec<Transition>) -> MachineDefinition {
        MachineDefinition {
            name: "Test".to_string(),
            states: vec!["q0".into(), "q1".into(), "acc".into(), "rej".into()],
            input_alphabet: vec!['a'],
            tape_alphabet: vec!['a', BLANK_SYMBOL],
            start_state: "q0".to_string(),
            accept_state: "acc".to_string(),
            reject_state: "rej".to_string(),
            transitions,
        }
    }

    fn a_plus() -> MachineDefinition {
        definition(vec![
            rule("q0", 'a', "q1", 'a', Direction::Right),
            rule("q1", 'a', "q1", 'a', Direction::Right),
            rule("q1", BLANK_SYMBOL, "acc", BLANK_SYMBOL, Direction::Right),
        ])
    }

    #[test]
    fn test_accepts_a_plus() {
        let simulation = Explorer::new(a_plus(), 20).explore("aaa");

        assert_eq!(simulation.outcome, Outcome::Accepted { depth: 4 });
        assert_eq!(simulation.levels.len(), 5);
        assert_eq!(simulation.stats.transitions, 4);
        assert_eq!(simulation.stats.non_leaf, 4);
        assert_eq!(simulation.stats.nondeterminism(), Some(1.0));
        assert_eq!(
            simulation.levels[4],
            vec![Configuration::new("aaa_", "acc", "_")]
        );
    }

    #[test]
    fn test_deterministic_implicit_reject() {
        let simulation = Explorer::new(definition(Vec::new()), 20).explore("a");

        assert_eq!(simulation.outcome, Outcome::Rejected { depth: 0 });
        assert_eq!(simulation.levels.len(), 1);
        assert_eq!(simulation.stats.transitions, 1);
        assert_eq!(simulation.stats.non_leaf, 1);
        assert_eq!(simulation.stats.nondeterminism(), Some(1.0));
    }

    #[test]
    fn test_implicit_reject_is_counted_but_not_materialized() {
        let simulation = Explorer::new(a_plus(), 20).explore("ab");

        // q0 moves over 'a', then q1 has no rule for 'b'
        assert_eq!(simulation.outcome, Outcome::Rejected { depth: 1 });
        assert_eq!(simulation.stats.transitions, 2);
        assert_eq!(simulation.configuration_count(), 2);
        // Only the first transition produced a configuration
        assert_ne!(
            simulation.stats.transitions,
            simulation.configuration_count() - 1
        );
    }

    #[test]
    fn test_two_branches_from_start() {
        let simulation = Explorer::new(
            definition(vec![
                rule("q0", 'a', "q1", 'a', Direction::Right),
                rule("q0", 'a', "q1", 'a', Direction::Left),
            ]),
            20,
        )
        .explore("a");

        assert_eq!(simulation.levels[1].len(), 2);
        assert_eq!(simulation.stats.transitions, 2 + 2);
        // Level 0 contributed one non-leaf with two transitions
        assert_eq!(simulation.outcome, Outcome::Rejected { depth: 1 });
        assert_eq!(simulation.stats.non_leaf, 3);
    }

    #[test]
    fn test_branching_ratio_after_level_zero() {
        let simulation = Explorer::new(
            definition(vec![
                rule("q0", 'a', "acc", 'a', Direction::Right),
                rule("q0", 'a', "q1", 'a', Direction::Stay),
            ]),
            20,
        )
        .explore("a");

        assert_eq!(simulation.outcome, Outcome::Accepted { depth: 1 });
        assert_eq!(simulation.levels[1].len(), 2);
        assert_eq!(simulation.stats.transitions, 2);
        assert_eq!(simulation.stats.non_leaf, 1);
        assert_eq!(simulation.stats.nondeterminism(), Some(2.0));
    }

    #[test]
    fn test_accept_short_circuits_level() {
        // The first configuration of level 1 accepts, so the second is never expanded
        let simulation = Explorer::new(
            definition(vec![
                rule("q0", 'a', "acc", 'a', Direction::Stay),
                rule("q0", 'a', "q1", 'a', Direction::Stay),
            ]),
            20,
        )
        .explore("a");

        assert_eq!(simulation.outcome, Outcome::Accepted { depth: 1 });
        assert_eq!(simulation.stats.transitions, 2);
        assert_eq!(simulation.stats.non_leaf, 1);
    }

    #[test]
    fn test_reject_state_counts_a_transition() {
        let simulation = Explorer::new(
            definition(vec![rule("q0", 'a', "rej", 'a', Direction::Right)]),
            20,
        )
        .explore("a");

        assert_eq!(simulation.outcome, Outcome::Rejected { depth: 1 });
        assert_eq!(simulation.levels.len(), 2);
        // One explicit transition into rej, one for visiting rej
        assert_eq!(simulation.stats.transitions, 2);
        assert_eq!(simulation.stats.non_leaf, 1);
    }

    #[test]
    fn test_depth_exhausted() {
        let simulation = Explorer::new(
            definition(vec![rule("q0", 'a', "q0", 'a', Direction::Stay)]),
            5,
        )
        .explore("a");

        assert_eq!(simulation.outcome, Outcome::DepthExhausted { max_depth: 5 });
        assert_eq!(simulation.levels.len(), 6);
        assert_eq!(simulation.stats.transitions, 5);
    }

    #[test]
    fn test_outcome_depth() {
        assert_eq!(Outcome::Accepted { depth: 4 }.depth(), 4);
        assert_eq!(Outcome::Rejected { depth: 0 }.depth(), 0);
        assert_eq!(Outcome::DepthExhausted { max_depth: 20 }.depth(), 20);
        assert!(Outcome::Accepted { depth: 1 }.is_accepted());
        assert!(!Outcome::Rejected { depth: 1 }.is_accepted());
    }

    #[test]
    fn test_zero_max_depth() {
        let simulation = Explorer::new(a_plus(), 0).explore("aaa");

        assert_eq!(simulation.outcome, Outcome::DepthExhausted { max_depth: 0 });
        assert_eq!(simulation.levels.len(), 1);
        assert_eq!(simulation.stats, SimulationStats::default());
        assert_eq!(simulation.stats.nondeterminism(), None);
    }

    #[test]
    fn test_start_in_accept_state() {
        let mut def = a_plus();
        def.start_state = "acc".to_string();
        let simulation = Explorer::new(def, 20).explore("");

        assert_eq!(simulation.outcome, Outcome::Accepted { depth: 0 });
        assert_eq!(simulation.stats.transitions, 0);
        assert_eq!(simulation.stats.nondeterminism(), None);
    }

    #[test]
    fn test_explore_is_repeatable() {
        let explorer = Explorer::new(a_plus(), 20);
        assert_eq!(explorer.explore("aaaa"), explorer.explore("aaaa"));
    }
}
