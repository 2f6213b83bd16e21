//! This module renders the human-readable trace of a simulation and provides [`simulate`],
//! the entry point that runs a machine and writes its trace.

use std::io::{self, Write};

use crate::explorer::{Explorer, Outcome, Simulation, SimulationStats};
use crate::tape::Configuration;
use crate::types::{MachineDefinition, NtmError};

/// Printed after every trace.
pub const SEPARATOR: &str = "==============================================";

/// Renders the run header: machine name and input string.
pub fn render_header(name: &str, input: &str) -> String {
    format!("Machine: {name}\nInput String: {input}\n\n")
}

/// Renders the verdict block. A run that ran out of depth is reported as inconclusive.
pub fn render_verdict(outcome: &Outcome) -> String {
    let depth = outcome.depth();
    match outcome {
        Outcome::Accepted { .. } => format!(
            "Depth of Tree of configurations: {depth}\nAccepted in {depth} transitions.\n\n"
        ),
        Outcome::Rejected { .. } => format!(
            "Rejected in {depth} transitions.\nDepth of Tree of configurations: {depth}\n\n"
        ),
        Outcome::DepthExhausted { .. } => {
            format!("Max depth reached ({depth}). Trace inconclusive.\n\n")
        }
    }
}

/// Renders every level followed by the summary counters and the separator line.
pub fn render_trace(levels: &[Vec<Configuration>], stats: &SimulationStats) -> String {
    let mut out = String::from("Trace:\n");
    for (depth, level) in levels.iter().enumerate() {
        out.push_str(&format!("Depth {depth}:\n"));
        for config in level {
            out.push_str(&format!("  {config}\n"));
        }
    }

    out.push_str(&format!("Total transitions: {}\n", stats.transitions));
    out.push_str(&format!("Total non-leaf nodes: {}\n", stats.non_leaf));
    match stats.nondeterminism() {
        Some(ratio) => out.push_str(&format!("Nondeterminism: {ratio:.2}\n")),
        None => out.push_str("Nondeterminism: Undefined (no non-leaf nodes)\n"),
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

/// Renders the complete report of a run.
pub fn render(name: &str, input: &str, simulation: &Simulation) -> String {
    let mut out = render_header(name, input);
    out.push_str(&render_verdict(&simulation.outcome));
    out.push_str(&render_trace(&simulation.levels, &simulation.stats));
    out
}

/// Renders the run as pretty-printed JSON.
pub fn render_json(name: &str, input: &str, simulation: &Simulation) -> Result<String, NtmError> {
    let value = serde_json::json!({
        "machine": name,
        "input": input,
        "outcome": simulation.outcome,
        "levels": simulation
            .levels
            .iter()
            .map(|level| level.iter().map(ToString::to_string).collect::<Vec<_>>())
            .collect::<Vec<_>>(),
        "transitions": simulation.stats.transitions,
        "non_leaf": simulation.stats.non_leaf,
        "nondeterminism": simulation.stats.nondeterminism(),
    });

    serde_json::to_string_pretty(&value).map_err(|e| NtmError::Io(e.to_string()))
}

/// Runs `definition` on `input` for at most `max_depth` levels and writes the trace to
/// `sink` and to stdout.
///
/// The returned [`Simulation`] carries the same data the trace was rendered from.
pub fn simulate<W: Write>(
    definition: MachineDefinition,
    input: &str,
    max_depth: usize,
    sink: &mut W,
) -> Result<Simulation, NtmError> {
    let name = definition.name.clone();
    let simulation = Explorer::new(definition, max_depth).explore(input);
    let report = render(&name, input, &simulation);

    sink.write_all(report.as_bytes())?;
    sink.flush()?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;

    Ok(simulation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Transition, BLANK_SYMBOL};

    fn a_plus() -> MachineDefinition {
        MachineDefinition {
            name: "a plus".to_string(),
            states: vec!["q0".into(), "acc".into(), "rej".into()],
            input_alphabet: vec!['a'],
            tape_alphabet: vec!['a', BLANK_SYMBOL],
            start_state: "q0".to_string(),
            accept_state: "acc".to_string(),
            reject_state: "rej".to_string(),
            transitions: vec![
                Transition {
                    state: "q0".into(),
                    read: 'a',
                    next_state: "q0".into(),
                    write: 'a',
                    direction: Direction::Right,
                },
                Transition {
                    state: "q0".into(),
                    read: BLANK_SYMBOL,
                    next_state: "acc".into(),
                    write: BLANK_SYMBOL,
                    direction: Direction::Right,
                },
            ],
        }
    }

    #[test]
    fn test_simulate_accepting_trace() {
        let mut sink = Vec::new();
        let simulation = simulate(a_plus(), "aaa", 20, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();

        assert!(simulation.outcome.is_accepted());
        let expected = "\
Machine: a plus
Input String: aaa

Depth of Tree of configurations: 4
Accepted in 4 transitions.

Trace:
Depth 0:
  ('', 'q0', 'aaa')
Depth 1:
  ('a', 'q0', 'aa')
Depth 2:
  ('aa', 'q0', 'a')
Depth 3:
  ('aaa', 'q0', '_')
Depth 4:
  ('aaa_', 'acc', '_')
Total transitions: 4
Total non-leaf nodes: 4
Nondeterminism: 1.00
==============================================
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_simulate_rejecting_trace() {
        let mut definition = a_plus();
        definition.transitions.clear();

        let mut sink = Vec::new();
        simulate(definition, "a", 20, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();

        assert!(text.contains("Rejected in 0 transitions.\nDepth of Tree of configurations: 0\n"));
        assert!(text.contains("Total transitions: 1\n"));
        assert!(text.contains("Total non-leaf nodes: 1\n"));
        assert!(text.contains("Nondeterminism: 1.00\n"));
    }

    #[test]
    fn test_depth_exhausted_still_emits_trace() {
        let mut sink = Vec::new();
        let simulation = simulate(a_plus(), "aaaaa", 2, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();

        assert_eq!(simulation.outcome, Outcome::DepthExhausted { max_depth: 2 });
        assert!(text.contains("Max depth reached (2). Trace inconclusive."));
        assert!(!text.contains("Accepted in"));
        assert!(!text.contains("Rejected in"));
        assert!(text.contains("Depth 2:\n  ('aa', 'q0', 'aaa')\n"));
        assert!(text.ends_with(&format!("{SEPARATOR}\n")));
    }

    #[test]
    fn test_undefined_nondeterminism() {
        let trace = render_trace(
            &[vec![Configuration::initial("acc", "")]],
            &SimulationStats::default(),
        );

        assert!(trace.contains("Total transitions: 0\n"));
        assert!(trace.contains("Nondeterminism: Undefined (no non-leaf nodes)\n"));
    }

    #[test]
    fn test_ratio_two_decimal_places() {
        let stats = SimulationStats {
            transitions: 5,
            non_leaf: 3,
        };
        assert!(render_trace(&[], &stats).contains("Nondeterminism: 1.67\n"));
    }

    #[test]
    fn test_render_json() {
        let simulation = Explorer::new(a_plus(), 20).explore("a");
        let json = render_json("a plus", "a", &simulation).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["machine"], "a plus");
        assert_eq!(value["outcome"]["Accepted"]["depth"], 2);
        assert_eq!(value["levels"][0][0], "('', 'q0', 'a')");
        assert_eq!(value["transitions"], 2);
        assert_eq!(value["nondeterminism"], 1.0);
    }
}
