//! This module provides the parser for tabular machine definitions, utilizing the `pest` crate.
//! The grammar in `grammar.pest` splits the text into comma-separated records; this module
//! interprets the records positionally and builds a [`MachineDefinition`].

use crate::{
    analyzer::analyze,
    types::{Direction, MachineDefinition, NtmError, Transition, MAX_DEFINITION_SIZE},
};
use pest::{iterators::Pair, Parser as PestParser};
use pest_derive::Parser as PestParser;

/// Labels of the header lines, in the order they must appear.
const HEADER: [&str; 7] = [
    "machine name",
    "states",
    "input alphabet",
    "tape alphabet",
    "start state",
    "accept state",
    "reject state",
];

/// Fields of a transition row: from, read, to, write, move.
const TRANSITION_FIELDS: usize = 5;

/// Derives a `PestParser` for the definition grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct DefinitionParser;

/// One non-blank line of a definition.
#[derive(Debug, Clone, PartialEq)]
struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    /// The fields without the empty ones that pad the end of the line.
    fn unpadded_fields(&self) -> &[String] {
        let len = self
            .fields
            .iter()
            .rposition(|field| !field.trim().is_empty())
            .map_or(0, |i| i + 1);
        &self.fields[..len]
    }

    /// The fields as a flat list. Fields are split again on commas so a list may also be
    /// written as one quoted field.
    fn items(&self) -> Vec<String> {
        self.fields
            .iter()
            .flat_map(|field| field.split(','))
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn single(&self, label: &str) -> Result<String, NtmError> {
        match self.items().as_slice() {
            [value] => Ok(value.clone()),
            items => Err(malformed(
                self.line,
                &format!("expected a single {label}, found {}", items.len()),
            )),
        }
    }

    fn symbols(&self, label: &str) -> Result<Vec<char>, NtmError> {
        self.items()
            .iter()
            .map(|item| parse_symbol(item, self.line, label))
            .collect()
    }
}

/// Parses the given input string into a `MachineDefinition`.
///
/// This is the main entry point for parsing definitions. The text is split into records,
/// the seven header lines and the transition rows are interpreted, and the result is
/// validated before being returned.
///
/// # Returns
///
/// * `Ok(MachineDefinition)` if the input is successfully parsed and validated.
/// * `Err(NtmError::ParseError)` if the text is not a sequence of comma-separated records.
/// * `Err(NtmError::MalformedDefinition)` if fields are missing or have the wrong shape.
/// * `Err(NtmError::ValidationError)` if the definition fails validation.
pub fn parse(input: &str) -> Result<MachineDefinition, NtmError> {
    if input.len() > MAX_DEFINITION_SIZE {
        return Err(NtmError::MalformedDefinition(format!(
            "definition is {} bytes, the limit is {MAX_DEFINITION_SIZE}",
            input.len()
        )));
    }

    let definition = parse_definition(parse_records(input)?)?;

    analyze(&definition)?;

    Ok(definition)
}

/// Splits the input into non-blank records.
fn parse_records(input: &str) -> Result<Vec<Record>, NtmError> {
    let root = DefinitionParser::parse(Rule::definition, input)
        .map_err(|e| NtmError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| NtmError::MalformedDefinition("empty definition".to_string()))?;

    Ok(root
        .into_inner()
        .filter(|p| p.as_rule() == Rule::record)
        .map(|p| Record {
            line: p.as_span().start_pos().line_col().0,
            fields: p.into_inner().map(parse_field).collect(),
        })
        .filter(|record| record.fields.iter().any(|f| !f.trim().is_empty()))
        .collect())
}

fn parse_field(pair: Pair<Rule>) -> String {
    match pair.as_rule() {
        Rule::quoted => pair
            .into_inner()
            .next()
            .map(|inner| inner.as_str().replace("\"\"", "\""))
            .unwrap_or_default(),
        _ => pair.as_str().to_string(),
    }
}

/// Interprets the header lines and transition rows.
fn parse_definition(records: Vec<Record>) -> Result<MachineDefinition, NtmError> {
    if records.len() < HEADER.len() {
        let missing = HEADER[records.len()..].join(", ");
        return Err(NtmError::MalformedDefinition(format!(
            "expected {} header lines, found {} (missing: {missing})",
            HEADER.len(),
            records.len()
        )));
    }

    let (header, rows) = records.split_at(HEADER.len());

    let name = header[0].unpadded_fields().join(",").trim().to_string();
    if name.is_empty() {
        return Err(malformed(header[0].line, "machine name is empty"));
    }

    let transitions = rows
        .iter()
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MachineDefinition {
        name,
        states: header[1].items(),
        input_alphabet: header[2].symbols(HEADER[2])?,
        tape_alphabet: header[3].symbols(HEADER[3])?,
        start_state: header[4].single(HEADER[4])?,
        accept_state: header[5].single(HEADER[5])?,
        reject_state: header[6].single(HEADER[6])?,
        transitions,
    })
}

fn parse_transition(record: &Record) -> Result<Transition, NtmError> {
    let mut fields: Vec<&str> = record.fields.iter().map(|f| f.trim()).collect();
    // Padding past the move column is ignored, an empty move column is kept
    while fields.len() > TRANSITION_FIELDS && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    let [state, read, next_state, write, direction] = fields.as_slice() else {
        return Err(malformed(
            record.line,
            &format!(
                "transition needs {TRANSITION_FIELDS} fields (from, read, to, write, move), found {}",
                fields.len()
            ),
        ));
    };

    if state.is_empty() || next_state.is_empty() {
        return Err(malformed(record.line, "transition state is empty"));
    }

    Ok(Transition {
        state: state.to_string(),
        read: parse_symbol(read, record.line, "read symbol")?,
        next_state: next_state.to_string(),
        write: parse_symbol(write, record.line, "write symbol")?,
        direction: Direction::from_token(direction),
    })
}

/// Parses a single-character symbol.
fn parse_symbol(input: &str, line: usize, label: &str) -> Result<char, NtmError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(malformed(
            line,
            &format!("{label} '{input}' must be a single character"),
        )),
    }
}

fn malformed(line: usize, msg: &str) -> NtmError {
    NtmError::MalformedDefinition(format!("line {line}: {msg}"))
}
