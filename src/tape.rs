//! This module defines [`Configuration`], one instantaneous snapshot of a machine branch.
//!
//! The tape is split at the head into two sequences: `left` holds the cells left of the
//! head with the nearest cell last, `right` holds the head cell first followed by everything
//! to its right. Both ends touched by a move are the cheap ends of their containers, so a
//! step never rebuilds a whole segment.

use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

use crate::types::{Direction, BLANK_SYMBOL};

/// A tape split at the head together with the current state.
///
/// `right` is never empty: whenever a move would leave it empty a blank is put in its place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Configuration {
    left: Vec<char>,
    state: String,
    right: VecDeque<char>,
}

impl Configuration {
    /// Creates the starting configuration: empty left tape, the input under and right of
    /// the head, or a single blank for an empty input.
    pub fn initial(state: &str, input: &str) -> Self {
        let mut right: VecDeque<char> = input.chars().collect();
        if right.is_empty() {
            right.push_back(BLANK_SYMBOL);
        }

        Self {
            left: Vec::new(),
            state: state.to_string(),
            right,
        }
    }

    /// Builds a configuration from its three parts. An empty `right` is replaced with a
    /// single blank.
    pub fn new(left: &str, state: &str, right: &str) -> Self {
        let mut config = Self::initial(state, right);
        config.left = left.chars().collect();
        config
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the symbol under the head, or the blank if the right tape is empty.
    pub fn head(&self) -> char {
        self.right.front().copied().unwrap_or(BLANK_SYMBOL)
    }

    /// Returns the cells left of the head as a string.
    pub fn left(&self) -> String {
        self.left.iter().collect()
    }

    /// Returns the head cell and the cells right of it as a string.
    pub fn right(&self) -> String {
        self.right.iter().collect()
    }

    /// Produces the successor configuration for writing `write`, moving in `direction`
    /// and entering `next_state`. `self` is left untouched.
    ///
    /// Moving left from the leftmost cell leaves the head on the origin cell.
    pub fn apply(&self, write: char, direction: Direction, next_state: &str) -> Self {
        let mut left = self.left.clone();
        let mut right = self.rest();

        match direction {
            Direction::Right => left.push(write),
            Direction::Left => {
                right.push_front(write);
                if let Some(symbol) = left.pop() {
                    right.push_front(symbol);
                }
            }
            Direction::Stay => right.push_front(write),
        }

        Self {
            left,
            state: next_state.to_string(),
            right,
        }
    }

    /// The cells right of the head, or a single blank when there are none.
    fn rest(&self) -> VecDeque<char> {
        let mut rest: VecDeque<char> = self.right.iter().skip(1).copied().collect();
        if rest.is_empty() {
            rest.push_back(BLANK_SYMBOL);
        }
        rest
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "('{}', '{}', '{}')",
            self.left(),
            self.state,
            self.right()
        )
    }
}
