//! Hexagram entity.
//!
//! # Invariants
//! - There are exactly sixty-four hexagrams, numbered 1..=64, with pairwise
//!   distinct line patterns.
//! - `top_trigram().binary()` equals the first three characters of `binary()`
//!   and `bottom_trigram().binary()` the last three.

use super::lines::LinePattern;
use super::trigram::{Position, Trigram};
use std::sync::Arc;

/// One of the sixty-four six-line figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hexagram {
    number: u32,
    names: Vec<String>,
    character: String,
    pattern: LinePattern,
    top_trigram: Arc<Trigram>,
    bottom_trigram: Arc<Trigram>,
}

impl Hexagram {
    /// Trigrams are resolved by the caller; see `Book::from_dataset`.
    pub(crate) fn new(
        number: u32,
        names: Vec<String>,
        character: String,
        pattern: LinePattern,
        top_trigram: Arc<Trigram>,
        bottom_trigram: Arc<Trigram>,
    ) -> Self {
        Self {
            number,
            names,
            character,
            pattern,
            top_trigram,
            bottom_trigram,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Unicode hexagram symbol, e.g. `䷀`.
    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn pattern(&self) -> LinePattern {
        self.pattern
    }

    /// Top-line-first `0`/`1` string.
    pub fn binary(&self) -> String {
        self.pattern.binary()
    }

    /// Bottom-line-first line values.
    pub fn lines(&self) -> Vec<u8> {
        self.pattern.lines()
    }

    pub fn top_trigram(&self) -> &Arc<Trigram> {
        &self.top_trigram
    }

    pub fn bottom_trigram(&self) -> &Arc<Trigram> {
        &self.bottom_trigram
    }

    pub fn trigram_at(&self, position: Position) -> &Arc<Trigram> {
        match position {
            Position::Top => &self.top_trigram,
            Position::Bottom => &self.bottom_trigram,
        }
    }

    /// Whether `trigram` sits at `position`, or at either position for `None`.
    pub fn contains_trigram(&self, trigram: &Trigram, position: Option<Position>) -> bool {
        match position {
            Some(position) => self.trigram_at(position).number() == trigram.number(),
            None => {
                self.top_trigram.number() == trigram.number()
                    || self.bottom_trigram.number() == trigram.number()
            }
        }
    }
}
