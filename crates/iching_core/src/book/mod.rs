//! The book: registry of all figures plus their derived caches.
//!
//! # Responsibility
//! - Build trigram/hexagram entities from a validated seed dataset.
//! - Serve identity and pattern lookups.
//! - Own the write-once caches for per-hexagram changes and the graph.
//!
//! # Invariants
//! - Entities are shared through `Arc` and never mutated.
//! - Each cache slot is populated at most once and is safe to read from
//!   multiple threads.

use crate::model::hexagram::Hexagram;
use crate::model::lines::{LinePattern, HEXAGRAM_LINES, TRIGRAM_LINES};
use crate::model::trigram::{Position, Trigram, TrigramSequence};
use crate::seed::{RecordKind, SeedDataset, SeedError, SeedResult};
use log::info;
use once_cell::sync::{Lazy, OnceCell};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub mod change;
pub mod graph;

use change::Change;
use graph::Graph;

static BUNDLED_BOOK: Lazy<Book> = Lazy::new(|| {
    let dataset = SeedDataset::bundled().expect("bundled seed dataset is valid");
    Book::from_dataset(&dataset).expect("bundled seed dataset builds a book")
});

pub type LookupResult<T> = Result<T, LookupError>;

/// Identity or pattern lookup failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    HexagramNotFound(u32),
    TrigramNotFound(u32),
    /// No hexagram has this top-line-first pattern.
    PatternNotFound(String),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HexagramNotFound(number) => {
                write!(f, "hexagram not found: {number} (expected 1..=64)")
            }
            Self::TrigramNotFound(number) => {
                write!(f, "trigram not found: {number} (expected 1..=8)")
            }
            Self::PatternNotFound(binary) => write!(f, "no figure matches pattern `{binary}`"),
        }
    }
}

impl Error for LookupError {}

/// Registry of the eight trigrams and sixty-four hexagrams.
pub struct Book {
    trigrams: Vec<Arc<Trigram>>,
    hexagrams: Vec<Arc<Hexagram>>,
    hexagram_index: HashMap<LinePattern, usize>,
    changes: Vec<OnceCell<Vec<Change>>>,
    graph: OnceCell<Graph>,
}

impl Book {
    /// Process-wide book built from the bundled seed dataset.
    pub fn bundled() -> &'static Book {
        &BUNDLED_BOOK
    }

    /// Builds a book from a seed dataset.
    ///
    /// # Errors
    /// - Any `SeedError` from dataset validation, including a hexagram whose
    ///   top or bottom slice matches no trigram.
    pub fn from_dataset(dataset: &SeedDataset) -> SeedResult<Self> {
        dataset.validate()?;

        let mut trigrams = Vec::with_capacity(dataset.trigrams.len());
        for record in &dataset.trigrams {
            let pattern = parse_pattern(&record.binary, TRIGRAM_LINES).ok_or_else(|| {
                SeedError::InvalidBinary {
                    kind: RecordKind::Trigram,
                    number: record.number,
                    binary: record.binary.clone(),
                }
            })?;
            trigrams.push(Arc::new(Trigram::new(
                record.number,
                record.names.clone(),
                record.character.clone(),
                pattern,
                record.attribute.clone(),
                record.family_relationship.clone(),
            )));
        }

        let mut hexagrams = Vec::with_capacity(dataset.hexagrams.len());
        let mut hexagram_index = HashMap::with_capacity(dataset.hexagrams.len());
        for (index, record) in dataset.hexagrams.iter().enumerate() {
            let pattern = parse_pattern(&record.binary, HEXAGRAM_LINES).ok_or_else(|| {
                SeedError::InvalidBinary {
                    kind: RecordKind::Hexagram,
                    number: record.number,
                    binary: record.binary.clone(),
                }
            })?;
            let top = find_trigram(&trigrams, pattern.upper_trigram()).ok_or(
                SeedError::TrigramMismatch {
                    hexagram: record.number,
                    position: Position::Top.as_str(),
                    declared: record.top_trigram,
                    derived: None,
                },
            )?;
            let bottom = find_trigram(&trigrams, pattern.lower_trigram()).ok_or(
                SeedError::TrigramMismatch {
                    hexagram: record.number,
                    position: Position::Bottom.as_str(),
                    declared: record.bottom_trigram,
                    derived: None,
                },
            )?;

            hexagram_index.insert(pattern, index);
            hexagrams.push(Arc::new(Hexagram::new(
                record.number,
                record.names.clone(),
                record.character.clone(),
                pattern,
                top,
                bottom,
            )));
        }

        let changes = hexagrams.iter().map(|_| OnceCell::new()).collect();
        info!(
            "event=book_build module=book status=ok trigrams={} hexagrams={}",
            trigrams.len(),
            hexagrams.len()
        );

        Ok(Self {
            trigrams,
            hexagrams,
            hexagram_index,
            changes,
            graph: OnceCell::new(),
        })
    }

    /// All trigrams ordered by number.
    pub fn trigrams(&self) -> &[Arc<Trigram>] {
        &self.trigrams
    }

    /// All hexagrams ordered by number.
    pub fn hexagrams(&self) -> &[Arc<Hexagram>] {
        &self.hexagrams
    }

    /// Looks up a trigram by number (1..=8).
    pub fn trigram(&self, number: u32) -> LookupResult<&Arc<Trigram>> {
        index_for(number, self.trigrams.len())
            .and_then(|index| self.trigrams.get(index))
            .ok_or(LookupError::TrigramNotFound(number))
    }

    /// Looks up a hexagram by number (1..=64).
    pub fn hexagram(&self, number: u32) -> LookupResult<&Arc<Hexagram>> {
        index_for(number, self.hexagrams.len())
            .and_then(|index| self.hexagrams.get(index))
            .ok_or(LookupError::HexagramNotFound(number))
    }

    /// Looks up the hexagram with exactly this six-line pattern.
    pub fn hexagram_by_pattern(&self, pattern: LinePattern) -> LookupResult<&Arc<Hexagram>> {
        self.hexagram_index
            .get(&pattern)
            .and_then(|index| self.hexagrams.get(*index))
            .ok_or_else(|| LookupError::PatternNotFound(pattern.binary()))
    }

    /// Looks up a hexagram by its top-line-first string, e.g. `"111110"`.
    pub fn hexagram_by_binary(&self, binary: &str) -> LookupResult<&Arc<Hexagram>> {
        let pattern = parse_pattern(binary, HEXAGRAM_LINES)
            .ok_or_else(|| LookupError::PatternNotFound(binary.to_string()))?;
        self.hexagram_by_pattern(pattern)
    }

    /// Looks up a hexagram by its bottom-line-first values.
    pub fn hexagram_by_lines(&self, lines: &[u8]) -> LookupResult<&Arc<Hexagram>> {
        let pattern = LinePattern::from_lines(lines, HEXAGRAM_LINES).map_err(|_| {
            LookupError::PatternNotFound(lines.iter().rev().map(|line| line.to_string()).collect())
        })?;
        self.hexagram_by_pattern(pattern)
    }

    /// Looks up a trigram by its top-line-first string, e.g. `"110"`.
    pub fn trigram_by_binary(&self, binary: &str) -> LookupResult<&Arc<Trigram>> {
        parse_pattern(binary, TRIGRAM_LINES)
            .and_then(|pattern| {
                self.trigrams
                    .iter()
                    .find(|trigram| trigram.pattern() == pattern)
            })
            .ok_or_else(|| LookupError::PatternNotFound(binary.to_string()))
    }

    /// Trigrams in one of the traditional circular arrangements.
    pub fn trigram_sequence(&self, sequence: TrigramSequence) -> LookupResult<Vec<Arc<Trigram>>> {
        sequence
            .numbers()
            .iter()
            .map(|number| self.trigram(*number).cloned())
            .collect()
    }

    /// Hexagrams containing `trigram`, in ascending hexagram order.
    ///
    /// `Some(position)` yields the eight hexagrams with the trigram at that
    /// position; `None` yields the fifteen hexagrams with it at either.
    pub fn hexagrams_with_trigram(
        &self,
        trigram: &Trigram,
        position: Option<Position>,
    ) -> Vec<Arc<Hexagram>> {
        self.hexagrams
            .iter()
            .filter(|hexagram| hexagram.contains_trigram(trigram, position))
            .cloned()
            .collect()
    }
}

fn index_for(number: u32, len: usize) -> Option<usize> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    (index < len).then_some(index)
}

fn parse_pattern(binary: &str, line_count: usize) -> Option<LinePattern> {
    LinePattern::parse_binary(binary, line_count).ok()
}

fn find_trigram(trigrams: &[Arc<Trigram>], pattern: LinePattern) -> Option<Arc<Trigram>> {
    trigrams
        .iter()
        .find(|trigram| trigram.pattern() == pattern)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::{Book, LookupError};
    use crate::model::trigram::{Position, TrigramSequence};

    #[test]
    fn bundled_book_is_a_singleton() {
        assert!(std::ptr::eq(Book::bundled(), Book::bundled()));
    }

    #[test]
    fn lookups_reject_out_of_range_numbers() {
        let book = Book::bundled();
        assert_eq!(
            book.hexagram(0).unwrap_err(),
            LookupError::HexagramNotFound(0)
        );
        assert_eq!(
            book.hexagram(65).unwrap_err(),
            LookupError::HexagramNotFound(65)
        );
        assert_eq!(book.trigram(9).unwrap_err(), LookupError::TrigramNotFound(9));
        assert_eq!(book.trigram(0).unwrap_err(), LookupError::TrigramNotFound(0));
    }

    #[test]
    fn pattern_lookups_agree_with_numbers() {
        let book = Book::bundled();
        assert_eq!(book.hexagram_by_binary("111110").unwrap().number(), 44);
        assert_eq!(book.hexagram_by_lines(&[0, 1, 1, 1, 1, 1]).unwrap().number(), 44);
        assert_eq!(book.trigram_by_binary("101").unwrap().number(), 7);
        assert!(matches!(
            book.hexagram_by_binary("11111"),
            Err(LookupError::PatternNotFound(_))
        ));
    }

    #[test]
    fn trigram_membership_counts() {
        let book = Book::bundled();
        for trigram in book.trigrams() {
            assert_eq!(book.hexagrams_with_trigram(trigram, Some(Position::Top)).len(), 8);
            assert_eq!(book.hexagrams_with_trigram(trigram, Some(Position::Bottom)).len(), 8);
            assert_eq!(book.hexagrams_with_trigram(trigram, None).len(), 15);
        }
    }

    #[test]
    fn sequence_lookup_uses_fixed_orders() {
        let book = Book::bundled();
        let later: Vec<u32> = book
            .trigram_sequence(TrigramSequence::LaterHeaven)
            .unwrap()
            .iter()
            .map(|trigram| trigram.number())
            .collect();
        assert_eq!(later, vec![7, 2, 8, 1, 4, 5, 3, 6]);
    }
}
