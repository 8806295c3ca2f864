//! Core model of the I Ching: trigrams, hexagrams, line changes, the
//! relationship graph between them, and coin-cast readings.
//! This crate is the single source of truth for the figure invariants.

pub mod book;
pub mod logging;
pub mod model;
pub mod reading;
pub mod seed;

pub use book::change::{Change, ChangeError, ChangeResult};
pub use book::graph::{Graph, GraphEdge, GraphNode, NodeKind};
pub use book::{Book, LookupError, LookupResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::hexagram::Hexagram;
pub use model::lines::{LinePattern, LinePatternError, HEXAGRAM_LINES, TRIGRAM_LINES};
pub use model::trigram::{
    Position, PositionParseError, SequenceParseError, Trigram, TrigramSequence,
};
pub use reading::{LineDraw, QuestionRng, Reading, ReadingError, ReadingResult};
pub use seed::{HexagramRecord, SeedDataset, SeedError, TrigramRecord};

use std::sync::Arc;

/// Hexagram `number` (1..=64) from the bundled book.
pub fn hexagram(number: u32) -> LookupResult<Arc<Hexagram>> {
    Book::bundled().hexagram(number).cloned()
}

/// Trigram `number` (1..=8) from the bundled book.
pub fn trigram(number: u32) -> LookupResult<Arc<Trigram>> {
    Book::bundled().trigram(number).cloned()
}

/// Trigrams of the bundled book in a traditional arrangement.
pub fn trigram_sequence(sequence: TrigramSequence) -> LookupResult<Vec<Arc<Trigram>>> {
    Book::bundled().trigram_sequence(sequence)
}

/// Relationship graph of the bundled book; same instance on every call.
pub fn as_graph() -> LookupResult<&'static Graph> {
    Book::bundled().as_graph()
}

/// Casts a reading for `question` against the bundled book.
pub fn ask(question: &str) -> ReadingResult<Reading> {
    Book::bundled().ask(question)
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
