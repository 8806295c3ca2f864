//! Figure model for trigrams and hexagrams.
//!
//! # Responsibility
//! - Define the immutable trigram/hexagram entities built from seed records.
//! - Own the single line storage that backs both line orderings.
//!
//! # Invariants
//! - Entities are read-only after construction.
//! - Line orderings are derived, never stored twice.

pub mod hexagram;
pub mod lines;
pub mod trigram;
