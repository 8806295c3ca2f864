//! Divination readings.
//!
//! # Responsibility
//! - Cast six lines, resolve them to a hexagram, and derive the change
//!   produced by the changing lines.
//!
//! # Invariants
//! - Draws are ordered bottom line first.
//! - A reading carries a change iff at least one draw is changing, and the
//!   change target always differs from the cast hexagram.
//! - Question text is never logged.

use crate::book::change::{Change, ChangeError};
use crate::book::{Book, LookupError};
use crate::model::hexagram::Hexagram;
use crate::model::lines::{LinePattern, HEXAGRAM_LINES};
use log::info;
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod draw;
mod rng;

pub use draw::LineDraw;
pub use rng::QuestionRng;

pub type ReadingResult<T> = Result<T, ReadingError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    Lookup(LookupError),
    Change(ChangeError),
}

impl Display for ReadingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lookup(err) => write!(f, "{err}"),
            Self::Change(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReadingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            Self::Change(err) => Some(err),
        }
    }
}

impl From<LookupError> for ReadingError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

impl From<ChangeError> for ReadingError {
    fn from(value: ChangeError) -> Self {
        Self::Change(value)
    }
}

/// Result of one divination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub question: String,
    /// Bottom line first.
    pub draws: [LineDraw; HEXAGRAM_LINES],
    pub hexagram: Arc<Hexagram>,
    pub change: Option<Change>,
}

impl Reading {
    /// Bottom-line-first flags, `1` for each changing line.
    pub fn changing_lines(&self) -> Vec<u8> {
        self.draws
            .iter()
            .map(|draw| u8::from(draw.is_changing()))
            .collect()
    }
}

impl Book {
    /// Casts a reading seeded by `question` plus fresh entropy.
    pub fn ask(&self, question: &str) -> ReadingResult<Reading> {
        let mut rng = QuestionRng::new(question);
        self.ask_with_rng(question, &mut rng)
    }

    /// Casts a reading from a caller-supplied random source.
    pub fn ask_with_rng<R: Rng + ?Sized>(
        &self,
        question: &str,
        rng: &mut R,
    ) -> ReadingResult<Reading> {
        let draws: [LineDraw; HEXAGRAM_LINES] =
            std::array::from_fn(|_| LineDraw::cast(&mut *rng));

        let bits = draws
            .iter()
            .enumerate()
            .fold(0u8, |bits, (index, draw)| bits | (draw.line() << index));
        let hexagram = Arc::clone(
            self.hexagram_by_pattern(LinePattern::from_bits(bits, HEXAGRAM_LINES))?,
        );

        let change = if draws.iter().any(|draw| draw.is_changing()) {
            let flips: Vec<u8> = draws
                .iter()
                .map(|draw| u8::from(draw.is_changing()))
                .collect();
            self.change_lines(&hexagram, &flips)?
        } else {
            None
        };

        info!(
            "event=reading module=reading status=ok hexagram={} change_to={}",
            hexagram.number(),
            change
                .as_ref()
                .map(|change| change.to().number().to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        Ok(Reading {
            question: question.to_string(),
            draws,
            hexagram,
            change,
        })
    }
}
