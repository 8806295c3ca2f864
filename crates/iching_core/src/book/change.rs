//! Line changes between hexagrams.
//!
//! # Responsibility
//! - Compute the XOR difference between two hexagrams.
//! - Apply an explicit flip pattern to a hexagram.
//! - Memoize the 63 outgoing changes of every hexagram.
//!
//! # Invariants
//! - `Change::binary()` is top-line-first; `Change::changing_lines()` is its
//!   bottom-line-first reverse.
//! - `from.pattern ^ change.pattern == to.pattern`.
//! - A memoized change list never contains a self-change.

use super::{Book, LookupError, LookupResult};
use crate::model::hexagram::Hexagram;
use crate::model::lines::{LinePattern, LinePatternError, HEXAGRAM_LINES};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Message used when a flip pattern has the wrong shape.
pub const FLIP_PATTERN_SHAPE_MESSAGE: &str =
    "lines argument must be an array of 6 zeros and ones representing changing lines";

pub type ChangeResult<T> = Result<T, ChangeError>;

/// Errors from applying a flip pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeError {
    /// Flip pattern does not have exactly six entries.
    InvalidFlipLength(usize),
    /// Flip entry is neither 0 nor 1 (index counted from the bottom line).
    InvalidLineValue { index: usize, value: u8 },
    Lookup(LookupError),
}

impl Display for ChangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlipLength(actual) => {
                write!(f, "{FLIP_PATTERN_SHAPE_MESSAGE} (got {actual} entries)")
            }
            Self::InvalidLineValue { index, value } => write!(
                f,
                "{FLIP_PATTERN_SHAPE_MESSAGE} (line {index} is {value})"
            ),
            Self::Lookup(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ChangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LookupError> for ChangeError {
    fn from(value: LookupError) -> Self {
        Self::Lookup(value)
    }
}

/// Line difference from one hexagram to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    from: Arc<Hexagram>,
    to: Arc<Hexagram>,
    pattern: LinePattern,
}

impl Change {
    pub fn from(&self) -> &Arc<Hexagram> {
        &self.from
    }

    pub fn to(&self) -> &Arc<Hexagram> {
        &self.to
    }

    /// Flipped lines as a bit pattern.
    pub fn pattern(&self) -> LinePattern {
        self.pattern
    }

    /// Top-line-first difference, e.g. `"000001"` for a bottom-line flip.
    pub fn binary(&self) -> String {
        self.pattern.binary()
    }

    /// Bottom-line-first difference; `1` marks a changing line.
    pub fn changing_lines(&self) -> Vec<u8> {
        self.pattern.lines()
    }
}

impl Book {
    /// Change from `from` to the hexagram numbered `target`.
    ///
    /// Targeting `from` itself yields an all-zero pattern; `changes` never
    /// does this.
    pub fn change_to(&self, from: &Arc<Hexagram>, target: u32) -> LookupResult<Change> {
        let to = self.hexagram(target)?;
        Ok(Change {
            from: Arc::clone(from),
            to: Arc::clone(to),
            pattern: from.pattern() ^ to.pattern(),
        })
    }

    /// Flips the lines marked with `1` in `flip_lines` (bottom line first).
    ///
    /// Returns `Ok(None)` when nothing is flipped.
    ///
    /// # Errors
    /// - `ChangeError::InvalidFlipLength` unless exactly six entries are given.
    /// - `ChangeError::InvalidLineValue` for any entry other than 0 or 1.
    /// - `ChangeError::Lookup` when the result matches no hexagram.
    pub fn change_lines(
        &self,
        from: &Arc<Hexagram>,
        flip_lines: &[u8],
    ) -> ChangeResult<Option<Change>> {
        let pattern =
            LinePattern::from_lines(flip_lines, HEXAGRAM_LINES).map_err(|err| match err {
                LinePatternError::InvalidLineValue { index, value } => {
                    ChangeError::InvalidLineValue { index, value }
                }
                _ => ChangeError::InvalidFlipLength(flip_lines.len()),
            })?;
        if pattern.is_unchanged() {
            return Ok(None);
        }

        let to = self.hexagram_by_pattern(from.pattern() ^ pattern)?;
        Ok(Some(Change {
            from: Arc::clone(from),
            to: Arc::clone(to),
            pattern,
        }))
    }

    /// Changes from `from` to every other hexagram, by ascending target number.
    ///
    /// Computed on first use and returned from the same cache afterwards.
    pub fn changes(&self, from: &Hexagram) -> LookupResult<&[Change]> {
        let number = from.number();
        let owner = self.hexagram(number)?;
        let slot = self
            .changes
            .get(number as usize - 1)
            .ok_or(LookupError::HexagramNotFound(number))?;

        let changes = slot.get_or_try_init(|| -> LookupResult<Vec<Change>> {
            let changes = self
                .hexagrams
                .iter()
                .filter(|target| target.number() != number)
                .map(|target| self.change_to(owner, target.number()))
                .collect::<LookupResult<Vec<_>>>()?;
            debug!(
                "event=changes_build module=change status=ok hexagram={} count={}",
                number,
                changes.len()
            );
            Ok(changes)
        })?;
        Ok(changes.as_slice())
    }
}
