//! Seed dataset for the eight trigrams and sixty-four hexagrams.
//!
//! # Responsibility
//! - Decode the bundled (or caller-supplied) JSON seed document.
//! - Reject inconsistent seed data before any entity is built.
//!
//! # Invariants
//! - A validated dataset has trigrams numbered 1..=8 and hexagrams numbered
//!   1..=64, both in ascending order.
//! - Every record's `lines` holds only 0/1 entries of the right length.
//! - Hexagram `lines` is the reverse of `binary`. Trigram `lines` is kept
//!   as supplied; trigram patterns come from `binary` alone.
//! - Declared top/bottom trigram numbers agree with the `binary` slices.

use crate::model::lines::{LinePattern, LinePatternError, HEXAGRAM_LINES, TRIGRAM_LINES};
use log::{error, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BUNDLED_SEED_JSON: &str = include_str!("seed.json");

/// Expected trigram record count.
pub const TRIGRAM_COUNT: usize = 8;
/// Expected hexagram record count.
pub const HEXAGRAM_COUNT: usize = 64;

static TRIGRAM_BINARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[01]{3}$").expect("valid trigram binary regex"));
static HEXAGRAM_BINARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[01]{6}$").expect("valid hexagram binary regex"));

pub type SeedResult<T> = Result<T, SeedError>;

/// Record family a seed error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Trigram,
    Hexagram,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trigram => "trigram",
            Self::Hexagram => "hexagram",
        }
    }
}

/// Seed decoding and validation errors.
#[derive(Debug)]
pub enum SeedError {
    Json(serde_json::Error),
    RecordCount {
        kind: RecordKind,
        expected: usize,
        actual: usize,
    },
    NumberOutOfOrder {
        kind: RecordKind,
        index: usize,
        number: u32,
    },
    InvalidBinary {
        kind: RecordKind,
        number: u32,
        binary: String,
    },
    InvalidLines {
        kind: RecordKind,
        number: u32,
        reason: LinePatternError,
    },
    LinesMismatch {
        kind: RecordKind,
        number: u32,
    },
    EmptyNames {
        kind: RecordKind,
        number: u32,
    },
    DuplicateCharacter {
        kind: RecordKind,
        character: String,
    },
    DuplicateBinary {
        kind: RecordKind,
        binary: String,
    },
    TrigramMismatch {
        hexagram: u32,
        position: &'static str,
        declared: u32,
        derived: Option<u32>,
    },
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid seed json: {err}"),
            Self::RecordCount {
                kind,
                expected,
                actual,
            } => write!(
                f,
                "expected {expected} {} records, found {actual}",
                kind.as_str()
            ),
            Self::NumberOutOfOrder {
                kind,
                index,
                number,
            } => write!(
                f,
                "{} record at index {index} has number {number}, expected {}",
                kind.as_str(),
                index + 1
            ),
            Self::InvalidBinary {
                kind,
                number,
                binary,
            } => write!(f, "{} {number} has invalid binary `{binary}`", kind.as_str()),
            Self::InvalidLines {
                kind,
                number,
                reason,
            } => write!(f, "{} {number} has invalid lines: {reason}", kind.as_str()),
            Self::LinesMismatch { kind, number } => write!(
                f,
                "{} {number} lines are not the reverse of its binary",
                kind.as_str()
            ),
            Self::EmptyNames { kind, number } => {
                write!(f, "{} {number} has no names", kind.as_str())
            }
            Self::DuplicateCharacter { kind, character } => {
                write!(f, "duplicate {} character `{character}`", kind.as_str())
            }
            Self::DuplicateBinary { kind, binary } => {
                write!(f, "duplicate {} binary `{binary}`", kind.as_str())
            }
            Self::TrigramMismatch {
                hexagram,
                position,
                declared,
                derived,
            } => match derived {
                Some(derived) => write!(
                    f,
                    "hexagram {hexagram} declares {position} trigram {declared}, binary gives {derived}"
                ),
                None => write!(
                    f,
                    "hexagram {hexagram} {position} trigram matches no trigram pattern"
                ),
            },
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidLines { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Wire record for one trigram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrigramRecord {
    pub number: u32,
    pub names: Vec<String>,
    pub character: String,
    /// Top-line-first.
    pub binary: String,
    /// Bottom-line-first.
    pub lines: Vec<u8>,
    pub attribute: String,
    pub family_relationship: String,
}

/// Wire record for one hexagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexagramRecord {
    pub number: u32,
    pub names: Vec<String>,
    pub character: String,
    /// Top-line-first.
    pub binary: String,
    /// Bottom-line-first.
    pub lines: Vec<u8>,
    pub top_trigram: u32,
    pub bottom_trigram: u32,
}

/// Immutable seed lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedDataset {
    pub trigrams: Vec<TrigramRecord>,
    pub hexagrams: Vec<HexagramRecord>,
}

impl SeedDataset {
    /// Decodes and validates the dataset compiled into this crate.
    pub fn bundled() -> SeedResult<Self> {
        Self::from_json_str(BUNDLED_SEED_JSON)
    }

    /// Decodes and validates a caller-supplied JSON document.
    ///
    /// # Errors
    /// - `SeedError::Json` when the document does not match the record shape.
    /// - Any validation error described by [`SeedDataset::validate`].
    pub fn from_json_str(json: &str) -> SeedResult<Self> {
        let dataset = match serde_json::from_str::<SeedDataset>(json) {
            Ok(dataset) => dataset,
            Err(err) => {
                error!("event=seed_load module=seed status=error error_code=json_decode error={err}");
                return Err(err.into());
            }
        };

        if let Err(err) = dataset.validate() {
            error!("event=seed_load module=seed status=error error_code=invalid_seed error={err}");
            return Err(err);
        }

        info!(
            "event=seed_load module=seed status=ok trigrams={} hexagrams={}",
            dataset.trigrams.len(),
            dataset.hexagrams.len()
        );
        Ok(dataset)
    }

    /// Checks every structural invariant of the seed table.
    pub fn validate(&self) -> SeedResult<()> {
        let trigram_patterns = self.validate_trigrams()?;
        self.validate_hexagrams(&trigram_patterns)
    }

    fn validate_trigrams(&self) -> SeedResult<Vec<LinePattern>> {
        check_count(RecordKind::Trigram, TRIGRAM_COUNT, self.trigrams.len())?;

        let mut characters = HashSet::new();
        let mut binaries = HashSet::new();
        let mut patterns = Vec::with_capacity(self.trigrams.len());
        for (index, record) in self.trigrams.iter().enumerate() {
            let pattern = check_record(
                RecordKind::Trigram,
                index,
                RecordView {
                    number: record.number,
                    names: &record.names,
                    binary: &record.binary,
                    lines: &record.lines,
                },
                &TRIGRAM_BINARY_RE,
                TRIGRAM_LINES,
                LinesRule::ShapeOnly,
            )?;
            check_unique(
                RecordKind::Trigram,
                &mut characters,
                &mut binaries,
                &record.character,
                &record.binary,
            )?;
            patterns.push(pattern);
        }
        Ok(patterns)
    }

    fn validate_hexagrams(&self, trigram_patterns: &[LinePattern]) -> SeedResult<()> {
        check_count(RecordKind::Hexagram, HEXAGRAM_COUNT, self.hexagrams.len())?;

        let mut characters = HashSet::new();
        let mut binaries = HashSet::new();
        for (index, record) in self.hexagrams.iter().enumerate() {
            let pattern = check_record(
                RecordKind::Hexagram,
                index,
                RecordView {
                    number: record.number,
                    names: &record.names,
                    binary: &record.binary,
                    lines: &record.lines,
                },
                &HEXAGRAM_BINARY_RE,
                HEXAGRAM_LINES,
                LinesRule::MirrorBinary,
            )?;
            check_unique(
                RecordKind::Hexagram,
                &mut characters,
                &mut binaries,
                &record.character,
                &record.binary,
            )?;

            check_declared_trigram(
                record.number,
                "top",
                record.top_trigram,
                trigram_number_for(trigram_patterns, pattern.upper_trigram()),
            )?;
            check_declared_trigram(
                record.number,
                "bottom",
                record.bottom_trigram,
                trigram_number_for(trigram_patterns, pattern.lower_trigram()),
            )?;
        }
        Ok(())
    }
}

/// How strictly a record's `lines` must agree with its `binary`.
#[derive(Clone, Copy)]
enum LinesRule {
    /// Trigram seeds may carry `lines` that do not mirror `binary`.
    ShapeOnly,
    MirrorBinary,
}

struct RecordView<'a> {
    number: u32,
    names: &'a [String],
    binary: &'a str,
    lines: &'a [u8],
}

fn check_count(kind: RecordKind, expected: usize, actual: usize) -> SeedResult<()> {
    if expected != actual {
        return Err(SeedError::RecordCount {
            kind,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_record(
    kind: RecordKind,
    index: usize,
    record: RecordView<'_>,
    binary_re: &Regex,
    line_count: usize,
    rule: LinesRule,
) -> SeedResult<LinePattern> {
    if record.number as usize != index + 1 {
        return Err(SeedError::NumberOutOfOrder {
            kind,
            index,
            number: record.number,
        });
    }
    if record.names.is_empty() {
        return Err(SeedError::EmptyNames {
            kind,
            number: record.number,
        });
    }

    let invalid_binary = || SeedError::InvalidBinary {
        kind,
        number: record.number,
        binary: record.binary.to_string(),
    };
    if !binary_re.is_match(record.binary) {
        return Err(invalid_binary());
    }
    let pattern =
        LinePattern::parse_binary(record.binary, line_count).map_err(|_| invalid_binary())?;

    let from_lines = LinePattern::from_lines(record.lines, line_count).map_err(|reason| {
        SeedError::InvalidLines {
            kind,
            number: record.number,
            reason,
        }
    })?;
    match rule {
        LinesRule::MirrorBinary if from_lines != pattern => Err(SeedError::LinesMismatch {
            kind,
            number: record.number,
        }),
        _ => Ok(pattern),
    }
}

fn check_unique(
    kind: RecordKind,
    characters: &mut HashSet<String>,
    binaries: &mut HashSet<String>,
    character: &str,
    binary: &str,
) -> SeedResult<()> {
    if !characters.insert(character.to_string()) {
        return Err(SeedError::DuplicateCharacter {
            kind,
            character: character.to_string(),
        });
    }
    if !binaries.insert(binary.to_string()) {
        return Err(SeedError::DuplicateBinary {
            kind,
            binary: binary.to_string(),
        });
    }
    Ok(())
}

fn trigram_number_for(trigram_patterns: &[LinePattern], slice: LinePattern) -> Option<u32> {
    trigram_patterns
        .iter()
        .position(|pattern| *pattern == slice)
        .map(|index| index as u32 + 1)
}

fn check_declared_trigram(
    hexagram: u32,
    position: &'static str,
    declared: u32,
    derived: Option<u32>,
) -> SeedResult<()> {
    if derived != Some(declared) {
        return Err(SeedError::TrigramMismatch {
            hexagram,
            position,
            declared,
            derived,
        });
    }
    Ok(())
}
