//! Trigram entity and trigram-level vocabulary.
//!
//! # Invariants
//! - There are exactly eight trigrams, numbered 1..=8.
//! - A trigram never changes after it is built from its seed record.

use super::lines::LinePattern;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the eight three-line figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigram {
    number: u32,
    names: Vec<String>,
    character: String,
    pattern: LinePattern,
    attribute: String,
    family_relationship: String,
}

impl Trigram {
    pub(crate) fn new(
        number: u32,
        names: Vec<String>,
        character: String,
        pattern: LinePattern,
        attribute: String,
        family_relationship: String,
    ) -> Self {
        Self {
            number,
            names,
            character,
            pattern,
            attribute,
            family_relationship,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Unicode trigram symbol, e.g. `☰`.
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

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn family_relationship(&self) -> &str {
        &self.family_relationship
    }
}

/// Where a trigram sits inside a hexagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Top,
    Bottom,
}

impl Position {
    /// Stable string id, also used as graph edge name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown position string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionParseError(pub String);

impl Display for PositionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown trigram position `{}`; expected top|bottom", self.0)
    }
}

impl Error for PositionParseError {}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(PositionParseError(other.to_string())),
        }
    }
}

/// Traditional circular arrangements of the eight trigrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrigramSequence {
    /// Fu Xi arrangement.
    EarlierHeaven,
    /// King Wen arrangement.
    LaterHeaven,
}

const EARLIER_HEAVEN: [u32; 8] = [1, 6, 4, 5, 2, 3, 7, 8];
const LATER_HEAVEN: [u32; 8] = [7, 2, 8, 1, 4, 5, 3, 6];

impl TrigramSequence {
    /// Trigram numbers in sequence order.
    pub fn numbers(self) -> [u32; 8] {
        match self {
            Self::EarlierHeaven => EARLIER_HEAVEN,
            Self::LaterHeaven => LATER_HEAVEN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EarlierHeaven => "earlierHeaven",
            Self::LaterHeaven => "laterHeaven",
        }
    }
}

/// Unknown trigram sequence name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceParseError(pub String);

impl Display for SequenceParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown trigram sequence `{}`; expected earlierHeaven|laterHeaven",
            self.0
        )
    }
}

impl Error for SequenceParseError {}

impl FromStr for TrigramSequence {
    type Err = SequenceParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "earlierHeaven" => Ok(Self::EarlierHeaven),
            "laterHeaven" => Ok(Self::LaterHeaven),
            other => Err(SequenceParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, PositionParseError, TrigramSequence};

    #[test]
    fn position_parse_is_strict() {
        assert_eq!("top".parse::<Position>().unwrap(), Position::Top);
        assert_eq!("bottom".parse::<Position>().unwrap(), Position::Bottom);
        assert_eq!(
            "middle".parse::<Position>().unwrap_err(),
            PositionParseError("middle".to_string())
        );
        assert!("Top".parse::<Position>().is_err());
    }

    #[test]
    fn sequences_are_permutations_of_all_trigrams() {
        for sequence in [TrigramSequence::EarlierHeaven, TrigramSequence::LaterHeaven] {
            let mut numbers = sequence.numbers().to_vec();
            numbers.sort_unstable();
            assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        }
    }

    #[test]
    fn sequence_names_roundtrip() {
        for sequence in [TrigramSequence::EarlierHeaven, TrigramSequence::LaterHeaven] {
            assert_eq!(sequence.as_str().parse::<TrigramSequence>().unwrap(), sequence);
        }
        assert!("middleHeaven".parse::<TrigramSequence>().is_err());
    }
}
