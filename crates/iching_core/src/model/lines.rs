//! Line pattern shared by trigrams, hexagrams and changes.
//!
//! # Responsibility
//! - Store the yin/yang lines of a figure exactly once.
//! - Derive both external orderings from that single storage.
//!
//! # Invariants
//! - Bit `i` holds line `i`, counted from the bottom line (bit 0).
//! - `binary()` is top-line-first and `lines()` is bottom-line-first, so
//!   `lines()` reversed and joined always equals `binary()`.
//! - Bits above `len` are always zero.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::BitXor;

/// Number of lines in a trigram.
pub const TRIGRAM_LINES: usize = 3;
/// Number of lines in a hexagram.
pub const HEXAGRAM_LINES: usize = 6;

const MAX_LINES: usize = 8;

/// Parse errors for textual or sequence line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinePatternError {
    InvalidLength { expected: usize, actual: usize },
    InvalidCharacter { index: usize, value: char },
    InvalidLineValue { index: usize, value: u8 },
    LengthMismatch { left: usize, right: usize },
}

impl Display for LinePatternError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "expected {expected} lines, got {actual}")
            }
            Self::InvalidCharacter { index, value } => {
                write!(f, "line character at {index} must be `0` or `1`, got `{value}`")
            }
            Self::InvalidLineValue { index, value } => {
                write!(f, "line value at {index} must be 0 or 1, got {value}")
            }
            Self::LengthMismatch { left, right } => {
                write!(f, "cannot combine a {left}-line pattern with a {right}-line pattern")
            }
        }
    }
}

impl Error for LinePatternError {}

/// Fixed-length sequence of yin (0) and yang (1) lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinePattern {
    bits: u8,
    len: u8,
}

impl LinePattern {
    /// Builds a pattern from raw bits (bottom line = bit 0).
    ///
    /// Bits at or above `len` are discarded.
    pub(crate) fn from_bits(bits: u8, len: usize) -> Self {
        debug_assert!(len <= MAX_LINES);
        let mask = if len >= MAX_LINES {
            u8::MAX
        } else {
            (1u8 << len) - 1
        };
        Self {
            bits: bits & mask,
            len: len as u8,
        }
    }

    /// Parses a top-line-first string such as `"111110"`.
    pub fn parse_binary(value: &str, expected_len: usize) -> Result<Self, LinePatternError> {
        let actual = value.chars().count();
        if actual != expected_len || expected_len > MAX_LINES {
            return Err(LinePatternError::InvalidLength {
                expected: expected_len,
                actual,
            });
        }

        let mut bits = 0u8;
        for (index, value) in value.chars().enumerate() {
            let line = expected_len - 1 - index;
            match value {
                '0' => {}
                '1' => bits |= 1 << line,
                other => return Err(LinePatternError::InvalidCharacter { index, value: other }),
            }
        }
        Ok(Self::from_bits(bits, expected_len))
    }

    /// Parses a bottom-line-first sequence such as `[0, 1, 1, 1, 1, 1]`.
    pub fn from_lines(lines: &[u8], expected_len: usize) -> Result<Self, LinePatternError> {
        if lines.len() != expected_len || expected_len > MAX_LINES {
            return Err(LinePatternError::InvalidLength {
                expected: expected_len,
                actual: lines.len(),
            });
        }

        let mut bits = 0u8;
        for (index, value) in lines.iter().copied().enumerate() {
            match value {
                0 => {}
                1 => bits |= 1 << index,
                other => return Err(LinePatternError::InvalidLineValue { index, value: other }),
            }
        }
        Ok(Self::from_bits(bits, expected_len))
    }

    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Whether the pattern has no lines at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw bits, bottom line = bit 0.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Line value at `index`, counted from the bottom. Out of range reads as 0.
    pub fn line(&self, index: usize) -> u8 {
        if index >= self.len() {
            return 0;
        }
        (self.bits >> index) & 1
    }

    /// Bottom-line-first line values.
    pub fn lines(&self) -> Vec<u8> {
        (0..self.len()).map(|index| self.line(index)).collect()
    }

    /// Top-line-first `0`/`1` string.
    pub fn binary(&self) -> String {
        (0..self.len())
            .rev()
            .map(|index| if self.line(index) == 1 { '1' } else { '0' })
            .collect()
    }

    /// Number of yang lines (or flipped lines, for a change pattern).
    pub fn count_set(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Whether no line is set. For a change pattern this means nothing flips.
    pub fn is_unchanged(&self) -> bool {
        self.bits == 0
    }

    /// Line-wise XOR of two patterns of the same length.
    pub fn xor(self, rhs: Self) -> Result<Self, LinePatternError> {
        if self.len != rhs.len {
            return Err(LinePatternError::LengthMismatch {
                left: self.len(),
                right: rhs.len(),
            });
        }
        Ok(self ^ rhs)
    }

    /// Upper three lines of a hexagram (the first three `binary()` characters).
    pub fn upper_trigram(&self) -> Self {
        Self::from_bits(self.bits >> TRIGRAM_LINES, TRIGRAM_LINES)
    }

    /// Lower three lines of a hexagram (the last three `binary()` characters).
    pub fn lower_trigram(&self) -> Self {
        Self::from_bits(self.bits, TRIGRAM_LINES)
    }
}

/// Unchecked line-wise XOR.
///
/// Both operands must have the same length. Mismatched lengths trip a debug
/// assertion; release builds keep the longer length. Use [`LinePattern::xor`]
/// when the lengths are not known to agree.
impl BitXor for LinePattern {
    type Output = LinePattern;

    fn bitxor(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.len, rhs.len, "xor of patterns with different lengths");
        Self::from_bits(self.bits ^ rhs.bits, self.len().max(rhs.len()))
    }
}

impl Display for LinePattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.binary())
    }
}

#[cfg(test)]
mod tests {
    use super::{LinePattern, LinePatternError, HEXAGRAM_LINES, TRIGRAM_LINES};

    #[test]
    fn binary_is_reverse_of_lines() {
        let pattern = LinePattern::parse_binary("111110", HEXAGRAM_LINES).unwrap();
        assert_eq!(pattern.lines(), vec![0, 1, 1, 1, 1, 1]);
        assert_eq!(pattern.binary(), "111110");

        let from_lines = LinePattern::from_lines(&[0, 1, 1, 1, 1, 1], HEXAGRAM_LINES).unwrap();
        assert_eq!(from_lines, pattern);
    }

    #[test]
    fn xor_flips_marked_lines() {
        let heaven = LinePattern::parse_binary("111111", HEXAGRAM_LINES).unwrap();
        let fire_over_water = LinePattern::parse_binary("101010", HEXAGRAM_LINES).unwrap();
        let diff = heaven ^ fire_over_water;
        assert_eq!(diff.binary(), "010101");
        assert_eq!(diff.lines(), vec![1, 0, 1, 0, 1, 0]);
        assert_eq!(diff.count_set(), 3);
    }

    #[test]
    fn trigram_halves_follow_binary_slices() {
        let pattern = LinePattern::parse_binary("010001", HEXAGRAM_LINES).unwrap();
        assert_eq!(pattern.upper_trigram().binary(), "010");
        assert_eq!(pattern.lower_trigram().binary(), "001");
        assert_eq!(pattern.upper_trigram().len(), TRIGRAM_LINES);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(
            LinePattern::parse_binary("11011", HEXAGRAM_LINES).unwrap_err(),
            LinePatternError::InvalidLength {
                expected: 6,
                actual: 5
            }
        );
        assert_eq!(
            LinePattern::parse_binary("11x011", HEXAGRAM_LINES).unwrap_err(),
            LinePatternError::InvalidCharacter {
                index: 2,
                value: 'x'
            }
        );
        assert_eq!(
            LinePattern::from_lines(&[1, 0, 2, 0, 1, 0], HEXAGRAM_LINES).unwrap_err(),
            LinePatternError::InvalidLineValue { index: 2, value: 2 }
        );
    }

    #[test]
    fn unchanged_means_no_set_lines() {
        let none = LinePattern::from_lines(&[0; 6], HEXAGRAM_LINES).unwrap();
        assert!(none.is_unchanged());
        assert!(!none.is_empty());
        assert_eq!(none.binary(), "000000");

        let one = LinePattern::from_lines(&[0, 0, 0, 0, 0, 1], HEXAGRAM_LINES).unwrap();
        assert!(!one.is_unchanged());
    }

    #[test]
    fn checked_xor_rejects_mixed_lengths() {
        let heaven = LinePattern::parse_binary("111111", HEXAGRAM_LINES).unwrap();
        let thunder = LinePattern::parse_binary("001", TRIGRAM_LINES).unwrap();
        assert_eq!(
            heaven.xor(thunder).unwrap_err(),
            LinePatternError::LengthMismatch { left: 6, right: 3 }
        );

        let earth = LinePattern::parse_binary("000000", HEXAGRAM_LINES).unwrap();
        assert_eq!(heaven.xor(earth).unwrap(), heaven ^ earth);
        assert_eq!(heaven.xor(earth).unwrap().binary(), "111111");
    }
}
