//! Single-line cast using the three-coin method.

use rand::Rng;

const HEADS: u8 = 3;
const TAILS: u8 = 2;
const COINS_PER_LINE: usize = 3;

/// Outcome of casting one line.
///
/// Three coins give weights 1/8, 3/8, 3/8, 1/8 for 6, 7, 8, 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LineDraw {
    /// Yin, changing.
    OldYin = 6,
    /// Yang, stable.
    YoungYang = 7,
    /// Yin, stable.
    YoungYin = 8,
    /// Yang, changing.
    OldYang = 9,
}

impl LineDraw {
    /// Tosses three coins (heads = 3, tails = 2) and classifies the sum.
    pub fn cast<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let sum: u8 = (0..COINS_PER_LINE)
            .map(|_| if rng.gen::<bool>() { HEADS } else { TAILS })
            .sum();
        match sum {
            6 => Self::OldYin,
            7 => Self::YoungYang,
            8 => Self::YoungYin,
            _ => Self::OldYang,
        }
    }

    /// Traditional ritual value, 6..=9.
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_yang(self) -> bool {
        matches!(self, Self::YoungYang | Self::OldYang)
    }

    pub fn is_changing(self) -> bool {
        matches!(self, Self::OldYin | Self::OldYang)
    }

    /// Line value: 1 for yang, 0 for yin.
    pub fn line(self) -> u8 {
        u8::from(self.is_yang())
    }
}
