//! Question-seeded random source.

use rand::rngs::{OsRng, StdRng};
use rand::{RngCore, SeedableRng};

const ENTROPY_BYTES: usize = 32;

/// `StdRng` seeded from a blake3 digest of the question and fresh entropy.
///
/// Two readings of the same question usually diverge; use
/// [`QuestionRng::with_entropy`] to pin the entropy.
pub struct QuestionRng {
    inner: StdRng,
}

impl QuestionRng {
    pub fn new(question: &str) -> Self {
        let mut entropy = [0u8; ENTROPY_BYTES];
        OsRng.fill_bytes(&mut entropy);
        Self::with_entropy(question, &entropy)
    }

    pub fn with_entropy(question: &str, entropy: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(question.as_bytes());
        hasher.update(entropy);
        Self {
            inner: StdRng::from_seed(*hasher.finalize().as_bytes()),
        }
    }
}

impl RngCore for QuestionRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
