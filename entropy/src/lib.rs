//! Secure random byte source.
//!
//! Components that need randomness take an [`EntropySource`] instead of reaching
//! for a global generator, so tests can plug in [`SeededEntropy`].

use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy unavailable: {0}")]
pub struct EntropyError(pub String);

pub trait EntropySource: Send + Sync {
    /// Fills the whole `buf`. On failure `buf` is zeroed, callers never see a
    /// partially random buffer.
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError>;

    fn generate(&self, n: usize) -> Result<Vec<u8>, EntropyError> {
        let mut buf = vec![0u8; n];
        self.fill(buf.as_mut_slice())?;
        Ok(buf)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buf)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Arc<T> {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buf)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Box<T> {
    fn fill(&self, buf: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill(buf)
    }
}

mod os_entropy;
pub use os_entropy::OsEntropy;

mod seeded;
pub use seeded::SeededEntropy;
