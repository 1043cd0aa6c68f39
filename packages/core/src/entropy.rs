//! Secure random source used for every identifier this crate issues.
//!
//! Identifiers are security-sensitive: a predictable session id or identity
//! id is worse than none at all. Construction therefore fails closed. If the
//! source cannot supply bytes, the caller gets an [`EntropyError`] and no
//! value is built. Deciding whether to abort or retry belongs to the binary
//! at the process boundary, not to this crate.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// Number of random bytes behind every identifier (128 bits).
pub const ID_BYTES: usize = 16;

/// The random source could not supply bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("secure random source unavailable: {0}")]
pub struct EntropyError(pub String);

/// A source of cryptographically unpredictable bytes.
///
/// Implemented for [`OsEntropy`] in production; tests substitute sources
/// that fail or replay fixed bytes.
pub trait EntropySource {
    /// Fill `buf` entirely, or fail without partial success being observable.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError>;

    /// Draw a fresh 128-bit identifier.
    fn id_bytes(&mut self) -> Result<[u8; ID_BYTES], EntropyError> {
        let mut buf = [0u8; ID_BYTES];
        self.fill(&mut buf)?;
        Ok(buf)
    }
}

/// The operating system's CSPRNG, via [`OsRng`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| EntropyError(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
