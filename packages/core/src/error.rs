//! Errors raised while issuing identities and sessions.

use thiserror::Error;

use crate::entropy::EntropyError;

/// Failure to construct a security-sensitive value.
///
/// There is deliberately no fallback: callers must either abort or retry,
/// never continue with a predictable identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueError {
    #[error("cannot issue identifier: {0}")]
    EntropyUnavailable(#[from] EntropyError),
}
