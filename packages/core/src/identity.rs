//! Participant identity: UUIDv4 id, display name and placeholder key.
//!
//! Identities are plain values: issued once, never mutated, owned by the
//! caller. Nothing here performs real cryptography. The public key is a
//! fixed placeholder and [`sign_payload`] is an unsalted digest with no
//! verification counterpart; a deployment that needs authentication must
//! replace both with real asymmetric keys.
//!
//! # Typical use
//!
//! ```text
//! let alice = create_identity("gpt-4")?;
//! let sig   = sign_payload(Some(&alice), "hello");   // 64 hex chars
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::IssueError;

/// The placeholder assigned as every identity's public key.
pub const SIMULATED_PUBLIC_KEY: &str = "GPT_SIMULATED_PUBKEY";

/// A participant in an AI-TCP session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// RFC 4122 version-4 UUID, e.g. `0f8e1a2b-3c4d-4e5f-9a6b-7c8d9e0f1a2b`.
    pub id: Uuid,
    /// Caller-supplied name, not required to be unique.
    pub display_name: String,
    /// Always [`SIMULATED_PUBLIC_KEY`].
    pub public_key: String,
}

impl Identity {
    /// The id in its hyphenated lowercase form.
    pub fn id_string(&self) -> String {
        self.id.hyphenated().to_string()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id.hyphenated())
    }
}

/// Issue a new identity using the operating system's random source.
///
/// # Errors
///
/// Returns [`IssueError::EntropyUnavailable`] if no random bytes could be
/// drawn. The identity is not created in that case.
pub fn create_identity(display_name: impl Into<String>) -> Result<Identity, IssueError> {
    create_identity_with(&mut OsEntropy, display_name)
}

/// Issue a new identity drawing the id from `source`.
pub fn create_identity_with<S>(
    source: &mut S,
    display_name: impl Into<String>,
) -> Result<Identity, IssueError>
where
    S: EntropySource + ?Sized,
{
    let bytes = source.id_bytes()?;
    // Forces version nibble 4 and variant bits 10xx.
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();

    let identity = Identity {
        id,
        display_name: display_name.into(),
        public_key: SIMULATED_PUBLIC_KEY.to_string(),
    };
    tracing::debug!(id = %identity.id, name = %identity.display_name, "identity issued");
    Ok(identity)
}

/// Simulated signature: `hex(sha256(identity.id ++ payload))`.
///
/// The id is taken in its hyphenated string form. The result is
/// deterministic and carries no key material, so anyone can forge it.
///
/// An absent identity yields an empty string rather than an error. Callers
/// that rely on the signature for anything should treat an empty result as
/// a failure.
pub fn sign_payload(identity: Option<&Identity>, payload: impl AsRef<[u8]>) -> String {
    let Some(identity) = identity else {
        tracing::warn!("sign_payload called without an identity; returning empty signature");
        return String::new();
    };

    let mut hasher = Sha256::new();
    hasher.update(identity.id_string().as_bytes());
    hasher.update(payload.as_ref());
    hex::encode(hasher.finalize())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
