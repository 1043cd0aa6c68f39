//! AI-TCP session: random session id binding two participants by name.
//!
//! A [`Session`] is created once and never changes. It refers to its peers
//! by display name only; nothing checks that the names belong to identities
//! issued by [`crate::identity`]. Use [`Session::between`] when you hold the
//! identities and want the names taken from them.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entropy::{EntropySource, OsEntropy};
use crate::error::IssueError;
use crate::identity::Identity;

/// A 128-bit session identifier, rendered as 32 lowercase hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SessionId([u8; 16]);

impl SessionId {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SessionId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Parses the 32-character hex form. Uppercase input is rejected so that
/// the textual form stays canonical.
impl std::str::FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || s.bytes().any(|b| b.is_ascii_uppercase()) {
            return Err(format!(
                "invalid session id {s:?}; expected 32 lowercase hex characters"
            ));
        }
        let bytes = hex::decode(s).map_err(|e| format!("invalid session id {s:?}: {e}"))?;
        let bytes: [u8; 16] = bytes
            .try_into()
            .map_err(|_| format!("invalid session id {s:?}: must be 16 bytes"))?;
        Ok(Self(bytes))
    }
}

/// A session between two named participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: SessionId,
    /// Display name of the initiating peer.
    pub participant_from: String,
    /// Display name of the responding peer.
    pub participant_to: String,
    pub start_time: DateTime<Utc>,
}

impl Session {
    /// Create a session between two issued identities, binding them by
    /// display name.
    pub fn between(from: &Identity, to: &Identity) -> Result<Self, IssueError> {
        init_session(from.display_name.as_str(), to.display_name.as_str())
    }

    /// `start_time` as RFC 3339 with second precision, e.g.
    /// `2025-01-01T12:00:00Z`.
    pub fn start_time_rfc3339(&self) -> String {
        self.start_time.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Create a session using the operating system's random source.
///
/// # Errors
///
/// Returns [`IssueError::EntropyUnavailable`] if the session id could not be
/// drawn. No session is created in that case.
pub fn init_session(
    participant_from: impl Into<String>,
    participant_to: impl Into<String>,
) -> Result<Session, IssueError> {
    init_session_with(&mut OsEntropy, participant_from, participant_to)
}

/// Create a session drawing its id from `source`.
pub fn init_session_with<S>(
    source: &mut S,
    participant_from: impl Into<String>,
    participant_to: impl Into<String>,
) -> Result<Session, IssueError>
where
    S: EntropySource + ?Sized,
{
    let session_id = SessionId(source.id_bytes()?);
    let session = Session {
        session_id,
        participant_from: participant_from.into(),
        participant_to: participant_to.into(),
        start_time: Utc::now(),
    };
    tracing::debug!(
        session_id = %session.session_id,
        from = %session.participant_from,
        to = %session.participant_to,
        "session created"
    );
    Ok(session)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
