//! Simulated two-message handshake over an established [`Session`].
//!
//! The handshake is a fixed linear walk through four states:
//!
//! ```text
//! Init ──► HandshakeInitiated ──► HandshakeAcknowledged ──► Established
//! ```
//!
//! No messages are exchanged; each transition only emits a
//! [`HandshakeEvent`] to a [`HandshakeSink`]. Every transition is
//! unconditional, so a run that starts always reaches `Established`.
//! A transport-backed version would need timeouts, rejection and retry at
//! the two middle steps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::{Session, SessionId};

/// Prefix on every handshake log line.
pub const LOG_TAG: &str = "[AI-TCP]";

/// The four states of the simulated handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeState {
    Init,
    HandshakeInitiated,
    HandshakeAcknowledged,
    /// Terminal.
    Established,
}

impl HandshakeState {
    /// The following state, or `None` once `Established` is reached.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Init => Some(Self::HandshakeInitiated),
            Self::HandshakeInitiated => Some(Self::HandshakeAcknowledged),
            Self::HandshakeAcknowledged => Some(Self::Established),
            Self::Established => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// The event emitted on entering this state for `session`.
    pub fn event(self, session: &Session) -> HandshakeEvent {
        let session_id = session.session_id;
        match self {
            Self::Init => HandshakeEvent::Initialized {
                session_id,
                from: session.participant_from.clone(),
                to: session.participant_to.clone(),
                start_time: session.start_time_rfc3339(),
            },
            Self::HandshakeInitiated => HandshakeEvent::Initiated {
                session_id,
                from: session.participant_from.clone(),
                to: session.participant_to.clone(),
            },
            // The responder speaks, so the direction flips.
            Self::HandshakeAcknowledged => HandshakeEvent::Acknowledged {
                session_id,
                from: session.participant_to.clone(),
                to: session.participant_from.clone(),
            },
            Self::Established => HandshakeEvent::Established {
                session_id,
                from: session.participant_from.clone(),
                to: session.participant_to.clone(),
            },
        }
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::HandshakeInitiated => write!(f, "handshake_initiated"),
            Self::HandshakeAcknowledged => write!(f, "handshake_acknowledged"),
            Self::Established => write!(f, "established"),
        }
    }
}

/// Something observable that happened during [`simulate_connection`].
///
/// `Display` renders the human-readable log line. Every event except the
/// diagnostic carries the session id and both peer names; `from` and `to`
/// follow the direction of the step, so they flip on `Acknowledged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HandshakeEvent {
    /// The driver was called without a session. Recovered locally.
    MissingSession,
    Initialized {
        session_id: SessionId,
        from: String,
        to: String,
        start_time: String,
    },
    Initiated {
        session_id: SessionId,
        from: String,
        to: String,
    },
    Acknowledged {
        session_id: SessionId,
        from: String,
        to: String,
    },
    Established {
        session_id: SessionId,
        from: String,
        to: String,
    },
}

impl HandshakeEvent {
    /// The session this event belongs to; `None` only for the diagnostic.
    pub fn session_id(&self) -> Option<SessionId> {
        match self {
            Self::MissingSession => None,
            Self::Initialized { session_id, .. }
            | Self::Initiated { session_id, .. }
            | Self::Acknowledged { session_id, .. }
            | Self::Established { session_id, .. } => Some(*session_id),
        }
    }

    /// `(from, to)` for this step; `None` for the diagnostic.
    pub fn peers(&self) -> Option<(&str, &str)> {
        match self {
            Self::MissingSession => None,
            Self::Initialized { from, to, .. }
            | Self::Initiated { from, to, .. }
            | Self::Acknowledged { from, to, .. }
            | Self::Established { from, to, .. } => Some((from.as_str(), to.as_str())),
        }
    }

    /// The state entered when this event fires; `None` for the diagnostic.
    pub fn state(&self) -> Option<HandshakeState> {
        match self {
            Self::MissingSession => None,
            Self::Initialized { .. } => Some(HandshakeState::Init),
            Self::Initiated { .. } => Some(HandshakeState::HandshakeInitiated),
            Self::Acknowledged { .. } => Some(HandshakeState::HandshakeAcknowledged),
            Self::Established { .. } => Some(HandshakeState::Established),
        }
    }
}

impl fmt::Display for HandshakeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSession => write!(f, "no session provided"),
            Self::Initialized {
                session_id,
                start_time,
                ..
            } => write!(f, "{LOG_TAG} Session {session_id} initialized at {start_time}"),
            Self::Initiated { from, to, .. } => {
                write!(f, "{LOG_TAG} {from} -> {to}: initiating secure handshake")
            }
            Self::Acknowledged { from, to, .. } => {
                write!(f, "{LOG_TAG} {from} -> {to}: handshake acknowledged")
            }
            Self::Established { session_id, .. } => {
                write!(f, "{LOG_TAG} Session {session_id} secure channel established")
            }
        }
    }
}

/// Receives handshake events as they happen. Fire-and-forget: a sink has
/// no way to push back on the driver.
pub trait HandshakeSink {
    fn emit(&mut self, event: HandshakeEvent);
}

/// Collects events in order.
impl HandshakeSink for Vec<HandshakeEvent> {
    fn emit(&mut self, event: HandshakeEvent) {
        self.push(event);
    }
}

/// Logs each event through `tracing` with the session id and peer names as
/// structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl HandshakeSink for TracingSink {
    fn emit(&mut self, event: HandshakeEvent) {
        match (event.session_id(), event.peers()) {
            (Some(session_id), Some((from, to))) => {
                tracing::info!(session_id = %session_id, from = %from, to = %to, "{event}")
            }
            _ => tracing::warn!("{event}"),
        }
    }
}

/// Drive the simulated handshake for `session`, reporting to `sink`.
///
/// Emits exactly four events in state order and returns
/// `Some(HandshakeState::Established)`. If `session` is `None`, emits a
/// single [`HandshakeEvent::MissingSession`] and returns `None` without
/// entering any state.
pub fn simulate_connection<K>(session: Option<&Session>, sink: &mut K) -> Option<HandshakeState>
where
    K: HandshakeSink + ?Sized,
{
    let Some(session) = session else {
        sink.emit(HandshakeEvent::MissingSession);
        return None;
    };

    let mut state = HandshakeState::Init;
    loop {
        sink.emit(state.event(session));
        match state.next() {
            Some(next) => state = next,
            None => return Some(state),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
