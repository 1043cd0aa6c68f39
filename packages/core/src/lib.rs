//! AI-TCP: a toy session protocol between two AI participants.
//!
//! This crate issues participant identities, allocates random session
//! identifiers and drives a simulated handshake that reports each step as
//! an event. It has **no I/O** beyond `tracing`: no networking, no
//! persistence, no async runtime. The cryptography is placeholder only:
//! public keys are a fixed string and signatures are an unkeyed digest.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`identity`] | [`Identity`], [`create_identity`], [`sign_payload`] |
//! | [`session`] | [`Session`], [`SessionId`], [`init_session`] |
//! | [`handshake`] | [`HandshakeState`], [`HandshakeEvent`], [`simulate_connection`] |
//! | [`entropy`] | The [`EntropySource`] seam every identifier is drawn from |
//! | [`error`] | [`IssueError`] |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use aitcp_core::{create_identity, simulate_connection, Session, TracingSink};
//!
//! let from = create_identity("gpt-4")?;
//! let to = create_identity("claude-3")?;
//! let session = Session::between(&from, &to)?;
//! simulate_connection(Some(&session), &mut TracingSink);
//! ```

pub mod entropy;
pub mod error;
pub mod handshake;
pub mod identity;
pub mod session;

pub use entropy::{EntropyError, EntropySource, OsEntropy};
pub use error::IssueError;
pub use handshake::{
    simulate_connection, HandshakeEvent, HandshakeSink, HandshakeState, TracingSink,
};
pub use identity::{
    create_identity, create_identity_with, sign_payload, Identity, SIMULATED_PUBLIC_KEY,
};
pub use session::{init_session, init_session_with, Session, SessionId};
