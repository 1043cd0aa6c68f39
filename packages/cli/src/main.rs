//! `aitcp`: command-line driver for the AI-TCP toy session protocol.
//!
//! - **`identity`**: issue an identity and print it as JSON.
//! - **`sign`**: print the simulated signature of a payload.
//! - **`session`**: open a session between two names and run the handshake.
//! - **`demo`**: the whole flow: two identities, a signed hello, a session.
//!
//! Handshake steps are written as log lines on stderr; JSON goes to stdout.
//! See [`config::CliConfig`] for the environment variables that control
//! logging.

mod config;

use std::process;

use aitcp_core::{
    create_identity, init_session, sign_payload, simulate_connection, HandshakeEvent, Identity,
    Session, TracingSink, SIMULATED_PUBLIC_KEY,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use config::{CliConfig, LogFormat};

/// aitcp: simulated AI-to-AI session protocol
///
/// Issue participant identities and run a mock handshake between them.
#[derive(Parser)]
#[command(name = "aitcp", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue a new participant identity and print it as JSON.
    Identity {
        /// Display name of the participant, e.g. `gpt-4`.
        name: String,
    },

    /// Print the simulated signature of PAYLOAD.
    ///
    /// The signature is hex(sha256(id ++ payload)). It is NOT a real
    /// signature and cannot be verified. Without --id the result is empty.
    Sign {
        /// Identity id (UUID) to sign as.
        #[arg(long, value_name = "UUID")]
        id: Option<Uuid>,

        /// The payload to sign.
        payload: String,
    },

    /// Open a session between FROM and TO and run the simulated handshake.
    Session {
        /// Display name of the initiating participant.
        from: String,

        /// Display name of the responding participant.
        to: String,

        /// Print the session and its handshake events as JSON instead of
        /// logging them.
        #[arg(long)]
        json: bool,
    },

    /// Issue two identities, sign a hello and run a session between them.
    Demo {
        #[arg(default_value = "gpt-4")]
        from: String,

        #[arg(default_value = "claude-3")]
        to: String,
    },
}

/// JSON body printed by `session --json`.
#[derive(Serialize)]
struct SessionReport<'a> {
    session: &'a Session,
    events: Vec<HandshakeEvent>,
}

fn main() {
    let cli = Cli::parse();

    let config = CliConfig::from_env().unwrap_or_else(|e| fatal(&e.to_string()));
    init_tracing(&config);

    match cli.command {
        Command::Identity { name } => {
            let identity = issue(&name);
            print_json(&identity);
        }

        Command::Sign { id, payload } => {
            // Only the id feeds the digest; name and key are cosmetic here.
            let identity = id.map(|id| Identity {
                id,
                display_name: String::new(),
                public_key: SIMULATED_PUBLIC_KEY.to_string(),
            });
            println!("{}", sign_payload(identity.as_ref(), &payload));
        }

        Command::Session { from, to, json } => {
            let session = init_session(from, to)
                .unwrap_or_else(|e| fatal(&format!("failed to open session: {e}")));
            if json {
                let mut events: Vec<HandshakeEvent> = Vec::new();
                simulate_connection(Some(&session), &mut events);
                print_json(&SessionReport {
                    session: &session,
                    events,
                });
            } else {
                simulate_connection(Some(&session), &mut TracingSink);
            }
        }

        Command::Demo { from, to } => {
            let from = issue(&from);
            let to = issue(&to);
            tracing::info!("issued {from}");
            tracing::info!("issued {to}");

            let hello = format!("hello from {}", from.display_name);
            tracing::info!(
                signature = %sign_payload(Some(&from), &hello),
                "signed {hello:?} (simulated)"
            );

            let session = Session::between(&from, &to)
                .unwrap_or_else(|e| fatal(&format!("failed to open session: {e}")));
            simulate_connection(Some(&session), &mut TracingSink);
        }
    }
}

/// Install the stderr `tracing` subscriber described by `config`.
fn init_tracing(config: &CliConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|e| fatal(&format!("invalid log filter {:?}: {e}", config.log_filter)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Issue an identity or abort: continuing without a random id is unsafe.
fn issue(name: &str) -> Identity {
    create_identity(name).unwrap_or_else(|e| fatal(&format!("failed to issue identity: {e}")))
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => fatal(&format!("failed to serialise output: {e}")),
    }
}

/// Print an error message to stderr and exit with code 2.
fn fatal(msg: &str) -> ! {
    eprintln!("aitcp: {msg}");
    process::exit(2);
}
