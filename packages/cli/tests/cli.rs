//! Drives the built `aitcp` binary and checks its stdout, stderr and exit
//! code for each subcommand.

use std::process::{Command, Output};

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Run `aitcp` with `args` and a clean logging environment plus `envs`.
fn aitcp(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aitcp"));
    cmd.args(args)
        .env_remove("RUST_LOG")
        .env_remove("AITCP_LOG")
        .env_remove("AITCP_LOG_FORMAT");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run aitcp")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn identity_prints_v4_json() {
    let out = aitcp(&["identity", "gpt-4"], &[]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let json: Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["display_name"], "gpt-4");
    assert_eq!(json["public_key"], "GPT_SIMULATED_PUBKEY");

    let id = json["id"].as_str().unwrap();
    assert_eq!(id.len(), 36);
    assert_eq!(&id[14..15], "4");
    assert!(matches!(&id[19..20], "8" | "9" | "a" | "b"), "got: {id}");
}

#[test]
fn sign_without_id_prints_empty_line_and_warns() {
    let out = aitcp(&["sign", "x"], &[]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "\n");

    let err = stderr(&out);
    assert!(err.contains("WARN"), "stderr: {err}");
    assert!(err.contains("without an identity"), "stderr: {err}");
}

#[test]
fn sign_with_id_matches_digest_of_id_and_payload() {
    let id = "00000000-0000-4000-8000-000000000000";
    let out = aitcp(&["sign", "--id", id, "x"], &[]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let expected = hex::encode(Sha256::digest(format!("{id}x").as_bytes()));
    assert_eq!(stdout(&out).trim_end(), expected);
}

#[test]
fn sign_rejects_malformed_id() {
    let out = aitcp(&["sign", "--id", "not-a-uuid", "x"], &[]);
    assert_ne!(out.status.code(), Some(0));
    assert!(stdout(&out).is_empty());
}

#[test]
fn session_json_lists_four_events_in_order() {
    let out = aitcp(&["session", "a", "b", "--json"], &[]);
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));

    let json: Value = serde_json::from_str(&stdout(&out)).unwrap();
    let session_id = json["session"]["session_id"].as_str().unwrap();
    assert_eq!(session_id.len(), 32);
    assert_eq!(json["session"]["participant_from"], "a");
    assert_eq!(json["session"]["participant_to"], "b");

    let events = json["events"].as_array().unwrap();
    let tags: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
    assert_eq!(tags, ["initialized", "initiated", "acknowledged", "established"]);
    assert!(events.iter().all(|e| e["session_id"] == session_id));
    assert_eq!(events[2]["from"], "b");
    assert_eq!(events[2]["to"], "a");
}

#[test]
fn session_logs_handshake_to_stderr() {
    let out = aitcp(&["session", "gpt-4", "claude-3"], &[]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).is_empty());

    let err = stderr(&out);
    assert!(err.contains("gpt-4 -> claude-3: initiating secure handshake"), "stderr: {err}");
    assert!(err.contains("claude-3 -> gpt-4: handshake acknowledged"), "stderr: {err}");
    assert!(err.contains("secure channel established"), "stderr: {err}");
}

#[test]
fn demo_runs_full_flow() {
    let out = aitcp(&["demo"], &[]);
    assert_eq!(out.status.code(), Some(0));

    let err = stderr(&out);
    assert!(err.contains("issued gpt-4"), "stderr: {err}");
    assert!(err.contains("(simulated)"), "stderr: {err}");
    assert!(err.contains("secure channel established"), "stderr: {err}");
}

#[test]
fn bad_log_format_is_fatal() {
    let out = aitcp(&["demo"], &[("AITCP_LOG_FORMAT", "xml")]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stdout(&out).is_empty());

    let err = stderr(&out);
    assert!(err.starts_with("aitcp: "), "stderr: {err}");
    assert!(err.contains("\"xml\""), "stderr: {err}");
}

#[test]
fn bad_log_filter_is_fatal() {
    let out = aitcp(&["demo"], &[("AITCP_LOG", "aitcp=notalevel")]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).starts_with("aitcp: invalid log filter"));
}
