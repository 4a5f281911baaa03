//! Loader: read local JSON files (roster, session state, match decisions,
//! engine options) into typed values. No network I/O.
//!
//! Roster and decision files may be a bare array or an object wrapping the
//! array under `players` / `decisions`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use rr_core::{EngineOptions, MatchDecision, SessionState};

use crate::canonical_json::write_canonical_file;
use crate::IoError;

/// Input files above this size are rejected before parsing.
pub const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

fn json_err(path: &Path, e: impl std::fmt::Display) -> IoError {
    IoError::Json { file: path.display().to_string(), msg: e.to_string() }
}

/// Read and parse a JSON file with the size guard.
pub fn read_json_value(path: &Path) -> Result<Value, IoError> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let len = f.metadata()?.len();
    if len > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!("{} is {len} bytes (max {MAX_INPUT_BYTES})", path.display())));
    }
    let mut buf = String::with_capacity(len as usize);
    f.take(MAX_INPUT_BYTES).read_to_string(&mut buf)?;
    serde_json::from_str(&buf).map_err(|e| json_err(path, e))
}

/// Parse a JSON file into `T`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, IoError> {
    let v = read_json_value(path)?;
    serde_json::from_value(v).map_err(|e| json_err(path, e))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListOrWrapped<T> {
    List(Vec<T>),
    Wrapped(Wrapped<T>),
}

#[derive(Deserialize)]
struct Wrapped<T> {
    #[serde(alias = "players", alias = "decisions")]
    items: Vec<T>,
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IoError> {
    match load_json::<ListOrWrapped<T>>(path)? {
        ListOrWrapped::List(v) => Ok(v),
        ListOrWrapped::Wrapped(w) => Ok(w.items),
    }
}

/// Roster entries (any shape `T` accepts, e.g. `rr_pipeline::PlayerInput`).
pub fn load_roster<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IoError> {
    let roster = load_list(path)?;
    tracing::debug!(path = %path.display(), entries = roster.len(), "roster loaded");
    Ok(roster)
}

/// Recorded outcomes for the last round.
pub fn load_decisions(path: &Path) -> Result<Vec<MatchDecision>, IoError> {
    load_list(path)
}

/// Session state, or `None` when the file does not exist yet.
pub fn load_state_opt(path: &Path) -> Result<Option<SessionState>, IoError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file; starting fresh");
        return Ok(None);
    }
    load_json(path).map(Some)
}

/// Persist the session state as canonical JSON.
pub fn save_state(path: &Path, state: &SessionState) -> Result<(), IoError> {
    write_canonical_file(path, state)
}

/// Engine options with domain validation.
pub fn load_options(path: &Path) -> Result<EngineOptions, IoError> {
    let opts: EngineOptions = load_json(path)?;
    opts.validate_domains().map_err(|e| IoError::Invalid(format!("{}: {e}", path.display())))?;
    Ok(opts)
}
