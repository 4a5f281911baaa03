//! crates/rr_io/src/lib.rs
//! Persistence boundary. The engine never touches disk; this crate reads the
//! caller's JSON files and writes updated state back atomically.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for rr_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, read, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON parse/shape errors with the offending file.
    #[error("json error in {file}: {msg}")]
    Json { file: String, msg: String },

    /// Input exceeds the size guard.
    #[error("limit exceeded: {0}")]
    Limit(String),

    /// Parsed fine but violates a domain rule.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        IoError::Json { file: "<memory>".to_string(), msg: e.to_string() }
    }
}

pub mod canonical_json;
pub mod loader;

pub mod prelude {
    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::loader::{load_decisions, load_options, load_roster, load_state_opt, save_state};
    pub use crate::{IoError, IoResult};
}
