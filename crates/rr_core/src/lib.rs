//! rr_core: Core types, canonical keys, session state, options, and seeded RNG.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`rr_algo`, `rr_pipeline`, `rr_io`, `rr_cli`).
//!
//! - Identity: `PlayerId`, `Player`
//! - Canonical history keys: `pair_key`, `match_key` (order-independent)
//! - Round shapes: `Team`, `Pairing`, `CourtMatch`, `Assignment`, `MatchDecision`
//! - Cross-round memory: `SessionState` (+ per-mode `FormatState`)
//! - Config domain: `Mode`, `EngineOptions`, `RatingParams`
//! - Seedable RNG (ChaCha20) threaded explicitly through every random choice
//!
//! Serialization derives are gated behind the `serde` feature (on by default).

#![forbid(unsafe_code)]

pub mod entities;
pub mod ids;
pub mod rng;
pub mod state;
pub mod variables;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// A player id was empty after trimming.
        EmptyId,
        /// A mode token did not name a registered mode.
        UnknownMode(String),
        /// A winner flag other than 1 or 2.
        InvalidWinner(u8),
        /// A numeric option outside its domain.
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::EmptyId => write!(f, "empty player id"),
                CoreError::UnknownMode(m) => write!(f, "unknown mode: {m}"),
                CoreError::InvalidWinner(w) => write!(f, "winner team must be 1 or 2, got {w}"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use entities::{Assignment, CourtMatch, MatchDecision, Pairing, Player, Team, WinnerTeam};
pub use errors::CoreError;
pub use ids::{match_key, pair_key, MatchKey, PairKey, PlayerId, TeamKey};
pub use rng::SchedRng;
pub use state::{CourtTeams, FormatState, LastRound, RiverState, SessionState, ThroneState};
pub use variables::{
    capacity_for, clamp_courts, CreamTable, EngineOptions, Mode, RatingParams, DEFAULT_COURTS,
    MAX_COURTS, MIN_COURTS, PLAYERS_PER_COURT,
};
