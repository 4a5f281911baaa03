//! rr_pipeline: round orchestration surface (normalize → byes → mode engine → commit)
//! plus result application. I/O-free; persistence is the caller's concern (see `rr_io`).
//!
//! `generate_round` is transactional: it works on a copy of the prior state and
//! hands the untouched prior back inside `Impossible` when a round cannot be built.

use core::fmt;

use serde::Serialize;

use rr_algo::byes::pick_byes_fair;
use rr_core::{
    capacity_for, clamp_courts, Assignment, EngineOptions, LastRound, MatchDecision, Mode, Player,
    RatingParams, SchedRng, SessionState, DEFAULT_COURTS, PLAYERS_PER_COURT,
};

pub mod modes;
pub mod normalize;

pub use normalize::{normalize_players, PlayerInput, PlayerRecord, RawText};
pub use rr_core::{match_key, pair_key};

// ---------------------------- Request / result types ----------------------------

/// Inputs of one `generate_round` call besides the prior state.
#[derive(Debug, Clone)]
pub struct RoundRequest<'a> {
    pub players: &'a [PlayerInput],
    /// Requested courts; `None` means the default. Clamped to `[1, 6]`.
    pub court_count: Option<u32>,
    /// Mode token; `None` keeps the prior state's mode.
    pub mode: Option<&'a str>,
    pub options: &'a EngineOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub repeat_partnerships_used: u32,
    pub repeat_matchups_used: u32,
    /// Matches left with a player on the same court as last round.
    pub sticky_courts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// One generated round plus the updated state to persist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round: u32,
    pub court_count: u8,
    pub capacity: usize,
    pub players_total: usize,
    pub active_players: Vec<Player>,
    pub bye_players: Vec<Player>,
    pub assignments: Vec<Assignment>,
    pub diagnostics: Diagnostics,
    pub state: SessionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImpossibleReason {
    OddActivePlayers,
    PartnerPairs,
    Matches,
    UnknownMode(String),
    Court(u8),
}

impl fmt::Display for ImpossibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpossibleReason::OddActivePlayers => f.write_str("Odd number of active players"),
            ImpossibleReason::PartnerPairs => f.write_str("Could not build partner pairs"),
            ImpossibleReason::Matches => f.write_str("Could not build matches"),
            ImpossibleReason::UnknownMode(m) => write!(f, "Unknown mode: {m}"),
            ImpossibleReason::Court(c) => write!(f, "Could not pair court {c}"),
        }
    }
}

/// A round that could not be built. `state` is the prior state, unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Impossible {
    pub reason: ImpossibleReason,
    pub state: Box<SessionState>,
}

impl fmt::Display for Impossible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "impossible: {}", self.reason)
    }
}

impl std::error::Error for Impossible {}

// -------------------------------------- Public API --------------------------------------

/// Build the next round.
///
/// Stages: normalize the roster, seed per-player defaults, clamp courts, pick
/// byes, check parity, dispatch to the mode engine, then bump the round
/// counter and snapshot the assignments into `last_round`.
pub fn generate_round(
    req: &RoundRequest<'_>,
    prior: Option<SessionState>,
    rng: &mut SchedRng,
) -> Result<RoundResult, Impossible> {
    let prior = prior.unwrap_or_default();
    let mut state = prior.clone();
    let fail = |reason: ImpossibleReason| {
        tracing::warn!(%reason, "round not generated");
        Impossible { reason, state: Box::new(prior.clone()) }
    };

    let requested_mode = req.mode.map(|tok| tok.parse::<Mode>().map_err(|_| tok.trim().to_string()));

    let players = normalize_players(req.players);
    state.ensure_players(&players, req.options.ratings.default_rating);

    let mut court_count = clamp_courts(req.court_count);
    if req.options.fit_courts_to_roster {
        let fill = (players.len() / PLAYERS_PER_COURT).max(1);
        court_count = court_count.min(fill as u8);
    }
    let capacity = capacity_for(court_count);

    let selection = pick_byes_fair(&players, capacity, &mut state, rng);
    if selection.active.len() % 2 != 0 {
        return Err(fail(ImpossibleReason::OddActivePlayers));
    }

    let mode = match requested_mode {
        Some(Ok(m)) => m,
        Some(Err(token)) => return Err(fail(ImpossibleReason::UnknownMode(token))),
        None => state.mode,
    };
    state.mode = mode;

    let ctx = modes::RoundCtx {
        active: &selection.active,
        court_count,
        options: req.options,
    };
    let engine = modes::engine_for(mode);
    let out = match (engine.generate)(&ctx, &mut state, rng) {
        Ok(out) => out,
        Err(reason) => return Err(fail(reason)),
    };

    let assignments: Vec<Assignment> = out.matches.iter().map(|m| m.to_assignment()).collect();
    state.round += 1;
    state.last_round = Some(LastRound { court_count, assignments: assignments.clone() });

    tracing::info!(
        round = state.round,
        mode = %mode,
        courts = court_count,
        matches = assignments.len(),
        byes = selection.byes.len(),
        "round generated"
    );

    Ok(RoundResult {
        round: state.round,
        court_count,
        capacity,
        players_total: players.len(),
        active_players: selection.active,
        bye_players: selection.byes,
        assignments,
        diagnostics: out.diagnostics,
        state,
    })
}

/// Fold recorded outcomes into the state's mode with default rating parameters.
pub fn apply_results(state: &mut SessionState, decisions: &[MatchDecision]) {
    apply_results_with(state, decisions, &RatingParams::default());
}

/// Fold recorded outcomes into the state's mode. No-op on empty input and in
/// `random` mode. Uses the previous round's court count (6 when unknown).
pub fn apply_results_with(
    state: &mut SessionState,
    decisions: &[MatchDecision],
    ratings: &RatingParams,
) {
    if decisions.is_empty() {
        return;
    }
    let court_count = state.last_court_count().unwrap_or(DEFAULT_COURTS);
    let engine = modes::engine_for(state.mode);
    (engine.apply)(state, decisions, court_count, ratings);
    tracing::debug!(mode = %state.mode, decisions = decisions.len(), "results applied");
}
