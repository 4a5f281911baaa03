//! Mode engines. The set is closed, so dispatch is a static table of
//! `(generate, apply)` function pairs indexed by `Mode`.

use rr_core::{
    CourtMatch, EngineOptions, MatchDecision, Mode, Pairing, Player, RatingParams, SchedRng,
    SessionState,
};

use crate::{Diagnostics, ImpossibleReason};

pub mod random;
pub mod river;
pub mod seeded;
pub mod throne;

/// Per-call inputs shared by every mode.
#[derive(Debug, Clone, Copy)]
pub struct RoundCtx<'a> {
    /// Post-bye roster, even length.
    pub active: &'a [Player],
    pub court_count: u8,
    pub options: &'a EngineOptions,
}

/// Matches placed on courts, with history already committed.
#[derive(Debug, Clone, Default)]
pub struct ModeOutput {
    pub matches: Vec<CourtMatch>,
    pub diagnostics: Diagnostics,
}

pub type GenerateFn =
    fn(&RoundCtx<'_>, &mut SessionState, &mut SchedRng) -> Result<ModeOutput, ImpossibleReason>;

/// `(state, decisions, court_count, rating params)`.
pub type ApplyFn = fn(&mut SessionState, &[MatchDecision], u8, &RatingParams);

pub struct ModeEngine {
    pub mode: Mode,
    pub generate: GenerateFn,
    pub apply: ApplyFn,
}

pub static MODE_TABLE: [ModeEngine; 5] = [
    ModeEngine { mode: Mode::Random, generate: random::generate, apply: random::apply },
    ModeEngine { mode: Mode::Throne, generate: throne::generate, apply: throne::apply },
    ModeEngine { mode: Mode::UpDownRiver, generate: river::generate, apply: river::apply },
    ModeEngine { mode: Mode::Gauntlet, generate: seeded::generate, apply: seeded::apply_gauntlet },
    ModeEngine { mode: Mode::Cream, generate: seeded::generate, apply: seeded::apply_cream },
];

/// Split one court's four players into two untracked teams with the partner
/// search. Returns the match and whether its partnerships were repeats.
pub(crate) fn split_court(
    four: &[Player],
    court: u8,
    ctx: &RoundCtx<'_>,
    state: &SessionState,
    rng: &mut SchedRng,
) -> Result<(CourtMatch, u32), ImpossibleReason> {
    let pairs = rr_algo::make_partner_pairs(four, state, ctx.options.max_retries, rng)
        .map_err(|_| ImpossibleReason::Court(court))?;
    let mut teams = pairs.teams.into_iter();
    let (Some(team1), Some(team2)) = (teams.next(), teams.next()) else {
        return Err(ImpossibleReason::Court(court));
    };
    let pairing = Pairing::untracked(team1, team2);
    Ok((CourtMatch { court, pairing }, pairs.repeat_partnerships_used))
}

pub fn engine_for(mode: Mode) -> &'static ModeEngine {
    let idx = match mode {
        Mode::Random => 0,
        Mode::Throne => 1,
        Mode::UpDownRiver => 2,
        Mode::Gauntlet => 3,
        Mode::Cream => 4,
    };
    &MODE_TABLE[idx]
}
