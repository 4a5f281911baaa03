//! Free rotation over the whole active roster.

use rr_algo::{assign_courts, commit_histories, make_matches, make_partner_pairs};
use rr_core::{MatchDecision, RatingParams, SchedRng, SessionState};

use super::{ModeOutput, RoundCtx};
use crate::{Diagnostics, ImpossibleReason};

pub fn generate(
    ctx: &RoundCtx<'_>,
    state: &mut SessionState,
    rng: &mut SchedRng,
) -> Result<ModeOutput, ImpossibleReason> {
    let retries = ctx.options.max_retries;

    let partners = make_partner_pairs(ctx.active, state, retries, rng).map_err(|e| {
        tracing::debug!(error = %e, "partner search exhausted");
        ImpossibleReason::PartnerPairs
    })?;
    let matchups = make_matches(&partners.teams, ctx.court_count, state, retries, rng).map_err(|e| {
        tracing::debug!(error = %e, "matchup search exhausted");
        ImpossibleReason::Matches
    })?;

    let placed = assign_courts(matchups.pairings, state, rng);
    commit_histories(&placed.matches, state);

    Ok(ModeOutput {
        matches: placed.matches,
        diagnostics: Diagnostics {
            repeat_partnerships_used: partners.repeat_partnerships_used,
            repeat_matchups_used: matchups.repeat_matchups_used,
            sticky_courts: placed.sticky_remaining,
            note: None,
        },
    })
}

pub fn apply(_state: &mut SessionState, _decisions: &[MatchDecision], _courts: u8, _ratings: &RatingParams) {}
