//! Throne: players climb or drop one court per round by their own result.

use rr_algo::courts::{bucket_into_courts, mark_last_court};
use rr_algo::progression::{apply_throne_results, order_by_rank, seed_ranks, unranked};
use rr_algo::commit_histories;
use rr_core::{CourtTeams, MatchDecision, RatingParams, SchedRng, SessionState};

use super::{split_court, ModeOutput, RoundCtx};
use crate::{Diagnostics, ImpossibleReason};

pub fn generate(
    ctx: &RoundCtx<'_>,
    state: &mut SessionState,
    rng: &mut SchedRng,
) -> Result<ModeOutput, ImpossibleReason> {
    let courts = ctx.court_count;
    let stale = state.format_state.throne.is_none() || state.last_court_count() != Some(courts);
    let mut throne = state.format_state.throne.take().unwrap_or_default();

    for p in ctx.active {
        throne.court_ranks.entry(p.id.clone()).or_insert_with(|| unranked(courts));
    }
    // A table that still ranks absent players is kept.
    let reseed = stale && throne.court_ranks.len() <= ctx.active.len();
    if reseed {
        tracing::debug!(courts, "reseeding throne ranks");
        seed_ranks(ctx.active, courts, &mut throne.court_ranks, rng);
    }

    let ordered = order_by_rank(ctx.active, courts, &throne.court_ranks, rng);
    let mut matches = Vec::with_capacity(courts as usize);
    let mut repeats = 0;
    for (court, group) in bucket_into_courts(&ordered, courts) {
        let four = rng.shuffled(&group);
        let (m, r) = split_court(&four, court, ctx, state, rng)?;
        mark_last_court(&m, state);
        repeats += r;
        matches.push(m);
    }
    commit_histories(&matches, state);

    throne.last_court_teams = matches.iter().map(|m| CourtTeams::from(&m.to_assignment())).collect();
    state.format_state.throne = Some(throne);

    Ok(ModeOutput {
        matches,
        diagnostics: Diagnostics {
            repeat_partnerships_used: repeats,
            note: match (stale, reseed) {
                (true, true) => Some("No results for prior round; ranks reseeded.".to_string()),
                (true, false) => Some("No results for prior round; ranks unchanged.".to_string()),
                _ => None,
            },
            ..Diagnostics::default()
        },
    })
}

pub fn apply(state: &mut SessionState, decisions: &[MatchDecision], courts: u8, _ratings: &RatingParams) {
    if let Some(throne) = state.format_state.throne.as_mut() {
        apply_throne_results(&mut throne.court_ranks, decisions, courts);
    }
}
