//! Rating-seeded modes (gauntlet, cream): courts filled from the highest
//! rating down, each four split into the most even pair of teams. The two
//! modes differ only in how results move ratings.

use rr_algo::courts::{bucket_into_courts, mark_last_court};
use rr_algo::progression::{apply_cream_results, apply_flat_results, order_by_rating};
use rr_algo::{balanced_split, commit_histories};
use rr_core::{CourtMatch, MatchDecision, Pairing, Player, RatingParams, SchedRng, SessionState};

use super::{ModeOutput, RoundCtx};
use crate::{Diagnostics, ImpossibleReason};

pub fn generate(
    ctx: &RoundCtx<'_>,
    state: &mut SessionState,
    rng: &mut SchedRng,
) -> Result<ModeOutput, ImpossibleReason> {
    let default_rating = ctx.options.ratings.default_rating;
    let ordered = order_by_rating(ctx.active, &state.ratings, default_rating, rng);

    let mut matches = Vec::with_capacity(ctx.court_count as usize);
    let mut repeats = 0;
    for (court, group) in bucket_into_courts(&ordered, ctx.court_count) {
        let Ok(four) = <[Player; 4]>::try_from(group) else {
            continue;
        };
        let (team1, team2, diff) = balanced_split(&four, |id| state.rating_of(id, default_rating));
        tracing::trace!(court, diff, "balanced split");
        repeats += [&team1, &team2]
            .iter()
            .filter(|t| state.partner_count(&t.key()) > 0)
            .count() as u32;
        let m = CourtMatch { court, pairing: Pairing::untracked(team1, team2) };
        mark_last_court(&m, state);
        matches.push(m);
    }
    commit_histories(&matches, state);

    Ok(ModeOutput {
        matches,
        diagnostics: Diagnostics { repeat_partnerships_used: repeats, ..Diagnostics::default() },
    })
}

pub fn apply_gauntlet(
    state: &mut SessionState,
    decisions: &[MatchDecision],
    _courts: u8,
    ratings: &RatingParams,
) {
    apply_flat_results(&mut state.ratings, decisions, ratings);
}

pub fn apply_cream(
    state: &mut SessionState,
    decisions: &[MatchDecision],
    courts: u8,
    ratings: &RatingParams,
) {
    apply_cream_results(&mut state.ratings, decisions, courts, ratings);
}
