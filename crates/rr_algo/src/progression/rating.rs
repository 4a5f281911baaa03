//! Rating progression for the seeded modes.

use std::collections::BTreeMap;

use rr_core::{MatchDecision, Player, PlayerId, RatingParams, SchedRng};

/// Active players by rating, highest first, random tiebreak.
pub fn order_by_rating(
    active: &[Player],
    ratings: &BTreeMap<PlayerId, i32>,
    default_rating: i32,
    rng: &mut SchedRng,
) -> Vec<Player> {
    let mut keyed: Vec<(i32, u64, &Player)> = active
        .iter()
        .map(|p| (ratings.get(&p.id).copied().unwrap_or(default_rating), rng.tiebreak(), p))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    keyed.into_iter().map(|(_, _, p)| p.clone()).collect()
}

fn adjust(
    ratings: &mut BTreeMap<PlayerId, i32>,
    d: &MatchDecision,
    win_step: i32,
    loss_step: i32,
    params: &RatingParams,
) {
    let (winners, losers) = d.split();
    for id in winners {
        let r = ratings.entry(id.clone()).or_insert(params.default_rating);
        *r = r.saturating_add(win_step);
    }
    for id in losers {
        let r = ratings.entry(id.clone()).or_insert(params.default_rating);
        *r = r.saturating_sub(loss_step).max(params.rating_floor);
    }
}

/// Gauntlet: winners `+flat_step`, losers `-flat_step` (floored).
pub fn apply_flat_results(
    ratings: &mut BTreeMap<PlayerId, i32>,
    decisions: &[MatchDecision],
    params: &RatingParams,
) {
    for d in decisions {
        adjust(ratings, d, params.flat_step, params.flat_step, params);
    }
}

/// Cream: step sizes depend on the court the match was played on.
pub fn apply_cream_results(
    ratings: &mut BTreeMap<PlayerId, i32>,
    decisions: &[MatchDecision],
    court_count: u8,
    params: &RatingParams,
) {
    for d in decisions {
        let (win, loss) = params.cream.steps_for(d.court, court_count);
        adjust(ratings, d, win, loss, params);
    }
}
