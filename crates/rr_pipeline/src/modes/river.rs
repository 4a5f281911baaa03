//! Up and down the river: fixed fours per court; after each round neighbouring
//! courts trade their winning teams.

use rr_algo::courts::mark_last_court;
use rr_algo::progression::{exchange_start, fill_lineup, flow_lineup, seed_lineup};
use rr_algo::commit_histories;
use rr_core::{CourtTeams, MatchDecision, Player, RatingParams, SchedRng, SessionState, PLAYERS_PER_COURT};

use super::{split_court, ModeOutput, RoundCtx};
use crate::{Diagnostics, ImpossibleReason};

pub fn generate(
    ctx: &RoundCtx<'_>,
    state: &mut SessionState,
    rng: &mut SchedRng,
) -> Result<ModeOutput, ImpossibleReason> {
    let courts = ctx.court_count;
    let mut river = state.format_state.up_down_river.take().unwrap_or_default();
    let reseed = river.court_lineup.is_empty() || state.last_court_count() != Some(courts);

    if reseed {
        tracing::debug!(courts, "reseeding river lineup");
        river.court_lineup = seed_lineup(ctx.active, courts, rng);
    } else {
        let seated = fill_lineup(&mut river.court_lineup, ctx.active, courts, rng);
        if seated > 0 {
            tracing::debug!(seated, "river vacancies filled");
        }
    }

    let mut matches = Vec::with_capacity(courts as usize);
    let mut repeats = 0;
    for court in 1..=courts {
        let four: Vec<Player> = river
            .court_lineup
            .get(&court)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| ctx.active.iter().find(|p| &p.id == id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        if four.len() != PLAYERS_PER_COURT {
            continue;
        }
        let (m, r) = split_court(&four, court, ctx, state, rng)?;
        mark_last_court(&m, state);
        repeats += r;
        matches.push(m);
    }
    commit_histories(&matches, state);

    river.last_court_teams = matches.iter().map(|m| CourtTeams::from(&m.to_assignment())).collect();
    state.format_state.up_down_river = Some(river);

    Ok(ModeOutput {
        matches,
        diagnostics: Diagnostics {
            repeat_partnerships_used: repeats,
            note: reseed.then(|| "River lineup seeded.".to_string()),
            ..Diagnostics::default()
        },
    })
}

pub fn apply(state: &mut SessionState, decisions: &[MatchDecision], courts: u8, _ratings: &RatingParams) {
    let start = exchange_start(state.round, courts);
    if let Some(river) = state.format_state.up_down_river.as_mut() {
        river.court_lineup = flow_lineup(&river.court_lineup, decisions, courts, start);
    }
}
