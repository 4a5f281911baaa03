//! Fair bye selection: sit out the players with the fewest byes so far.
//!
//! Sorting by `(bye_count, random tiebreak)` and taking the lowest entries
//! means nobody takes a second bye while any active player has none, and the
//! same holds at every count level.

use rr_core::{Player, SchedRng, SessionState};

/// Output of [`pick_byes_fair`]. Both lists keep the caller's roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByeSelection {
    pub active: Vec<Player>,
    pub byes: Vec<Player>,
}

/// Choose `players.len() - capacity` players to sit out (none if the roster fits).
///
/// Increments `bye_counts` for every selected player immediately.
pub fn pick_byes_fair(
    players: &[Player],
    capacity: usize,
    state: &mut SessionState,
    rng: &mut SchedRng,
) -> ByeSelection {
    if players.len() <= capacity {
        return ByeSelection { active: players.to_vec(), byes: Vec::new() };
    }
    let byes_needed = players.len() - capacity;

    let mut order: Vec<(u32, u64, usize)> = players
        .iter()
        .enumerate()
        .map(|(idx, p)| (state.bye_count(&p.id), rng.tiebreak(), idx))
        .collect();
    order.sort_unstable();

    let mut sits_out = vec![false; players.len()];
    for &(_, _, idx) in order.iter().take(byes_needed) {
        sits_out[idx] = true;
    }

    let mut sel = ByeSelection::default();
    for (p, out) in players.iter().zip(sits_out) {
        if out {
            *state.bye_counts.entry(p.id.clone()).or_insert(0) += 1;
            sel.byes.push(p.clone());
        } else {
            sel.active.push(p.clone());
        }
    }
    tracing::trace!(byes = sel.byes.len(), active = sel.active.len(), "byes selected");
    sel
}
