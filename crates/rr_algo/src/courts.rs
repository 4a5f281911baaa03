//! Court placement: random match-to-court order with a single-swap pass that
//! moves players off the court they used last round, plus the seeding buckets
//! the ladder and rating modes share.

use rr_core::{CourtMatch, Pairing, SchedRng, SessionState, PLAYERS_PER_COURT};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CourtAssignment {
    /// One match per court, courts `1..=K` in order.
    pub matches: Vec<CourtMatch>,
    /// Matches still holding a player on their previous court.
    pub sticky_remaining: u32,
}

fn is_sticky(p: &Pairing, court: u8, state: &SessionState) -> bool {
    p.players().any(|pl| state.last_court_of(&pl.id) == court)
}

/// Shuffle pairings onto courts `1..=K`, reduce sticky placements, then
/// record every player's new court in `last_court`. Never fails.
///
/// For each court in order, if one of its players sat on that court last
/// round, the first later court whose swap leaves neither court sticky is
/// swapped in. At most one swap per court.
pub fn assign_courts(
    pairings: Vec<Pairing>,
    state: &mut SessionState,
    rng: &mut SchedRng,
) -> CourtAssignment {
    let mut slots = pairings;
    rng.shuffle_in_place(&mut slots);

    for i in 0..slots.len() {
        let court_i = court_number(i);
        if !is_sticky(&slots[i], court_i, state) {
            continue;
        }
        let swap_with = ((i + 1)..slots.len()).find(|&j| {
            let court_j = court_number(j);
            !is_sticky(&slots[i], court_j, state) && !is_sticky(&slots[j], court_i, state)
        });
        if let Some(j) = swap_with {
            slots.swap(i, j);
        }
    }

    let sticky_remaining = slots
        .iter()
        .enumerate()
        .filter(|(i, p)| is_sticky(p, court_number(*i), state))
        .count() as u32;

    let matches: Vec<CourtMatch> = slots
        .into_iter()
        .enumerate()
        .map(|(i, pairing)| CourtMatch { court: court_number(i), pairing })
        .collect();
    for m in &matches {
        mark_last_court(m, state);
    }

    tracing::trace!(courts = matches.len(), sticky_remaining, "courts assigned");
    CourtAssignment { matches, sticky_remaining }
}

/// Record `m.court` as the last court of its four players.
pub fn mark_last_court(m: &CourtMatch, state: &mut SessionState) {
    for p in m.pairing.players() {
        state.last_court.insert(p.id.clone(), m.court);
    }
}

#[inline]
fn court_number(idx: usize) -> u8 {
    (idx + 1) as u8
}

/// Split an ordered roster into consecutive groups of four, one per court,
/// starting at court 1. Only complete groups on courts `1..=courts` are
/// returned; anyone past them is left unplaced.
pub fn bucket_into_courts<T: Clone>(ordered: &[T], courts: u8) -> Vec<(u8, Vec<T>)> {
    ordered
        .chunks(PLAYERS_PER_COURT)
        .take(courts as usize)
        .enumerate()
        .filter(|(_, group)| group.len() == PLAYERS_PER_COURT)
        .map(|(i, group)| (court_number(i), group.to_vec()))
        .collect()
}
