//! Partner search: players → two-person teams, avoiding repeat partnerships.

use rr_core::{pair_key, Player, SchedRng, SessionState, Team};

use super::search::{best_greedy_pairing, PairingError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartnerPairs {
    pub teams: Vec<Team>,
    pub repeat_partnerships_used: u32,
}

/// Pair an even-length roster into teams. Reads `partner_history` only.
pub fn make_partner_pairs(
    players: &[Player],
    state: &SessionState,
    max_retries: u32,
    rng: &mut SchedRng,
) -> Result<PartnerPairs, PairingError> {
    let used = |a: &Player, b: &Player| state.partner_count(&pair_key(&a.id, &b.id));
    let out = best_greedy_pairing(players, used, max_retries, rng)?;
    Ok(PartnerPairs {
        teams: out.pairs.into_iter().map(|(a, b)| Team::new(a, b)).collect(),
        repeat_partnerships_used: out.repeats,
    })
}
