//! Matchup search: teams → matches, avoiding repeat team-vs-team pairings.

use rr_core::{match_key, Pairing, SchedRng, SessionState, Team};

use super::search::{best_greedy_pairing, PairingError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matchups {
    /// At most `courts` tracked pairings.
    pub pairings: Vec<Pairing>,
    /// Repeats across every match the winning attempt formed, before trimming.
    pub repeat_matchups_used: u32,
}

/// Pair teams into matches and keep the first `courts` of them.
/// Reads `match_history` only.
pub fn make_matches(
    teams: &[Team],
    courts: u8,
    state: &SessionState,
    max_retries: u32,
    rng: &mut SchedRng,
) -> Result<Matchups, PairingError> {
    let used = |x: &Team, y: &Team| state.match_count(&match_key(&x.key(), &y.key()));
    let out = best_greedy_pairing(teams, used, max_retries, rng)?;
    let pairings = out
        .pairs
        .into_iter()
        .take(courts as usize)
        .map(|(t1, t2)| Pairing::tracked(t1, t2))
        .collect();
    Ok(Matchups { pairings, repeat_matchups_used: out.repeats })
}
