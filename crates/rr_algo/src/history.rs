//! History commit for a finalized round.

use rr_core::{CourtMatch, SessionState};

/// Count both partnerships of every match, plus the matchup when the pairing
/// carries a key. Repeats are counted too.
pub fn commit_histories(matches: &[CourtMatch], state: &mut SessionState) {
    for m in matches {
        for team in [&m.pairing.team1, &m.pairing.team2] {
            *state.partner_history.entry(team.key()).or_insert(0) += 1;
        }
        if let Some(mk) = &m.pairing.match_key {
            *state.match_history.entry(mk.clone()).or_insert(0) += 1;
        }
    }
}
