//! Throne ladder: per-player court rank, 1 = top court.
//!
//! Ranks move one court per round: winners up (never above 1), losers down
//! (never below the last court). Players with no rank sort after everyone
//! ranked, at `courts + 1`.

use std::collections::BTreeMap;

use rr_core::{MatchDecision, Player, PlayerId, SchedRng, PLAYERS_PER_COURT};

/// Rank given to a player the ladder has not placed yet.
#[inline]
pub fn unranked(courts: u8) -> u8 {
    courts.saturating_add(1)
}

/// Random reseed: shuffle the active roster into groups of four, group `g`
/// ranked `min(courts, g + 1)`. Ranks of absent players are left alone.
pub fn seed_ranks(
    active: &[Player],
    courts: u8,
    ranks: &mut BTreeMap<PlayerId, u8>,
    rng: &mut SchedRng,
) {
    for (i, p) in rng.shuffled(active).iter().enumerate() {
        let group = (i / PLAYERS_PER_COURT + 1).min(courts as usize) as u8;
        ranks.insert(p.id.clone(), group);
    }
}

/// Active players ordered by `(rank, random tiebreak)`.
pub fn order_by_rank(
    active: &[Player],
    courts: u8,
    ranks: &BTreeMap<PlayerId, u8>,
    rng: &mut SchedRng,
) -> Vec<Player> {
    let mut keyed: Vec<(u8, u64, &Player)> = active
        .iter()
        .map(|p| {
            let rank = ranks.get(&p.id).copied().unwrap_or_else(|| unranked(courts));
            (rank, rng.tiebreak(), p)
        })
        .collect();
    keyed.sort_by_key(|&(rank, tb, _)| (rank, tb));
    keyed.into_iter().map(|(_, _, p)| p.clone()).collect()
}

/// Promote winners and demote losers by one court.
///
/// A winner with no rank starts from `court_count + 1`; a loser with no rank
/// starts from 1.
pub fn apply_throne_results(
    ranks: &mut BTreeMap<PlayerId, u8>,
    decisions: &[MatchDecision],
    court_count: u8,
) {
    for d in decisions {
        let (winners, losers) = d.split();
        for id in winners {
            let from = ranks.get(id).copied().unwrap_or_else(|| unranked(court_count));
            ranks.insert(id.clone(), from.saturating_sub(1).max(1));
        }
        for id in losers {
            let from = ranks.get(id).copied().unwrap_or(1);
            ranks.insert(id.clone(), from.saturating_add(1).min(court_count));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_core::WinnerTeam;

    fn pid(s: &str) -> PlayerId {
        s.parse().unwrap()
    }

    fn decision(court: u8, t1: [&str; 2], t2: [&str; 2], w: WinnerTeam) -> MatchDecision {
        MatchDecision { court, team1_ids: t1.map(pid), team2_ids: t2.map(pid), winner_team: w }
    }

    #[test]
    fn seed_groups_of_four() {
        let active: Vec<Player> =
            (0..8).map(|i| Player::new(pid(&format!("p{i}")), format!("P{i}"))).collect();
        let mut ranks = BTreeMap::new();
        let mut rng = SchedRng::from_seed_u64(51);
        seed_ranks(&active, 2, &mut ranks, &mut rng);
        assert_eq!(ranks.values().filter(|r| **r == 1).count(), 4);
        assert_eq!(ranks.values().filter(|r| **r == 2).count(), 4);
    }

    #[test]
    fn unranked_sort_last() {
        let active = vec![Player::new(pid("new"), "New"), Player::new(pid("old"), "Old")];
        let mut ranks = BTreeMap::new();
        ranks.insert(pid("old"), 2);
        let mut rng = SchedRng::from_seed_u64(52);
        let ordered = order_by_rank(&active, 2, &ranks, &mut rng);
        assert_eq!(ordered[0].id, pid("old"));
    }

    #[test]
    fn clamps_at_both_ends() {
        let mut ranks = BTreeMap::new();
        for (id, r) in [("a", 1), ("b", 1), ("c", 1), ("d", 1), ("e", 2), ("f", 2), ("g", 2), ("h", 2)] {
            ranks.insert(pid(id), r);
        }
        let ds = [
            decision(1, ["a", "b"], ["c", "d"], WinnerTeam::Team1),
            decision(2, ["e", "f"], ["g", "h"], WinnerTeam::Team2),
        ];
        apply_throne_results(&mut ranks, &ds, 2);
        // won at the top: stays 1
        assert_eq!(ranks[&pid("a")], 1);
        // lost at the top: down to 2
        assert_eq!(ranks[&pid("c")], 2);
        // won at the bottom: up to 1
        assert_eq!(ranks[&pid("g")], 1);
        // lost at the bottom: stays 2
        assert_eq!(ranks[&pid("e")], 2);
    }

    #[test]
    fn missing_ranks_use_defaults() {
        let mut ranks = BTreeMap::new();
        apply_throne_results(
            &mut ranks,
            &[decision(1, ["a", "b"], ["c", "d"], WinnerTeam::Team1)],
            3,
        );
        assert_eq!(ranks[&pid("a")], 3);
        assert_eq!(ranks[&pid("c")], 2);
    }
}
