//! Up-and-down-the-river: a fixed group of four per court. After each round
//! two neighbouring courts trade their winning teams; losers stay put.

use std::collections::{BTreeMap, BTreeSet};

use rr_core::{MatchDecision, Player, PlayerId, SchedRng, PLAYERS_PER_COURT};

pub type Lineup = BTreeMap<u8, Vec<PlayerId>>;

/// Fresh lineup from a shuffled roster; only complete groups are seated.
pub fn seed_lineup(active: &[Player], courts: u8, rng: &mut SchedRng) -> Lineup {
    let shuffled = rng.shuffled(active);
    crate::courts::bucket_into_courts(&shuffled, courts)
        .into_iter()
        .map(|(court, four)| (court, four.into_iter().map(|p| p.id).collect()))
        .collect()
}

/// Keep the lineup playable with this round's roster.
///
/// Drops courts above `courts` and members who are not active, then fills the
/// gaps from active players not seated anywhere, in random order, top court
/// first. Returns how many players were seated.
pub fn fill_lineup(lineup: &mut Lineup, active: &[Player], courts: u8, rng: &mut SchedRng) -> usize {
    let active_ids: BTreeSet<&PlayerId> = active.iter().map(|p| &p.id).collect();
    lineup.retain(|court, _| (1..=courts).contains(court));
    for members in lineup.values_mut() {
        members.retain(|id| active_ids.contains(id));
    }

    let seated: BTreeSet<PlayerId> = lineup.values().flatten().cloned().collect();
    let mut waiting: Vec<PlayerId> = active
        .iter()
        .filter(|p| !seated.contains(&p.id))
        .map(|p| p.id.clone())
        .collect();
    rng.shuffle_in_place(&mut waiting);
    let mut waiting = waiting.into_iter();

    let mut filled = 0;
    for court in 1..=courts {
        let members = lineup.entry(court).or_default();
        while members.len() < PLAYERS_PER_COURT {
            match waiting.next() {
                Some(id) => {
                    members.push(id);
                    filled += 1;
                }
                None => break,
            }
        }
    }
    lineup.retain(|_, members| !members.is_empty());
    filled
}

/// Upper court of the first boundary exchanged after `round`.
///
/// Boundaries are crossed in disjoint pairs `(s, s + 1), (s + 2, s + 3), ..`.
/// With three or more courts the start alternates between 1 (odd rounds) and
/// 2 (even rounds) so every boundary is crossed every other round.
pub fn exchange_start(round: u32, court_count: u8) -> u8 {
    if court_count >= 3 && round % 2 == 0 {
        2
    } else {
        1
    }
}

/// Exchange players across court boundaries after a round.
///
/// For an exchanged boundary `(c - 1, c)` the new lineup of `c - 1` is the
/// winners at `c` plus the losers at `c - 1`, and the new lineup of `c` is the
/// losers at `c` plus the winners at `c - 1`. Boundaries are taken in disjoint
/// pairs starting at `start`, so no court takes part in two exchanges. A
/// boundary is skipped unless both courts have a decision; courts outside an
/// exchange keep their lineup.
pub fn flow_lineup(lineup: &Lineup, decisions: &[MatchDecision], court_count: u8, start: u8) -> Lineup {
    let by_court: BTreeMap<u8, &MatchDecision> = decisions.iter().map(|d| (d.court, d)).collect();
    let mut next: Lineup = lineup
        .iter()
        .filter(|(court, _)| (1..=court_count).contains(*court))
        .map(|(court, members)| (*court, members.clone()))
        .collect();

    let mut upper = start.max(1);
    while upper < court_count {
        let lower = upper + 1;
        if let (Some(up), Some(down)) = (by_court.get(&upper), by_court.get(&lower)) {
            let (up_winners, up_losers) = up.split();
            let (down_winners, down_losers) = down.split();
            next.insert(upper, down_winners.iter().chain(up_losers.iter()).cloned().collect());
            next.insert(lower, down_losers.iter().chain(up_winners.iter()).cloned().collect());
        }
        upper += 2;
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_core::WinnerTeam;

    fn pid(s: &str) -> PlayerId {
        s.parse().unwrap()
    }

    fn roster(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(pid(&format!("p{i}")), format!("P{i}"))).collect()
    }

    fn lineup_of(groups: &[[&str; 4]]) -> Lineup {
        groups
            .iter()
            .enumerate()
            .map(|(i, g)| ((i + 1) as u8, g.iter().map(|s| pid(s)).collect()))
            .collect()
    }

    fn d(court: u8, t1: [&str; 2], t2: [&str; 2]) -> MatchDecision {
        MatchDecision {
            court,
            team1_ids: t1.map(pid),
            team2_ids: t2.map(pid),
            winner_team: WinnerTeam::Team1,
        }
    }

    fn sorted(v: &[PlayerId]) -> Vec<&str> {
        let mut out: Vec<&str> = v.iter().map(|p| p.as_str()).collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn two_courts_swap_winners_and_keep_losers() {
        let lineup = lineup_of(&[["a", "b", "c", "d"], ["e", "f", "g", "h"]]);
        let ds = [d(1, ["a", "b"], ["c", "d"]), d(2, ["e", "f"], ["g", "h"])];
        let next = flow_lineup(&lineup, &ds, 2, exchange_start(1, 2));
        assert_eq!(sorted(&next[&1]), vec!["c", "d", "e", "f"]);
        assert_eq!(sorted(&next[&2]), vec!["a", "b", "g", "h"]);
    }

    #[test]
    fn three_courts_alternate_the_exchanged_boundary() {
        let lineup = lineup_of(&[["a", "b", "c", "d"], ["e", "f", "g", "h"], ["i", "j", "k", "l"]]);
        let ds = [
            d(1, ["a", "b"], ["c", "d"]),
            d(2, ["e", "f"], ["g", "h"]),
            d(3, ["i", "j"], ["k", "l"]),
        ];

        let odd = flow_lineup(&lineup, &ds, 3, exchange_start(1, 3));
        assert_eq!(sorted(&odd[&1]), vec!["c", "d", "e", "f"]);
        assert_eq!(sorted(&odd[&2]), vec!["a", "b", "g", "h"]);
        assert_eq!(sorted(&odd[&3]), vec!["i", "j", "k", "l"]);

        let even = flow_lineup(&lineup, &ds, 3, exchange_start(2, 3));
        assert_eq!(sorted(&even[&1]), vec!["a", "b", "c", "d"]);
        assert_eq!(sorted(&even[&2]), vec!["g", "h", "i", "j"]);
        assert_eq!(sorted(&even[&3]), vec!["e", "f", "k", "l"]);
    }

    #[test]
    fn four_courts_exchange_disjoint_pairs() {
        let lineup = lineup_of(&[
            ["a", "b", "c", "d"],
            ["e", "f", "g", "h"],
            ["i", "j", "k", "l"],
            ["m", "n", "o", "p"],
        ]);
        let ds = [
            d(1, ["a", "b"], ["c", "d"]),
            d(2, ["e", "f"], ["g", "h"]),
            d(3, ["i", "j"], ["k", "l"]),
            d(4, ["m", "n"], ["o", "p"]),
        ];
        let next = flow_lineup(&lineup, &ds, 4, 1);
        assert_eq!(sorted(&next[&1]), vec!["c", "d", "e", "f"]);
        assert_eq!(sorted(&next[&2]), vec!["a", "b", "g", "h"]);
        assert_eq!(sorted(&next[&3]), vec!["k", "l", "m", "n"]);
        assert_eq!(sorted(&next[&4]), vec!["i", "j", "o", "p"]);
        let everyone: BTreeSet<&PlayerId> = next.values().flatten().collect();
        assert_eq!(everyone.len(), 16);
        assert!(next.values().all(|m| m.len() == 4));
    }

    #[test]
    fn undecided_court_blocks_its_boundary() {
        let lineup = lineup_of(&[["a", "b", "c", "d"], ["e", "f", "g", "h"], ["i", "j", "k", "l"]]);
        let ds = [d(1, ["a", "b"], ["c", "d"]), d(3, ["i", "j"], ["k", "l"])];
        for start in [1, 2] {
            let next = flow_lineup(&lineup, &ds, 3, start);
            for court in 1..=3u8 {
                assert_eq!(sorted(&next[&court]), sorted(&lineup[&court]));
            }
        }
    }

    #[test]
    fn two_courts_always_exchange() {
        assert_eq!(exchange_start(1, 2), 1);
        assert_eq!(exchange_start(2, 2), 1);
        assert_eq!(exchange_start(2, 3), 2);
        assert_eq!(exchange_start(7, 5), 1);
    }

    #[test]
    fn seed_and_fill_with_absentee() {
        let players = roster(9);
        let mut rng = SchedRng::from_seed_u64(61);
        let mut lineup = seed_lineup(&players[..8], 2, &mut rng);
        assert_eq!(lineup.len(), 2);

        // p0 sits out; p8 is new
        let active: Vec<Player> = players[1..].to_vec();
        let filled = fill_lineup(&mut lineup, &active, 2, &mut rng);
        assert_eq!(filled, 1);
        let all: BTreeSet<&PlayerId> = lineup.values().flatten().collect();
        assert_eq!(all.len(), 8);
        assert!(!all.contains(&pid("p0")));
        assert!(all.contains(&pid("p8")));
        assert!(lineup.values().all(|m| m.len() == 4));
    }

    #[test]
    fn fill_drops_courts_beyond_count() {
        let mut lineup = lineup_of(&[["a", "b", "c", "d"], ["e", "f", "g", "h"]]);
        let active: Vec<Player> =
            ["a", "b", "c", "d", "e", "f", "g", "h"].iter().map(|s| Player::new(pid(s), *s)).collect();
        let mut rng = SchedRng::from_seed_u64(62);
        fill_lineup(&mut lineup, &active, 1, &mut rng);
        assert_eq!(lineup.len(), 1);
        assert_eq!(lineup[&1].len(), 4);
    }
}
