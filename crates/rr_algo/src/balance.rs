//! Balanced 2-vs-2 split of a rating-seeded group of four.

use rr_core::{Player, PlayerId, Team};

// The three ways to split four players into two pairs.
const SPLITS: [(usize, usize, usize, usize); 3] = [(0, 1, 2, 3), (0, 2, 1, 3), (0, 3, 1, 2)];

/// Pick the split whose team rating sums differ least. The first split wins
/// ties. Returns `(team1, team2, |sum1 - sum2|)`.
pub fn balanced_split<F>(four: &[Player; 4], rating: F) -> (Team, Team, i64)
where
    F: Fn(&PlayerId) -> i32,
{
    let r: Vec<i64> = four.iter().map(|p| i64::from(rating(&p.id))).collect();
    let mut best = SPLITS[0];
    let mut best_diff = i64::MAX;
    for split in SPLITS {
        let (a, b, c, d) = split;
        let diff = ((r[a] + r[b]) - (r[c] + r[d])).abs();
        if diff < best_diff {
            best = split;
            best_diff = diff;
        }
    }
    let (a, b, c, d) = best;
    (
        Team::new(four[a].clone(), four[b].clone()),
        Team::new(four[c].clone(), four[d].clone()),
        best_diff,
    )
}
