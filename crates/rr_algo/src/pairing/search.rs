//! Bounded, randomized greedy pairing search shared by the partner and
//! matchup searches.
//!
//! Each attempt shuffles the items and walks them in that order. For every
//! unpaired item the remaining unpaired items are scored by
//! `(used_count, tiebreak)`; the lowest key wins and the scan stops at the
//! first never-used candidate. An attempt that leaves an item without a
//! candidate is stuck and discarded. The best completed attempt (fewest
//! repeats) is kept; a repeat-free attempt ends the search early.

use core::fmt;

use rr_core::SchedRng;

/// Best completed attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome<T> {
    /// Pairs in the order the winning attempt formed them.
    pub pairs: Vec<(T, T)>,
    /// Pairs whose `used_count` was above zero.
    pub repeats: u32,
    /// Attempts consumed, including the winning one.
    pub attempts: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingError {
    /// No attempt completed a full pairing within the retry budget.
    Exhausted { attempts: u32, items: usize },
}

impl fmt::Display for PairingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingError::Exhausted { attempts, items } => {
                write!(f, "no complete pairing of {items} items in {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for PairingError {}

/// Pair up `items` minimizing how many pairs have `used_count > 0`.
///
/// `used_count` must be symmetric. An odd item count can never complete, so it
/// always exhausts the budget. An empty input completes trivially.
pub fn best_greedy_pairing<T, F>(
    items: &[T],
    used_count: F,
    max_retries: u32,
    rng: &mut SchedRng,
) -> Result<SearchOutcome<T>, PairingError>
where
    T: Clone,
    F: Fn(&T, &T) -> u32,
{
    let mut best: Option<SearchOutcome<T>> = None;

    for attempt in 1..=max_retries {
        let pool = rng.shuffled(items);
        let Some((pairs, repeats)) = greedy_attempt(&pool, &used_count, rng) else {
            tracing::trace!(attempt, "pairing attempt stuck");
            continue;
        };

        let improves = best.as_ref().map_or(true, |b| repeats < b.repeats);
        if improves {
            best = Some(SearchOutcome { pairs, repeats, attempts: attempt });
            if repeats == 0 {
                break;
            }
        }
    }

    match best {
        Some(found) => {
            tracing::trace!(repeats = found.repeats, attempts = found.attempts, "pairing found");
            Ok(found)
        }
        None => Err(PairingError::Exhausted { attempts: max_retries, items: items.len() }),
    }
}

/// One greedy pass over a shuffled pool. `None` when stuck.
fn greedy_attempt<T, F>(pool: &[T], used_count: &F, rng: &mut SchedRng) -> Option<(Vec<(T, T)>, u32)>
where
    T: Clone,
    F: Fn(&T, &T) -> u32,
{
    let n = pool.len();
    let mut used = vec![false; n];
    let mut pairs = Vec::with_capacity(n / 2);
    let mut repeats = 0u32;

    for i in 0..n {
        if used[i] {
            continue;
        }
        // (index, (count, tiebreak))
        let mut pick: Option<(usize, (u32, u64))> = None;
        for j in (i + 1)..n {
            if used[j] {
                continue;
            }
            let count = used_count(&pool[i], &pool[j]);
            let key = (count, rng.tiebreak());
            if pick.map_or(true, |(_, k)| key < k) {
                pick = Some((j, key));
                if count == 0 {
                    break;
                }
            }
        }

        let (j, (count, _)) = pick?;
        used[i] = true;
        used[j] = true;
        if count > 0 {
            repeats += 1;
        }
        pairs.push((pool[i].clone(), pool[j].clone()));
    }

    Some((pairs, repeats))
}
