// crates/rr_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure scheduling algorithms. No I/O; all randomness comes from the
//! caller-supplied `SchedRng`; all cross-round memory from `SessionState`.

pub use rr_core::{Player, SchedRng, SessionState};

// ----------------------------- Round building blocks ---------------------------------

pub mod balance;
pub mod byes;
pub mod courts;
pub mod history;

// ----------------------------- Pairing (public surface) ------------------------------

pub mod pairing {
    // File modules (actual implementations)
    pub mod matchups;
    pub mod partners;
    pub mod search;

    pub use matchups::{make_matches, Matchups};
    pub use partners::{make_partner_pairs, PartnerPairs};
    pub use search::{best_greedy_pairing, PairingError, SearchOutcome};
}

// ----------------------------- Progression (ladder / rating) -------------------------

pub mod progression {
    pub mod ladder;
    pub mod rating;
    pub mod river;

    pub use ladder::{apply_throne_results, order_by_rank, seed_ranks, unranked};
    pub use rating::{apply_cream_results, apply_flat_results, order_by_rating};
    pub use river::{exchange_start, fill_lineup, flow_lineup, seed_lineup, Lineup};
}

// Tight, explicit re-exports (avoid wildcard export drift).
pub use balance::balanced_split;
pub use byes::{pick_byes_fair, ByeSelection};
pub use courts::{assign_courts, bucket_into_courts, mark_last_court, CourtAssignment};
pub use history::commit_histories;
pub use pairing::{make_matches, make_partner_pairs, Matchups, PairingError, PartnerPairs};
