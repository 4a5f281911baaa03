//! crates/rr_core/src/state.rs
//! `SessionState`: the single cross-round memory the caller persists between
//! calls and the engine mutates during one call.
//!
//! Every map is a `BTreeMap` so serialized state has a stable key order.
//! All fields default, so a partially written state file still loads.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::{Assignment, Player};
use crate::ids::{MatchKey, PairKey, PlayerId};
use crate::variables::Mode;

/// Court and team ids of one ladder match, kept for display by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CourtTeams {
    pub court: u8,
    pub team1_ids: [PlayerId; 2],
    pub team2_ids: [PlayerId; 2],
}

impl From<&Assignment> for CourtTeams {
    fn from(a: &Assignment) -> Self {
        Self {
            court: a.court,
            team1_ids: a.team1_ids.clone(),
            team2_ids: a.team2_ids.clone(),
        }
    }
}

/// Throne: per-player court rank (1 = top court, `courts + 1` = unranked).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ThroneState {
    pub court_ranks: BTreeMap<PlayerId, u8>,
    pub last_court_teams: Vec<CourtTeams>,
}

/// Up-and-down-the-river: fixed four player ids per court.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RiverState {
    pub court_lineup: BTreeMap<u8, Vec<PlayerId>>,
    pub last_court_teams: Vec<CourtTeams>,
}

/// Mode-private state, keyed by mode on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct FormatState {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub throne: Option<ThroneState>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub up_down_river: Option<RiverState>,
}

/// Snapshot of the previous round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LastRound {
    pub court_count: u8,
    pub assignments: Vec<Assignment>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct SessionState {
    /// Rounds generated so far.
    pub round: u32,
    pub mode: Mode,
    pub partner_history: BTreeMap<PairKey, u32>,
    pub match_history: BTreeMap<MatchKey, u32>,
    pub bye_counts: BTreeMap<PlayerId, u32>,
    /// Most recent court per player (0 = none yet).
    pub last_court: BTreeMap<PlayerId, u8>,
    pub ratings: BTreeMap<PlayerId, i32>,
    pub format_state: FormatState,
    pub last_round: Option<LastRound>,
}

impl SessionState {
    pub fn partner_count(&self, k: &PairKey) -> u32 {
        self.partner_history.get(k).copied().unwrap_or(0)
    }

    pub fn match_count(&self, k: &MatchKey) -> u32 {
        self.match_history.get(k).copied().unwrap_or(0)
    }

    pub fn bye_count(&self, id: &PlayerId) -> u32 {
        self.bye_counts.get(id).copied().unwrap_or(0)
    }

    pub fn last_court_of(&self, id: &PlayerId) -> u8 {
        self.last_court.get(id).copied().unwrap_or(0)
    }

    pub fn rating_of(&self, id: &PlayerId, default_rating: i32) -> i32 {
        self.ratings.get(id).copied().unwrap_or(default_rating)
    }

    /// Seed per-player defaults (0 byes, no court, default rating) for new players.
    pub fn ensure_players(&mut self, players: &[Player], default_rating: i32) {
        for p in players {
            self.bye_counts.entry(p.id.clone()).or_insert(0);
            self.last_court.entry(p.id.clone()).or_insert(0);
            self.ratings.entry(p.id.clone()).or_insert(default_rating);
        }
    }

    /// Court count of the previous round, if any.
    pub fn last_court_count(&self) -> Option<u8> {
        self.last_round.as_ref().map(|lr| lr.court_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::pair_key;

    fn pid(s: &str) -> PlayerId {
        s.parse().unwrap()
    }

    #[test]
    fn empty_object_is_fresh_state() {
        let s: SessionState = serde_json::from_str("{}").unwrap();
        assert_eq!(s, SessionState::default());
        assert_eq!(s.mode, Mode::Random);
        assert!(s.last_round.is_none());
    }

    #[test]
    fn ensure_players_only_fills_missing() {
        let mut s = SessionState::default();
        s.ratings.insert(pid("a"), 1200);
        s.bye_counts.insert(pid("a"), 2);
        let players = vec![Player::new(pid("a"), "A"), Player::new(pid("b"), "B")];
        s.ensure_players(&players, 1000);
        assert_eq!(s.rating_of(&pid("a"), 1000), 1200);
        assert_eq!(s.bye_count(&pid("a")), 2);
        assert_eq!(s.rating_of(&pid("b"), 1000), 1000);
        assert_eq!(s.last_court_of(&pid("b")), 0);
    }

    #[test]
    fn full_state_round_trips_through_json() {
        let mut s = SessionState { round: 3, mode: Mode::UpDownRiver, ..Default::default() };
        s.partner_history.insert(pair_key(&pid("a"), &pid("b")), 2);
        s.last_court.insert(pid("a"), 4);
        let mut river = RiverState::default();
        river.court_lineup.insert(1, vec![pid("a"), pid("b"), pid("c"), pid("d")]);
        s.format_state.up_down_river = Some(river);
        s.last_round = Some(LastRound { court_count: 1, assignments: vec![] });

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"upDownRiver\""));
        assert!(json.contains("\"partnerHistory\":{\"a|b\":2}"));
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
