//! crates/rr_core/src/entities.rs
//! Round-level shapes: players, teams, pairings, court matches, and the
//! wire-facing `Assignment` / `MatchDecision` records.

use core::convert::TryFrom;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::{match_key, pair_key, MatchKey, PlayerId, TeamKey};

/// Canonical player: stable id plus display name.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Two players playing together in one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team(pub [Player; 2]);

impl Team {
    pub fn new(a: Player, b: Player) -> Self {
        Team([a, b])
    }

    pub fn key(&self) -> TeamKey {
        pair_key(&self.0[0].id, &self.0[1].id)
    }

    pub fn ids(&self) -> [PlayerId; 2] {
        [self.0[0].id.clone(), self.0[1].id.clone()]
    }

    /// Display label, e.g. `"Ann & Bo"`.
    pub fn label(&self) -> String {
        format!("{} & {}", self.0[0].name, self.0[1].name)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.0.iter()
    }
}

/// Two teams paired against each other, not yet placed on a court.
///
/// `match_key` is `None` in modes that do not track matchup history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pairing {
    pub team1: Team,
    pub team2: Team,
    pub match_key: Option<MatchKey>,
}

impl Pairing {
    /// Pairing that records its matchup key.
    pub fn tracked(team1: Team, team2: Team) -> Self {
        let mk = match_key(&team1.key(), &team2.key());
        Self { team1, team2, match_key: Some(mk) }
    }

    /// Pairing without matchup tracking (ladder and rating modes).
    pub fn untracked(team1: Team, team2: Team) -> Self {
        Self { team1, team2, match_key: None }
    }

    /// The four players, team1 first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team1.players().chain(self.team2.players())
    }
}

/// A pairing placed on a 1-based court.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourtMatch {
    pub court: u8,
    pub pairing: Pairing,
}

impl CourtMatch {
    pub fn to_assignment(&self) -> Assignment {
        Assignment {
            court: self.court,
            team1_ids: self.pairing.team1.ids(),
            team2_ids: self.pairing.team2.ids(),
            team1: self.pairing.team1.label(),
            team2: self.pairing.team2.label(),
        }
    }
}

/// Caller-facing court assignment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Assignment {
    pub court: u8,
    pub team1_ids: [PlayerId; 2],
    pub team2_ids: [PlayerId; 2],
    /// Display label of team 1.
    pub team1: String,
    /// Display label of team 2.
    pub team2: String,
}

/// Which team won a match. Wire form is the integer `1` or `2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub enum WinnerTeam {
    Team1,
    Team2,
}

impl TryFrom<u8> for WinnerTeam {
    type Error = CoreError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            1 => Ok(WinnerTeam::Team1),
            2 => Ok(WinnerTeam::Team2),
            other => Err(CoreError::InvalidWinner(other)),
        }
    }
}

impl From<WinnerTeam> for u8 {
    fn from(w: WinnerTeam) -> u8 {
        match w {
            WinnerTeam::Team1 => 1,
            WinnerTeam::Team2 => 2,
        }
    }
}

/// Recorded outcome of one match of the round just played.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MatchDecision {
    pub court: u8,
    pub team1_ids: [PlayerId; 2],
    pub team2_ids: [PlayerId; 2],
    pub winner_team: WinnerTeam,
}

impl MatchDecision {
    /// Decision for an assignment with the given winner.
    pub fn for_assignment(a: &Assignment, winner_team: WinnerTeam) -> Self {
        Self {
            court: a.court,
            team1_ids: a.team1_ids.clone(),
            team2_ids: a.team2_ids.clone(),
            winner_team,
        }
    }

    /// `(winner ids, loser ids)`.
    pub fn split(&self) -> (&[PlayerId; 2], &[PlayerId; 2]) {
        match self.winner_team {
            WinnerTeam::Team1 => (&self.team1_ids, &self.team2_ids),
            WinnerTeam::Team2 => (&self.team2_ids, &self.team1_ids),
        }
    }
}
