//! variables.rs: Modes, engine options, and rating constants with safe defaults.
//!
//! Options are plain data with serde wire names in camelCase so a caller can
//! keep them in a JSON file next to the session state.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Players per court (two 2-player teams).
pub const PLAYERS_PER_COURT: usize = 4;
pub const MIN_COURTS: u8 = 1;
pub const MAX_COURTS: u8 = 6;
/// Court count used when the caller does not pass one.
pub const DEFAULT_COURTS: u8 = 6;
pub const DEFAULT_MAX_RETRIES: u32 = 900;
pub const DEFAULT_RATING: i32 = 1000;

/// Clamp a requested court count into `[MIN_COURTS, MAX_COURTS]`.
#[inline]
pub fn clamp_courts(requested: Option<u32>) -> u8 {
    let r = requested.unwrap_or(DEFAULT_COURTS as u32);
    r.clamp(MIN_COURTS as u32, MAX_COURTS as u32) as u8
}

/// Table capacity for a court count.
#[inline]
pub fn capacity_for(courts: u8) -> usize {
    courts as usize * PLAYERS_PER_COURT
}

// ------------ Modes ------------

/// Scheduling mode. Sticky once chosen (stored on the session state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Free rotation: partner/matchup repeat avoidance across the whole roster.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "random"))]
    Random,
    /// Per-player rank ladder (king/queen of the court).
    #[cfg_attr(feature = "serde", serde(rename = "throne"))]
    Throne,
    /// Fixed four per court, winners up and losers down.
    #[cfg_attr(feature = "serde", serde(rename = "upDownRiver"))]
    UpDownRiver,
    /// Rating-seeded courts, flat rating step.
    #[cfg_attr(feature = "serde", serde(rename = "gauntlet"))]
    Gauntlet,
    /// Rating-seeded courts, court-position-dependent step.
    #[cfg_attr(feature = "serde", serde(rename = "cream"))]
    Cream,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Random,
        Mode::Throne,
        Mode::UpDownRiver,
        Mode::Gauntlet,
        Mode::Cream,
    ];

    /// Wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Random => "random",
            Mode::Throne => "throne",
            Mode::UpDownRiver => "upDownRiver",
            Mode::Gauntlet => "gauntlet",
            Mode::Cream => "cream",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| CoreError::UnknownMode(s.to_string()))
    }
}

// ------------ Rating constants ------------

/// Per-court-position rating steps for the cream mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct CreamTable {
    pub top_win: i32,
    pub top_loss: i32,
    pub middle_win: i32,
    pub middle_loss: i32,
    pub bottom_win: i32,
    pub bottom_loss: i32,
}

impl Default for CreamTable {
    fn default() -> Self {
        Self {
            top_win: 32,
            top_loss: 8,
            middle_win: 24,
            middle_loss: 16,
            bottom_win: 8,
            bottom_loss: 24,
        }
    }
}

impl CreamTable {
    /// `(win_step, loss_step)` for a court. Court 1 counts as the bottom court
    /// and takes precedence when there is only one court.
    pub fn steps_for(&self, court: u8, court_count: u8) -> (i32, i32) {
        if court == 1 {
            (self.bottom_win, self.bottom_loss)
        } else if court >= court_count {
            (self.top_win, self.top_loss)
        } else {
            (self.middle_win, self.middle_loss)
        }
    }
}

/// Rating knobs shared by the rating modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RatingParams {
    /// Rating assigned to a player seen for the first time.
    pub default_rating: i32,
    /// Ratings never drop below this.
    pub rating_floor: i32,
    /// Gauntlet step (winners +step, losers −step).
    pub flat_step: i32,
    pub cream: CreamTable,
}

impl Default for RatingParams {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            rating_floor: 0,
            flat_step: 24,
            cream: CreamTable::default(),
        }
    }
}

// ------------ Engine options ------------

/// Options for one `generate_round` call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct EngineOptions {
    /// Attempt budget for the partner and matchup searches.
    pub max_retries: u32,
    /// Also clamp the court count to what the roster can fill (`max(1, N/4)`).
    pub fit_courts_to_roster: bool,
    pub ratings: RatingParams,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            fit_courts_to_roster: false,
            ratings: RatingParams::default(),
        }
    }
}

impl EngineOptions {
    /// Validate numeric domains.
    pub fn validate_domains(&self) -> Result<(), CoreError> {
        let r = &self.ratings;
        if r.rating_floor > r.default_rating {
            return Err(CoreError::DomainOutOfRange("ratingFloor above defaultRating"));
        }
        if r.flat_step < 0 {
            return Err(CoreError::DomainOutOfRange("flatStep"));
        }
        let c = &r.cream;
        if [c.top_win, c.top_loss, c.middle_win, c.middle_loss, c.bottom_win, c.bottom_loss]
            .iter()
            .any(|v| *v < 0)
        {
            return Err(CoreError::DomainOutOfRange("cream steps"));
        }
        Ok(())
    }
}
