//! crates/rr_core/src/ids.rs
//! Player identity and the canonical, order-independent history keys.
//!
//! A partner key is the two player ids sorted and joined with `|`; a team key
//! is the partner key of its two players; a match key is the two team keys
//! sorted and joined with `||`. Swapping either argument yields the same key.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::errors::CoreError;

const PAIR_SEP: &str = "|";
const MATCH_SEP: &str = "||";

/// Stable identity of a player (trimmed, non-empty). Display names live on `Player`.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(String);

impl PlayerId {
    /// Trim and validate. Empty ids are rejected.
    pub fn new(s: impl AsRef<str>) -> Result<Self, CoreError> {
        let t = s.as_ref().trim();
        if t.is_empty() {
            return Err(CoreError::EmptyId);
        }
        Ok(Self(t.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PlayerId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PlayerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        PlayerId::new(&s).map_err(D::Error::custom)
    }
}

/// Unordered pair of player ids (`"a|b"`, lexicographically sorted).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PairKey(String);

/// A team is identified by the partner key of its two players.
pub type TeamKey = PairKey;

impl PairKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unordered pair of team keys (`"x||y"`, lexicographically sorted).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MatchKey(String);

impl MatchKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[inline]
fn join_sorted(x: &str, y: &str, sep: &str) -> String {
    let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
    let mut s = String::with_capacity(lo.len() + sep.len() + hi.len());
    s.push_str(lo);
    s.push_str(sep);
    s.push_str(hi);
    s
}

/// Canonical partner key; `pair_key(a, b) == pair_key(b, a)`.
pub fn pair_key(a: &PlayerId, b: &PlayerId) -> PairKey {
    PairKey(join_sorted(a.as_str(), b.as_str(), PAIR_SEP))
}

/// Canonical matchup key; `match_key(x, y) == match_key(y, x)`.
pub fn match_key(a: &TeamKey, b: &TeamKey) -> MatchKey {
    MatchKey(join_sorted(a.as_str(), b.as_str(), MATCH_SEP))
}
