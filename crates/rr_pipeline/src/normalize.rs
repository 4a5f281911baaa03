//! Identity normalization: heterogeneous player records → canonical `Player`s.
//!
//! Accepted shapes: a bare name (`"Ann"`), or a record with an `id` and/or a
//! `name`, each a string, number or boolean. The id falls back to the name and
//! the name to the id; both are trimmed. Entries whose id ends up empty are
//! dropped, and the first occurrence of an id wins. Any other entry is skipped
//! without failing the rest of the roster. Never fails.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use rr_core::{Player, PlayerId};

/// Scalar id or name as supplied by a caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl RawText {
    fn to_text(&self) -> String {
        match self {
            RawText::Text(s) => s.clone(),
            RawText::Int(n) => n.to_string(),
            // Whole floats print without a fraction: 7.0 -> "7".
            RawText::Float(x) if x.fract() == 0.0 && x.abs() < 1e15 => (*x as i64).to_string(),
            RawText::Float(x) => x.to_string(),
            RawText::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RawText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<RawText>,
}

/// One caller-supplied roster entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerInput {
    Name(String),
    Record(PlayerRecord),
    /// Anything else; skipped during normalization.
    Other(serde_json::Value),
}

impl From<&str> for PlayerInput {
    fn from(name: &str) -> Self {
        PlayerInput::Name(name.to_string())
    }
}

impl From<Player> for PlayerInput {
    fn from(p: Player) -> Self {
        PlayerInput::Record(PlayerRecord {
            id: Some(RawText::Text(p.id.to_string())),
            name: Some(RawText::Text(p.name)),
        })
    }
}

impl PlayerInput {
    /// `(id, name)` after fallback and trimming; the id may be empty.
    fn resolve(&self) -> (String, String) {
        match self {
            PlayerInput::Name(s) => {
                let t = s.trim().to_string();
                (t.clone(), t)
            }
            PlayerInput::Record(r) => {
                let id = r.id.as_ref().or(r.name.as_ref()).map(RawText::to_text).unwrap_or_default();
                let name = r.name.as_ref().or(r.id.as_ref()).map(RawText::to_text).unwrap_or_default();
                (id.trim().to_string(), name.trim().to_string())
            }
            PlayerInput::Other(_) => (String::new(), String::new()),
        }
    }
}

/// Canonical, deduplicated roster in input order.
pub fn normalize_players(inputs: &[PlayerInput]) -> Vec<Player> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(inputs.len());
    for input in inputs {
        let (id, name) = input.resolve();
        let Ok(pid) = PlayerId::new(&id) else {
            match input {
                PlayerInput::Other(_) => tracing::debug!(?input, "skipping unrecognized roster entry"),
                _ => tracing::debug!(?input, "dropping roster entry without an id"),
            }
            continue;
        };
        if seen.insert(pid.clone()) {
            out.push(Player::new(pid, name));
        }
    }
    out
}
