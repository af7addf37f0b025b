use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Meta
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Meta {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub version: String,
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Identifiers {
    pub scryfall_id: Option<String>,
    pub scryfall_oracle_id: Option<String>,
}

// ---------------------------------------------------------------------------
// LegalityStatus
// ---------------------------------------------------------------------------

pub const COMMANDER_FORMAT: &str = "commander";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalityStatus {
    Legal,
    Restricted,
    Banned,
    #[serde(rename = "Not Legal")]
    NotLegal,
}

impl LegalityStatus {
    /// Rank used when printings disagree: higher wins.
    fn permissiveness(self) -> u8 {
        match self {
            LegalityStatus::Legal => 3,
            LegalityStatus::Restricted => 2,
            LegalityStatus::Banned => 1,
            LegalityStatus::NotLegal => 0,
        }
    }

    /// The more permissive of two statuses.
    pub fn most_permissive(self, other: LegalityStatus) -> LegalityStatus {
        if other.permissiveness() > self.permissiveness() {
            other
        } else {
            self
        }
    }
}

impl FromStr for LegalityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legal" => Ok(LegalityStatus::Legal),
            "restricted" => Ok(LegalityStatus::Restricted),
            "banned" => Ok(LegalityStatus::Banned),
            "not legal" | "not_legal" => Ok(LegalityStatus::NotLegal),
            other => Err(format!("unknown legality status '{other}'")),
        }
    }
}

impl fmt::Display for LegalityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LegalityStatus::Legal => "Legal",
            LegalityStatus::Restricted => "Restricted",
            LegalityStatus::Banned => "Banned",
            LegalityStatus::NotLegal => "Not Legal",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Legalities
// ---------------------------------------------------------------------------

/// Per-format legality of one oracle card, keyed by lowercase format name.
///
/// A format with no entry is not legal, matching how MTGJSON omits formats a
/// card cannot be played in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Legalities(BTreeMap<String, LegalityStatus>);

impl Legalities {
    pub fn get(&self, format: &str) -> LegalityStatus {
        self.0
            .get(&format.to_ascii_lowercase())
            .copied()
            .unwrap_or(LegalityStatus::NotLegal)
    }

    pub fn commander(&self) -> LegalityStatus {
        self.get(COMMANDER_FORMAT)
    }

    /// Record a status for `format`, keeping the most permissive one seen.
    pub fn merge(&mut self, format: &str, status: LegalityStatus) {
        self.0
            .entry(format.to_ascii_lowercase())
            .and_modify(|existing| *existing = existing.most_permissive(status))
            .or_insert(status);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LegalityStatus)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, LegalityStatus)> for Legalities {
    fn from_iter<T: IntoIterator<Item = (String, LegalityStatus)>>(iter: T) -> Self {
        let mut legalities = Legalities::default();
        for (format, status) in iter {
            legalities.merge(&format, status);
        }
        legalities
    }
}
