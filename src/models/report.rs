use serde::Serialize;
use std::fmt;

use super::deck::FuzzyMatch;
use crate::color::ColorSet;

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    DeckSize,
    Singleton,
    ColorIdentity,
    BannedCard,
    NotLegalCard,
    BannedCommander,
    IneligibleCommander,
    InvalidPairing,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViolationKind::DeckSize => "deck size",
            ViolationKind::Singleton => "singleton",
            ViolationKind::ColorIdentity => "color identity",
            ViolationKind::BannedCard => "banned card",
            ViolationKind::NotLegalCard => "not legal card",
            ViolationKind::BannedCommander => "banned commander",
            ViolationKind::IneligibleCommander => "ineligible commander",
            ViolationKind::InvalidPairing => "invalid pairing",
        };
        f.write_str(s)
    }
}

/// One broken construction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// The offending card, if the rule is about a single card.
    pub card_name: Option<String>,
    pub detail: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, card_name: Option<&str>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            card_name: card_name.map(str::to_string),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.card_name {
            Some(name) => write!(f, "{}: {} ({})", self.kind, name, self.detail),
            None => write!(f, "{}: {}", self.kind, self.detail),
        }
    }
}

// ---------------------------------------------------------------------------
// ValidationReport
// ---------------------------------------------------------------------------

/// The outcome of validating one deck against one commander selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub is_legal: bool,
    pub violations: Vec<Violation>,
    /// The commander selection's color identity; present even when illegal.
    pub deck_color_identity: ColorSet,
    pub unresolved: Vec<String>,
    pub fuzzy_matches: Vec<FuzzyMatch>,
    pub commanders: Vec<String>,
    /// Cards counted toward the deck, command zone included.
    pub deck_size: usize,
    /// Sorted, distinct canonical names of every resolved card and commander.
    pub card_names: Vec<String>,
}

impl ValidationReport {
    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    /// Names to hand to a pricing service.
    pub fn price_query(&self) -> &[String] {
        &self.card_names
    }
}
