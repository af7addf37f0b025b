use serde::Serialize;

use super::record::CardRecord;
use crate::error::{DeckCheckError, Result};

// ---------------------------------------------------------------------------
// DeckEntry — One resolved input line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DeckEntry<'a> {
    pub card: &'a CardRecord,
    /// The name exactly as the user typed it.
    pub requested_name: String,
    pub count: u32,
}

impl<'a> DeckEntry<'a> {
    /// Fails with [`DeckCheckError::InvalidArgument`] when `count` is zero.
    pub fn new(
        card: &'a CardRecord,
        requested_name: impl Into<String>,
        count: u32,
    ) -> Result<Self> {
        if count == 0 {
            return Err(DeckCheckError::InvalidArgument(format!(
                "deck entry for '{}' has a count of 0",
                card.name
            )));
        }
        Ok(Self {
            card,
            requested_name: requested_name.into(),
            count,
        })
    }
}

// ---------------------------------------------------------------------------
// FuzzyMatch — A line resolved by similarity rather than by name
// ---------------------------------------------------------------------------

/// Surfaced in reports so a user can confirm the guess.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub requested_name: String,
    pub matched_name: String,
    pub similarity: f64,
}

// ---------------------------------------------------------------------------
// DeckList — Everything a validation run needs from the user's list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct DeckList<'a> {
    pub entries: Vec<DeckEntry<'a>>,
    /// Requested names of ambiguous or unresolved lines.
    pub unresolved: Vec<String>,
    pub fuzzy_matches: Vec<FuzzyMatch>,
}

impl<'a> DeckList<'a> {
    pub fn new(entries: Vec<DeckEntry<'a>>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    /// Sum of every entry's count.
    pub fn card_count(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }
}
