use serde::Deserialize;
use std::collections::BTreeMap;

use super::card::CardEntry;
use super::sub::Meta;

// ---------------------------------------------------------------------------
// SetData — One set with its printed cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetData {
    pub code: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub cards: Vec<CardEntry>,
}

// ---------------------------------------------------------------------------
// AllPrintings — The whole dataset file
// ---------------------------------------------------------------------------

/// Parsed `AllPrintings.json`, keyed by set code.
///
/// A `BTreeMap` keeps set iteration in code order so that index building
/// never depends on the file's key order.
#[derive(Debug, Clone, Deserialize)]
pub struct AllPrintings {
    #[serde(default)]
    pub meta: Option<Meta>,
    pub data: BTreeMap<String, SetData>,
}

impl AllPrintings {
    /// Total number of card objects across all sets, malformed ones included.
    pub fn card_count(&self) -> usize {
        self.data.values().map(|s| s.cards.len()).sum()
    }
}
