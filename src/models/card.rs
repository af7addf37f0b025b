use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::sub::Identifiers;

// ---------------------------------------------------------------------------
// CardPrinting — One printed card object from AllPrintings
// ---------------------------------------------------------------------------

/// A single printed card object as it appears in a set's `cards` array.
///
/// Multi-faced cards appear as one object per face, each carrying the full
/// `name` (`"Fire // Ice"`) plus its own `faceName` and `side`. Only the
/// fields the index needs are kept; everything else is ignored on parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPrinting {
    pub name: Option<String>,
    pub face_name: Option<String>,
    #[serde(rename = "type")]
    pub type_field: Option<String>,
    pub mana_cost: Option<String>,
    pub text: Option<String>,
    pub layout: Option<String>,
    pub side: Option<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    pub color_indicator: Option<Vec<String>>,
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
    #[serde(default)]
    pub printings: Vec<String>,
    pub uuid: Option<String>,
    pub set_code: Option<String>,
    pub number: Option<String>,
    pub identifiers: Option<Identifiers>,
    pub has_alternative_deck_limit: Option<bool>,
}

/// A card array element that may not match the expected shape.
///
/// Lets a single malformed object be skipped instead of rejecting the whole
/// dataset.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CardEntry {
    Card(Box<CardPrinting>),
    Malformed(serde::de::IgnoredAny),
}
