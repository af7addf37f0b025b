use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use super::sub::{LegalityStatus, Legalities};
use crate::color::ColorSet;

/// Dense handle of a [`CardRecord`] inside the index that built it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardId(pub(crate) usize);

impl CardId {
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// CardFace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardFace {
    pub name: String,
    /// Symbolic cost such as `{2}{U}{B}`; empty for lands and back faces
    /// without a cost.
    pub mana_cost: String,
    pub type_line: String,
    pub text: String,
    /// Colors from a color indicator printed on the face.
    pub color_indicator: ColorSet,
}

impl CardFace {
    /// Lowercased words of the type line, supertypes and subtypes included.
    pub fn type_words(&self) -> impl Iterator<Item = String> + '_ {
        self.type_line
            .split(|c: char| c.is_whitespace() || c == '—' || c == '-')
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
    }

    /// True if `word` appears in the type line, ignoring case.
    pub fn has_type(&self, word: &str) -> bool {
        self.type_words().any(|w| w.eq_ignore_ascii_case(word))
    }

    pub fn is_legendary_creature(&self) -> bool {
        self.has_type("legendary") && self.has_type("creature")
    }
}

// ---------------------------------------------------------------------------
// DeckLimit
// ---------------------------------------------------------------------------

/// How many copies of a card a Commander deck may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeckLimit {
    Single,
    /// Basic lands and cards saying "a deck can have any number of cards named".
    Unlimited,
    AtMost(u32),
}

impl DeckLimit {
    pub fn allows(self, copies: u32) -> bool {
        match self {
            DeckLimit::Single => copies <= 1,
            DeckLimit::Unlimited => true,
            DeckLimit::AtMost(n) => copies <= n,
        }
    }
}

impl fmt::Display for DeckLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckLimit::Single => f.write_str("1"),
            DeckLimit::Unlimited => f.write_str("unlimited"),
            DeckLimit::AtMost(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// CardRecord
// ---------------------------------------------------------------------------

/// One oracle card, collapsed from all of its printings.
///
/// Built once by the index and only ever handed out by shared reference.
#[derive(Debug, Clone, Serialize)]
pub struct CardRecord {
    pub id: CardId,
    /// Canonical name, `"Front // Back"` for multi-faced cards.
    pub name: String,
    /// Front face first; at most two faces.
    pub faces: Vec<CardFace>,
    /// Lowercased type words across all faces.
    pub types: BTreeSet<String>,
    /// Rules text of every face, one face per paragraph.
    pub oracle_text: String,
    pub color_identity: ColorSet,
    pub legalities: Legalities,
    /// Set codes the card was printed in.
    pub printings: BTreeSet<String>,
    pub oracle_id: Option<String>,
    pub layout: String,
    pub deck_limit: DeckLimit,
}

impl CardRecord {
    pub fn front_face(&self) -> &CardFace {
        // The index never builds a record without faces.
        &self.faces[0]
    }

    pub fn is_multi_faced(&self) -> bool {
        self.faces.len() > 1
    }

    pub fn has_type(&self, word: &str) -> bool {
        self.types.contains(&word.to_lowercase())
    }

    pub fn is_basic_land(&self) -> bool {
        self.front_face().has_type("basic") && self.front_face().has_type("land")
    }

    pub fn commander_legality(&self) -> LegalityStatus {
        self.legalities.commander()
    }
}

impl PartialEq for CardRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CardRecord {}
