//! The deduplicated, read-only card index.
//!
//! Every printing of an oracle card collapses into one [`CardRecord`]. Records
//! live in a dense vector sorted by canonical name; the lookup maps only hold
//! [`CardId`]s into it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::color::ColorSet;
use crate::dataset;
use crate::error::{DeckCheckError, Result};
use crate::models::{
    AllPrintings, CardEntry, CardFace, CardId, CardPrinting, CardRecord, DeckLimit,
    LegalityStatus, Legalities,
};
use crate::normalize::{normalize_name, FACE_SEPARATOR};
use crate::oracle;

/// Layouts of card objects that never go in a deck.
const NON_GAME_LAYOUTS: &[&str] = &["art_series", "token", "double_faced_token", "emblem"];

// ---------------------------------------------------------------------------
// OracleBuilder: accumulates printings of one oracle name
// ---------------------------------------------------------------------------

#[derive(Default)]
struct OracleBuilder {
    /// Set that supplies the faces: the first one the name was seen in.
    face_set: Option<String>,
    faces: BTreeMap<String, CardFace>,
    layout: Option<String>,
    legalities: Legalities,
    printings: BTreeSet<String>,
    uuids: Vec<String>,
    oracle_id: Option<String>,
    alternative_deck_limit: bool,
    dataset_identity: Option<ColorSet>,
}

impl OracleBuilder {
    fn add(&mut self, set_code: &str, card: &CardPrinting, type_line: &str) {
        let set = card.set_code.as_deref().unwrap_or(set_code);
        self.printings.insert(set.to_string());
        self.printings.extend(card.printings.iter().cloned());
        if let Some(uuid) = &card.uuid {
            self.uuids.push(uuid.clone());
        }
        if self.oracle_id.is_none() {
            self.oracle_id = card
                .identifiers
                .as_ref()
                .and_then(|ids| ids.scryfall_oracle_id.clone());
        }
        self.alternative_deck_limit |= card.has_alternative_deck_limit.unwrap_or(false);

        for (format, status) in &card.legalities {
            match status.parse::<LegalityStatus>() {
                Ok(status) => self.legalities.merge(format, status),
                Err(e) => tracing::warn!(card = ?card.name, format = %format, "{e}"),
            }
        }

        let face_set = self.face_set.get_or_insert_with(|| set.to_string());
        if face_set.as_str() != set {
            return;
        }
        if self.layout.is_none() {
            self.layout = card.layout.clone();
        }
        if self.dataset_identity.is_none() {
            self.dataset_identity = Some(ColorSet::from_symbols(&card.color_identity.concat()));
        }
        let side = card.side.clone().unwrap_or_else(|| "a".to_string());
        self.faces.entry(side).or_insert_with(|| CardFace {
            name: card
                .face_name
                .clone()
                .or_else(|| card.name.clone())
                .unwrap_or_default(),
            mana_cost: card.mana_cost.clone().unwrap_or_default(),
            type_line: type_line.to_string(),
            text: card.text.clone().unwrap_or_default(),
            color_indicator: card
                .color_indicator
                .as_ref()
                .map(|c| ColorSet::from_symbols(&c.concat()))
                .unwrap_or_default(),
        });
    }

    fn finish(self, id: CardId, name: String) -> (CardRecord, Vec<String>) {
        let faces: Vec<CardFace> = self.faces.into_values().take(2).collect();

        let types = faces.iter().flat_map(|f| f.type_words()).collect();
        let oracle_text = faces
            .iter()
            .map(|f| f.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        let color_identity = faces.iter().fold(ColorSet::COLORLESS, |acc, f| {
            acc.union(oracle::face_color_identity(
                &f.mana_cost,
                &f.text,
                f.color_indicator,
            ))
        });
        if let Some(from_dataset) = self.dataset_identity {
            if from_dataset != color_identity {
                tracing::debug!(
                    card = %name,
                    derived = %color_identity,
                    dataset = %from_dataset,
                    "derived color identity differs from dataset"
                );
            }
        }

        let is_basic_land = faces
            .first()
            .map(|f| f.has_type("basic") && f.has_type("land"))
            .unwrap_or(false);
        let deck_limit = if is_basic_land {
            DeckLimit::Unlimited
        } else {
            match oracle::deck_limit_from_text(&oracle_text) {
                Some(limit) => limit,
                None if self.alternative_deck_limit => DeckLimit::Unlimited,
                None => DeckLimit::Single,
            }
        };

        let mut ids = self.uuids;
        ids.extend(self.oracle_id.clone());

        let record = CardRecord {
            id,
            name,
            faces,
            types,
            oracle_text,
            color_identity,
            legalities: self.legalities,
            printings: self.printings,
            oracle_id: self.oracle_id,
            layout: self.layout.unwrap_or_else(|| "normal".to_string()),
            deck_limit,
        };
        (record, ids)
    }
}

// ---------------------------------------------------------------------------
// CardIndex
// ---------------------------------------------------------------------------

/// A normalized name the resolver may fuzzy-match against.
#[derive(Debug, Clone)]
pub(crate) struct FuzzyKey {
    pub(crate) normalized: Vec<char>,
    pub(crate) display: String,
    pub(crate) id: CardId,
}

/// Lookup structures over every oracle card in the dataset.
///
/// Built once and never mutated; share it by reference or `Arc`.
#[derive(Debug)]
pub struct CardIndex {
    records: Vec<CardRecord>,
    by_name: HashMap<String, CardId>,
    by_normalized: HashMap<String, Vec<CardId>>,
    by_face: HashMap<String, Vec<CardId>>,
    by_id: HashMap<String, CardId>,
    fuzzy_keys: Vec<FuzzyKey>,
    printing_count: usize,
}

impl CardIndex {
    /// Load the dataset at `path` and build the index from it.
    ///
    /// The parsed dataset is dropped before this returns.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let dataset = dataset::load_all_printings(path)?;
        Self::build(dataset)
    }

    /// Build the index from a parsed dataset.
    ///
    /// Card objects without a `name` or `type` are skipped, as are tokens,
    /// emblems and art series cards. If nothing usable remains the dataset is
    /// rejected.
    pub fn build(dataset: AllPrintings) -> Result<Self> {
        let mut builders: BTreeMap<String, OracleBuilder> = BTreeMap::new();
        let mut printing_count = 0usize;
        let mut skipped = 0usize;
        let mut non_game = 0usize;

        for (set_code, set) in &dataset.data {
            for entry in &set.cards {
                let card = match entry {
                    CardEntry::Card(card) => card,
                    CardEntry::Malformed(_) => {
                        skipped += 1;
                        tracing::warn!(set = %set_code, "skipping malformed card object");
                        continue;
                    }
                };
                let (Some(name), Some(type_line)) = (&card.name, &card.type_field) else {
                    skipped += 1;
                    tracing::warn!(set = %set_code, card = ?card.name, "skipping card without name or type");
                    continue;
                };
                if name.trim().is_empty() {
                    skipped += 1;
                    continue;
                }
                if let Some(layout) = card.layout.as_deref() {
                    if NON_GAME_LAYOUTS.contains(&layout) {
                        non_game += 1;
                        tracing::debug!(set = %set_code, card = %name, layout, "skipping non-game card object");
                        continue;
                    }
                }
                printing_count += 1;
                builders
                    .entry(name.clone())
                    .or_default()
                    .add(set_code, card, type_line);
            }
        }

        if builders.is_empty() {
            return Err(DeckCheckError::Dataset(format!(
                "no usable card records ({} card objects skipped, {} non-game)",
                skipped, non_game
            )));
        }

        let mut index = CardIndex {
            records: Vec::with_capacity(builders.len()),
            by_name: HashMap::with_capacity(builders.len()),
            by_normalized: HashMap::with_capacity(builders.len()),
            by_face: HashMap::new(),
            by_id: HashMap::new(),
            fuzzy_keys: Vec::with_capacity(builders.len()),
            printing_count,
        };

        for (i, (name, builder)) in builders.into_iter().enumerate() {
            let (record, ids) = builder.finish(CardId(i), name);
            index.insert(record, ids);
        }
        index
            .fuzzy_keys
            .sort_by(|a, b| a.normalized.cmp(&b.normalized).then(a.id.cmp(&b.id)));

        tracing::info!(
            records = index.records.len(),
            printings = printing_count,
            skipped,
            non_game,
            "card index built"
        );
        Ok(index)
    }

    fn insert(&mut self, record: CardRecord, ids: Vec<String>) {
        let id = record.id;
        let normalized = normalize_name(&record.name);

        self.by_name.insert(record.name.clone(), id);
        push_unique(self.by_normalized.entry(normalized.clone()).or_default(), id);
        self.fuzzy_keys.push(FuzzyKey {
            normalized: normalized.chars().collect(),
            display: record.name.clone(),
            id,
        });

        if record.is_multi_faced() || record.name.contains(FACE_SEPARATOR) {
            let mut face_names: Vec<String> = record.faces.iter().map(|f| f.name.clone()).collect();
            face_names.extend(record.name.split(FACE_SEPARATOR).map(str::to_string));
            face_names.sort();
            face_names.dedup();
            for face_name in face_names {
                let key = normalize_name(&face_name);
                if key.is_empty() || key == normalized {
                    continue;
                }
                push_unique(self.by_face.entry(key.clone()).or_default(), id);
                self.fuzzy_keys.push(FuzzyKey {
                    normalized: key.chars().collect(),
                    display: face_name,
                    id,
                });
            }
        }

        for key in ids {
            self.by_id.entry(key).or_insert(id);
        }
        self.records.push(record);
    }

    // -- Lookups -------------------------------------------------------------

    /// Record whose canonical name is exactly `name`.
    pub fn lookup_exact(&self, name: &str) -> Option<&CardRecord> {
        self.by_name.get(name).map(|id| self.get(*id))
    }

    /// Records matching an already-normalized name.
    ///
    /// Full-name matches win; face names of multi-faced cards are consulted
    /// only when no full name matches. More than one record means the name
    /// is ambiguous. Results are ordered by canonical name.
    pub fn lookup_normalized(&self, normalized: &str) -> Vec<&CardRecord> {
        let ids = self
            .by_normalized
            .get(normalized)
            .or_else(|| self.by_face.get(normalized));
        ids.map(|ids| ids.iter().map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// Record by printing UUID or Scryfall oracle id.
    pub fn lookup_id(&self, id: &str) -> Option<&CardRecord> {
        self.by_id.get(id).map(|id| self.get(*id))
    }

    pub fn get(&self, id: CardId) -> &CardRecord {
        &self.records[id.0]
    }

    /// Number of oracle records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of card objects that were folded into records.
    pub fn printing_count(&self) -> usize {
        self.printing_count
    }

    /// All records in canonical-name order.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.records.iter()
    }

    pub(crate) fn fuzzy_keys(&self) -> &[FuzzyKey] {
        &self.fuzzy_keys
    }
}

fn push_unique(ids: &mut Vec<CardId>, id: CardId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
