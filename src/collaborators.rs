//! Interfaces for the suggestion and pricing services, and the pure
//! bookkeeping done with their answers.
//!
//! Nothing here performs I/O. Implementations of [`SuggestionSource`] and
//! [`PriceSource`] live with the host application, which also owns retry,
//! timeout and caching policy.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolver::{Resolution, Resolver};

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// A recommended card for a commander, with popularity metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    /// Number of decks running the card, when the service reports it.
    pub inclusion: Option<u32>,
    pub synergy: Option<f64>,
}

impl Suggestion {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inclusion: None,
            synergy: None,
        }
    }
}

/// Source of deckbuilding suggestions keyed by a commander's canonical name.
pub trait SuggestionSource {
    fn suggestions(&self, commander_name: &str) -> Result<Vec<Suggestion>>;
}

// ---------------------------------------------------------------------------
// Prices
// ---------------------------------------------------------------------------

/// Source of per-card prices keyed by canonical name.
///
/// A `None` price means the service knows the card but has no price for it.
pub trait PriceSource {
    fn prices(&self, names: &[String]) -> Result<BTreeMap<String, Option<f64>>>;
}

// ---------------------------------------------------------------------------
// Collection comparison
// ---------------------------------------------------------------------------

/// Suggestions split by whether the user's collection already holds them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionComparison {
    pub owned: Vec<Suggestion>,
    pub missing: Vec<Suggestion>,
}

impl CollectionComparison {
    /// Names of the missing cards: the query set for a price lookup.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing.iter().map(|s| s.name.clone()).collect()
    }
}

/// Split `suggestions` into owned and missing against a pasted collection.
///
/// Collection lines go through `resolver`, so counts, set annotations,
/// case and accents do not matter. Suggestions are matched by the canonical
/// record they resolve to, falling back to their raw name.
pub fn compare_with_collection(
    resolver: &Resolver<'_>,
    suggestions: &[Suggestion],
    collection: &str,
) -> CollectionComparison {
    let mut owned_names: BTreeSet<String> = BTreeSet::new();
    for result in resolver.resolve_list(collection) {
        match result.resolution.card() {
            Some(card) => {
                owned_names.insert(card.name.clone());
            }
            None => {
                owned_names.insert(result.requested_name);
            }
        }
    }

    let mut comparison = CollectionComparison::default();
    for suggestion in suggestions {
        let canonical = match resolver.resolve_name(&suggestion.name) {
            Resolution::Resolved(card) => card.name.clone(),
            _ => suggestion.name.clone(),
        };
        if owned_names.contains(&canonical) {
            comparison.owned.push(suggestion.clone());
        } else {
            comparison.missing.push(suggestion.clone());
        }
    }
    comparison
}

// ---------------------------------------------------------------------------
// Cost estimate
// ---------------------------------------------------------------------------

/// Total price of a set of cards in a target currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostEstimate {
    /// Converted price per priced card, sorted by name.
    pub priced: BTreeMap<String, f64>,
    /// Cards the price source returned no price for.
    pub unpriced: Vec<String>,
    pub total: f64,
}

impl CostEstimate {
    /// Convert and sum `prices` with `exchange_rate` (target units per source unit).
    pub fn tally(prices: &BTreeMap<String, Option<f64>>, exchange_rate: f64) -> Self {
        let mut estimate = CostEstimate::default();
        for (name, price) in prices {
            match price {
                Some(price) => {
                    let converted = price * exchange_rate;
                    estimate.total += converted;
                    estimate.priced.insert(name.clone(), converted);
                }
                None => estimate.unpriced.push(name.clone()),
            }
        }
        estimate
    }
}
