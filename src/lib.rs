//! Commander deck checking over the MTGJSON `AllPrintings` dataset.
//!
//! Loads every printing into an in-memory [`CardIndex`] keyed by oracle
//! name, resolves pasted deck lists against it (exact, accent-folded, then
//! fuzzy), decides which cards can lead a deck, and validates a deck against
//! the Commander construction rules.
//!
//! # Quick start
//!
//! ```no_run
//! use commander_deck_check::DeckChecker;
//!
//! let checker = DeckChecker::builder()
//!     .dataset_path("AllPrintings.json.gz")
//!     .build()
//!     .unwrap();
//!
//! let report = checker
//!     .check("1 Sol Ring\n1 Command Tower", &["Atraxa, Praetors' Voice"])
//!     .unwrap();
//! for violation in &report.violations {
//!     println!("{violation}");
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod collaborators;
pub mod color;
pub mod commander;
pub mod config;
pub mod dataset;
pub mod error;
pub mod index;
pub mod models;
pub mod normalize;
pub mod oracle;
pub mod resolver;
pub mod validator;

#[cfg(feature = "async")]
pub use async_client::AsyncDeckChecker;
pub use catalog::CardCatalog;
pub use collaborators::{
    compare_with_collection, CollectionComparison, CostEstimate, PriceSource, Suggestion,
    SuggestionSource,
};
pub use color::{Color, ColorSet};
pub use commander::{
    can_pair_as_commanders, color_identity_of, eligible_commanders, is_eligible_commander,
    pairing_between, pairing_candidates, CommanderSelection, Pairing,
};
pub use config::Settings;
pub use error::{DeckCheckError, Result};
pub use index::CardIndex;
pub use resolver::{Resolution, ResolutionResult, Resolver};
pub use validator::DeckValidator;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::models::{CardRecord, DeckList, FuzzyMatch, ValidationReport};

// ---------------------------------------------------------------------------
// DeckCheckerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`DeckChecker`].
///
/// Use [`DeckChecker::builder()`] to obtain one, chain configuration methods,
/// and call [`build()`](DeckCheckerBuilder::build) to load the dataset.
pub struct DeckCheckerBuilder {
    dataset_path: Option<PathBuf>,
    fuzzy_threshold: f64,
}

impl Default for DeckCheckerBuilder {
    fn default() -> Self {
        Self {
            dataset_path: None,
            fuzzy_threshold: config::DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

impl DeckCheckerBuilder {
    /// Read `AllPrintings` from `path` (plain or `.gz`).
    ///
    /// If not set, `AllPrintings.json` under the platform data directory is
    /// used (e.g. `~/.local/share/commander-deck-check` on Linux).
    pub fn dataset_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dataset_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Minimum similarity in `(0, 1]` a fuzzy match must reach.
    ///
    /// Defaults to 0.85.
    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    /// Take the dataset path and threshold from loaded settings.
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.dataset_path = Some(settings.dataset_path());
        self.fuzzy_threshold = settings.fuzzy_threshold;
        self
    }

    /// Load the dataset and build the index.
    ///
    /// Parsing the full `AllPrintings` file takes a few seconds; call this
    /// once at startup.
    pub fn build(self) -> Result<DeckChecker> {
        config::check_fuzzy_threshold(self.fuzzy_threshold)?;
        let dataset_path = self
            .dataset_path
            .unwrap_or_else(config::default_dataset_path);
        let index = CardIndex::from_path(&dataset_path)?;
        Ok(DeckChecker {
            catalog: CardCatalog::new(index),
            dataset_path,
            fuzzy_threshold: self.fuzzy_threshold,
        })
    }
}

// ---------------------------------------------------------------------------
// DeckChecker
// ---------------------------------------------------------------------------

/// The main entry point: a shared card index plus the operations over it.
///
/// Safe to share between threads. Every call works on a snapshot of the
/// index taken when it starts, so a concurrent [`rebuild`](Self::rebuild)
/// never disturbs it.
pub struct DeckChecker {
    catalog: CardCatalog,
    dataset_path: PathBuf,
    fuzzy_threshold: f64,
}

impl DeckChecker {
    /// Create a new builder for configuring the checker.
    pub fn builder() -> DeckCheckerBuilder {
        DeckCheckerBuilder::default()
    }

    /// Wrap an index that was built elsewhere.
    pub fn from_index(index: CardIndex) -> Self {
        Self {
            catalog: CardCatalog::new(index),
            dataset_path: config::default_dataset_path(),
            fuzzy_threshold: config::DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// The current index snapshot.
    pub fn index(&self) -> Arc<CardIndex> {
        self.catalog.current()
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn fuzzy_threshold(&self) -> f64 {
        self.fuzzy_threshold
    }

    /// Rebuild the index from `path`, or from the configured dataset path.
    ///
    /// The new index is built before the swap; on error the current index
    /// stays in place. Returns the number of oracle cards now indexed.
    pub fn rebuild(&self, path: Option<&Path>) -> Result<usize> {
        let path = path.unwrap_or(&self.dataset_path);
        let index = CardIndex::from_path(path)?;
        let count = index.len();
        self.catalog.replace(index);
        tracing::info!(cards = count, path = %path.display(), "card index rebuilt");
        Ok(count)
    }

    /// Resolve every line of a pasted list.
    pub fn resolve_list(&self, text: &str) -> Vec<OwnedResolution> {
        let index = self.index();
        let resolver = self.resolver(&index);
        resolver
            .resolve_list(text)
            .iter()
            .map(OwnedResolution::from)
            .collect()
    }

    /// Names of the cards in a pasted list that can be a commander.
    pub fn eligible_commanders(&self, text: &str) -> Vec<String> {
        let index = self.index();
        let resolver = self.resolver(&index);
        let results = resolver.resolve_list(text);
        eligible_commanders(results.iter().filter_map(|r| r.resolution.card()))
            .into_iter()
            .map(|card| card.name.clone())
            .collect()
    }

    /// Names of indexed cards that can share the command zone with `commander`.
    pub fn pairing_candidates(&self, commander: &str) -> Result<Vec<String>> {
        let index = self.index();
        let resolver = self.resolver(&index);
        let (card, _) = resolve_commander(&resolver, commander)?;
        Ok(pairing_candidates(card, index.iter())
            .into_iter()
            .map(|c| c.name.clone())
            .collect())
    }

    /// Resolve `list` and `commanders`, then validate the deck.
    ///
    /// Commander names must resolve to a single card; an unknown name is a
    /// [`DeckCheckError::NotFound`], an ambiguous one an
    /// [`DeckCheckError::InvalidArgument`]. A fuzzily matched commander is
    /// used and listed in the report's `fuzzy_matches`. Unresolved deck lines
    /// do not fail the call; they are listed in the report and make it illegal.
    pub fn check(&self, list: &str, commanders: &[&str]) -> Result<ValidationReport> {
        let index = self.index();
        let resolver = self.resolver(&index);
        let mut commander_cards = Vec::with_capacity(commanders.len());
        let mut commander_guesses = Vec::new();
        for name in commanders {
            let (card, guess) = resolve_commander(&resolver, name)?;
            commander_cards.push(card);
            commander_guesses.extend(guess);
        }

        let results = resolver.resolve_list(list);
        let deck = DeckList::from_resolutions(&results);
        let mut report = DeckValidator::new().validate(&deck, &commander_cards)?;
        // Guessed commanders are listed ahead of guessed deck lines.
        report.fuzzy_matches.splice(0..0, commander_guesses);
        tracing::debug!(
            commanders = ?report.commanders,
            deck_size = report.deck_size,
            violations = report.violations.len(),
            legal = report.is_legal,
            "deck checked"
        );
        Ok(report)
    }

    /// Split `suggestions` into owned and missing against a pasted collection.
    pub fn compare_collection(
        &self,
        suggestions: &[Suggestion],
        collection: &str,
    ) -> CollectionComparison {
        let index = self.index();
        compare_with_collection(&self.resolver(&index), suggestions, collection)
    }

    fn resolver<'a>(&self, index: &'a CardIndex) -> Resolver<'a> {
        Resolver::with_checked_threshold(index, self.fuzzy_threshold)
    }
}

/// A commander name must name one card. A fuzzy match is accepted and
/// returned alongside so it can be reported for confirmation.
fn resolve_commander<'a>(
    resolver: &Resolver<'a>,
    name: &str,
) -> Result<(&'a CardRecord, Option<FuzzyMatch>)> {
    match resolver.resolve_name(name.trim()) {
        Resolution::Resolved(card) => Ok((card, None)),
        Resolution::FuzzyMatched {
            card,
            matched_name,
            similarity,
        } => {
            tracing::debug!(requested = %name, matched = %card.name, similarity, "commander fuzzy matched");
            Ok((
                card,
                Some(FuzzyMatch {
                    requested_name: name.trim().to_string(),
                    matched_name,
                    similarity,
                }),
            ))
        }
        Resolution::Ambiguous(cards) => Err(DeckCheckError::InvalidArgument(format!(
            "commander '{}' is ambiguous: {}",
            name,
            cards
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
        Resolution::Unresolved => Err(DeckCheckError::NotFound(format!(
            "commander '{name}' not found"
        ))),
    }
}

// ---------------------------------------------------------------------------
// OwnedResolution
// ---------------------------------------------------------------------------

/// A resolved line detached from the index snapshot it came from.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OwnedResolution {
    pub line: String,
    pub requested_name: String,
    pub count: u32,
    /// Canonical name, when the line resolved to exactly one card.
    pub card_name: Option<String>,
    /// Similarity of a fuzzy match.
    pub similarity: Option<f64>,
    /// Candidate names when the line was ambiguous.
    pub candidates: Vec<String>,
}

impl From<&ResolutionResult<'_>> for OwnedResolution {
    fn from(result: &ResolutionResult<'_>) -> Self {
        let (similarity, candidates) = match &result.resolution {
            Resolution::FuzzyMatched { similarity, .. } => (Some(*similarity), Vec::new()),
            Resolution::Ambiguous(cards) => {
                (None, cards.iter().map(|c| c.name.clone()).collect())
            }
            _ => (None, Vec::new()),
        };
        Self {
            line: result.line.clone(),
            requested_name: result.requested_name.clone(),
            count: result.count,
            card_name: result.resolution.card().map(|c| c.name.clone()),
            similarity,
            candidates,
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for DeckChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self.index();
        write!(
            f,
            "DeckChecker(dataset={}, cards={}, printings={}, fuzzy_threshold={})",
            self.dataset_path.display(),
            index.len(),
            index.printing_count(),
            self.fuzzy_threshold
        )
    }
}
