//! Async wrapper around [`DeckChecker`] for use in async runtimes (Tokio, etc.).
//!
//! Loading the dataset and validating a deck are CPU-bound, so every
//! operation runs on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use commander_deck_check::AsyncDeckChecker;
//!
//! #[tokio::main]
//! async fn main() {
//!     let checker = AsyncDeckChecker::builder()
//!         .dataset_path("AllPrintings.json.gz")
//!         .build()
//!         .await
//!         .unwrap();
//!
//!     let report = checker
//!         .check("1 Sol Ring", &["Atraxa, Praetors' Voice"])
//!         .await
//!         .unwrap();
//!     println!("legal: {}", report.is_legal);
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{DeckCheckError, Result};
use crate::models::ValidationReport;
use crate::DeckChecker;

fn join_error(e: tokio::task::JoinError) -> DeckCheckError {
    DeckCheckError::InvalidArgument(format!("Task join error: {e}"))
}

// ---------------------------------------------------------------------------
// AsyncDeckCheckerBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncDeckChecker`].
#[derive(Default)]
pub struct AsyncDeckCheckerBuilder {
    dataset_path: Option<PathBuf>,
    fuzzy_threshold: Option<f64>,
}

impl AsyncDeckCheckerBuilder {
    /// Read `AllPrintings` from `path` (plain or `.gz`).
    pub fn dataset_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.dataset_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Minimum similarity a fuzzy match must reach.
    pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = Some(threshold);
        self
    }

    /// Take the dataset path and threshold from loaded settings.
    pub fn settings(mut self, settings: &Settings) -> Self {
        self.dataset_path = Some(settings.dataset_path());
        self.fuzzy_threshold = Some(settings.fuzzy_threshold);
        self
    }

    /// Load the dataset and build the index on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncDeckChecker> {
        tokio::task::spawn_blocking(move || {
            let mut builder = DeckChecker::builder();
            if let Some(path) = self.dataset_path {
                builder = builder.dataset_path(path);
            }
            if let Some(threshold) = self.fuzzy_threshold {
                builder = builder.fuzzy_threshold(threshold);
            }
            let checker = builder.build()?;
            Ok(AsyncDeckChecker {
                inner: Arc::new(checker),
            })
        })
        .await
        .map_err(join_error)?
    }
}

// ---------------------------------------------------------------------------
// AsyncDeckChecker
// ---------------------------------------------------------------------------

/// Async wrapper around [`DeckChecker`].
///
/// The checker is shared through an `Arc`; it needs no lock of its own since
/// index swaps already go through its catalog.
#[derive(Clone)]
pub struct AsyncDeckChecker {
    inner: Arc<DeckChecker>,
}

impl AsyncDeckChecker {
    /// Create a new builder for configuring the async checker.
    pub fn builder() -> AsyncDeckCheckerBuilder {
        AsyncDeckCheckerBuilder::default()
    }

    /// Wrap an existing checker.
    pub fn new(checker: DeckChecker) -> Self {
        Self {
            inner: Arc::new(checker),
        }
    }

    /// Run a sync checker operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&DeckChecker) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let checker = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&checker))
            .await
            .map_err(join_error)?
    }

    /// Resolve and validate a deck asynchronously.
    pub async fn check(&self, list: &str, commanders: &[&str]) -> Result<ValidationReport> {
        let list = list.to_string();
        let commanders: Vec<String> = commanders.iter().map(|c| c.to_string()).collect();
        self.run(move |c| {
            let names: Vec<&str> = commanders.iter().map(String::as_str).collect();
            c.check(&list, &names)
        })
        .await
    }

    /// Names of the cards in a pasted list that can be a commander.
    pub async fn eligible_commanders(&self, list: &str) -> Result<Vec<String>> {
        let list = list.to_string();
        self.run(move |c| Ok(c.eligible_commanders(&list))).await
    }

    /// Rebuild the index from `path`, or from the configured dataset path.
    pub async fn rebuild(&self, path: Option<PathBuf>) -> Result<usize> {
        self.run(move |c| c.rebuild(path.as_deref())).await
    }

    /// The synchronous checker underneath.
    pub fn checker(&self) -> &DeckChecker {
        &self.inner
    }
}
