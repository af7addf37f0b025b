//! A swappable handle to the current card index.

use std::sync::{Arc, RwLock};

use crate::index::CardIndex;

/// Holds the index every validation reads from.
///
/// Readers take an `Arc` snapshot and keep using it for the whole request.
/// [`replace`](Self::replace) swaps in a fully built index under a short
/// write lock, so a reader sees either the old index or the new one and
/// never a partial build.
#[derive(Debug)]
pub struct CardCatalog {
    current: RwLock<Arc<CardIndex>>,
}

impl CardCatalog {
    pub fn new(index: CardIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// The index as of now.
    pub fn current(&self) -> Arc<CardIndex> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            // The lock only guards an Arc swap, which cannot leave it half-written.
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Install `index`, returning the one it replaces.
    pub fn replace(&self, index: CardIndex) -> Arc<CardIndex> {
        let next = Arc::new(index);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = std::mem::replace(&mut *guard, next);
        tracing::debug!(
            previous = previous.len(),
            current = guard.len(),
            "card index replaced"
        );
        previous
    }
}
