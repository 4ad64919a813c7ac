//! Vocabulary pool store
//!
//! Loads the category -> concept-list vocabulary from a JSON file and
//! holds it for the process lifetime. The pool is immutable once
//! loaded; reloads (manual or from the background refresh task) swap
//! the whole structure atomically behind one `Arc`, so in-flight
//! requests keep the snapshot they started with.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

/// Category name -> ordered concept list. A `BTreeMap` keeps category
/// iteration order deterministic, which matters for the board path:
/// the default-category fallback feeds the shuffle, and the same seed
/// must produce the same permutation across runs.
pub type ConceptPool = BTreeMap<String, Vec<String>>;

pub struct PoolStore {
    path: Option<PathBuf>,
    pool: RwLock<Arc<ConceptPool>>,
}

impl PoolStore {
    /// Load the pool from `path`. A missing or unreadable file is a
    /// degraded mode, not a failure: the built-in core vocabulary is
    /// used so the system is never empty.
    pub fn load(path: PathBuf) -> Self {
        let pool = Arc::new(read_pool_file(&path));
        Self {
            path: Some(path),
            pool: RwLock::new(pool),
        }
    }

    /// Build a store around an in-memory pool (tests, embedded use).
    pub fn from_pool(pool: ConceptPool) -> Self {
        Self {
            path: None,
            pool: RwLock::new(Arc::new(pool)),
        }
    }

    /// Current pool snapshot. Cheap to take; holders see a consistent
    /// view even if a reload lands mid-request.
    pub fn snapshot(&self) -> Arc<ConceptPool> {
        Arc::clone(&self.pool.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// All category names, sorted.
    pub fn categories(&self) -> Vec<String> {
        self.snapshot().keys().cloned().collect()
    }

    /// Concatenate the concept lists of the requested categories in
    /// request order, skipping unknown categories.
    pub fn concepts_for(&self, categories: &[String]) -> Vec<String> {
        let pool = self.snapshot();
        let mut concepts = Vec::new();
        for cat in categories {
            if let Some(list) = pool.get(cat) {
                concepts.extend(list.iter().cloned());
            }
        }
        concepts
    }

    /// Re-read the pool file and swap the structure atomically.
    /// In-memory stores have nothing to reload.
    pub fn reload(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let fresh = Arc::new(read_pool_file(path));
        let count: usize = fresh.values().map(Vec::len).sum();
        let mut guard = self.pool.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
        info!(
            "Reloaded vocabulary pool: {} categories, {} concepts",
            guard.len(),
            count
        );
    }
}

fn read_pool_file(path: &PathBuf) -> ConceptPool {
    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str::<ConceptPool>(&text) {
            Ok(pool) if !pool.is_empty() => pool,
            Ok(_) => {
                warn!("Vocabulary pool {} is empty, using fallback pool", path.display());
                fallback_pool()
            }
            Err(e) => {
                warn!(
                    "Vocabulary pool {} unparseable ({}), using fallback pool",
                    path.display(),
                    e
                );
                fallback_pool()
            }
        },
        Err(_) => {
            warn!(
                "Vocabulary pool {} missing, using fallback pool",
                path.display()
            );
            fallback_pool()
        }
    }
}

/// Minimal built-in vocabulary so boards are never empty.
fn fallback_pool() -> ConceptPool {
    let core = ["I", "you", "help", "want", "more", "stop", "go"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut pool = BTreeMap::new();
    pool.insert("core".to_string(), core);
    pool
}
