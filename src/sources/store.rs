//! Manifest loading and caching.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::core::Manifest;
use crate::resolver::ResolveError;

/// Loads manifests and keeps them for the life of the store.
///
/// Entries are keyed by canonical path and never invalidated: a manifest
/// rewritten or removed on disk is only seen after [`ManifestStore::clear`]
/// or with a new store. Each requested path form is remembered as an alias,
/// so a repeat request is answered without touching the filesystem.
/// Concurrent first loads of one path may both read the file; the first
/// insert wins and every caller gets that value.
#[derive(Debug, Default)]
pub struct ManifestStore {
    cache: RwLock<Cache>,
}

#[derive(Debug, Default)]
struct Cache {
    manifests: HashMap<PathBuf, Arc<Manifest>>,
    /// Absolute requested path -> canonical key
    aliases: HashMap<PathBuf, PathBuf>,
}

impl Cache {
    fn lookup(&self, requested: &Path) -> Option<&Arc<Manifest>> {
        let key = self.aliases.get(requested)?;
        self.manifests.get(key)
    }
}

impl ManifestStore {
    /// Create an empty store.
    pub fn new() -> Self {
        ManifestStore::default()
    }

    /// Load a manifest, reading the file only on the first request for it.
    pub fn load(&self, path: &Path) -> Result<Arc<Manifest>, ResolveError> {
        let not_found = |source| ResolveError::ManifestNotFound {
            path: path.to_path_buf(),
            source,
        };

        let requested = std::path::absolute(path).map_err(not_found)?;
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.lookup(&requested) {
                tracing::trace!("Using cached manifest {}", requested.display());
                return Ok(Arc::clone(manifest));
            }
        }

        let key = std::fs::canonicalize(path).map_err(not_found)?;

        let cached = {
            let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
            let cached = cache.manifests.get(&key).cloned();
            if cached.is_some() {
                cache.aliases.insert(requested.clone(), key.clone());
            }
            cached
        };
        if let Some(manifest) = cached {
            tracing::trace!("Using cached manifest {}", key.display());
            return Ok(manifest);
        }

        let manifest = Arc::new(read_manifest(&key)?);

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.aliases.insert(requested, key.clone());
        Ok(Arc::clone(cache.manifests.entry(key).or_insert(manifest)))
    }

    /// Drop all cached manifests.
    pub fn clear(&self) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.manifests.clear();
        cache.aliases.clear();
    }

    /// Number of cached manifests.
    pub fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .manifests
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_manifest(path: &Path) -> Result<Manifest, ResolveError> {
    tracing::debug!("Loading manifest {}", path.display());

    let contents = std::fs::read_to_string(path).map_err(|source| ResolveError::ManifestNotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest = Manifest::from_json(&contents).map_err(|source| ResolveError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })?;

    for cycle in manifest.static_import_cycles() {
        tracing::warn!(
            "Manifest {} has an import cycle: {}",
            path.display(),
            cycle.join(" -> ")
        );
    }

    Ok(manifest)
}
