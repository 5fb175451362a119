//! Manifest dependency walk.
//!
//! Starting from an entry chunk, follows static `imports` depth-first and
//! collects everything the page has to load up front. `dynamicImports` are
//! not followed: those chunks are fetched lazily at runtime.
//!
//! Output order is fixed:
//! 1. `modulepreload` for every statically reachable chunk except the root
//! 2. `style` for every stylesheet
//! 3. `raw-asset` for every other asset
//! 4. `script-module` for the root chunk
//!
//! Each chunk's own `css`/`assets` are collected when the chunk is visited,
//! before its imports, so the root's stylesheets come first.

use std::collections::HashSet;

use crate::core::{AssetDescriptor, AssetKind, Manifest};
use crate::resolver::ResolveError;

/// Ordered, de-duplicated list of paths.
#[derive(Debug, Default)]
struct OrderedPaths<'a> {
    seen: HashSet<&'a str>,
    paths: Vec<&'a str>,
}

impl<'a> OrderedPaths<'a> {
    fn extend(&mut self, paths: &'a [String]) {
        for path in paths {
            if self.seen.insert(path.as_str()) {
                self.paths.push(path.as_str());
            }
        }
    }
}

/// Collect the assets needed to load `entry`.
///
/// Fails with [`ResolveError::EntrypointNotFound`] if `entry`, or any key
/// reachable through `imports`, is missing from the manifest. Cycles are
/// tolerated; every chunk is visited once.
pub fn walk(manifest: &Manifest, entry: &str) -> Result<Vec<AssetDescriptor>, ResolveError> {
    let root = manifest
        .get(entry)
        .ok_or_else(|| ResolveError::EntrypointNotFound {
            entry: entry.to_string(),
            importer: None,
        })?;

    let mut visited: HashSet<&str> = HashSet::new();
    let mut preloads: Vec<&str> = Vec::new();
    let mut css = OrderedPaths::default();
    let mut assets = OrderedPaths::default();

    // (key, importer) pairs; popping in reverse push order gives pre-order DFS
    let mut stack: Vec<(&str, Option<&str>)> = vec![(entry, None)];

    while let Some((key, importer)) = stack.pop() {
        if !visited.insert(key) {
            continue;
        }

        let chunk = manifest
            .get(key)
            .ok_or_else(|| ResolveError::EntrypointNotFound {
                entry: key.to_string(),
                importer: importer.map(str::to_string),
            })?;

        tracing::trace!("Visiting chunk `{}`", key);

        if key != entry {
            preloads.push(chunk.file.as_str());
        }
        css.extend(&chunk.css);
        assets.extend(&chunk.assets);

        for import in chunk.imports.iter().rev() {
            if !visited.contains(import.as_str()) {
                stack.push((import.as_str(), Some(key)));
            }
        }
    }

    let mut output = Vec::with_capacity(preloads.len() + css.paths.len() + assets.paths.len() + 1);
    output.extend(
        preloads
            .into_iter()
            .map(|file| AssetDescriptor::new(AssetKind::ModulePreload, file)),
    );
    output.extend(
        css.paths
            .into_iter()
            .map(|file| AssetDescriptor::new(AssetKind::Style, file)),
    );
    output.extend(
        assets
            .paths
            .into_iter()
            .map(|file| AssetDescriptor::new(AssetKind::RawAsset, file)),
    );
    output.push(AssetDescriptor::new(AssetKind::ScriptModule, root.file.as_str()));

    Ok(output)
}
