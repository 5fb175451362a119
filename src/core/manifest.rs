//! Build manifest parsing and schema.
//!
//! The manifest is the JSON document Vite writes next to its build output
//! (`.vite/manifest.json`). Each top-level key is a source-relative chunk
//! name; each value describes the emitted file and its dependencies.

use std::collections::HashMap;
use std::fmt;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A single chunk record from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Emitted file, relative to the build output directory
    pub file: String,

    /// Source path this chunk was built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    /// Chunk name assigned by the bundler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Whether the chunk is a page entrypoint
    #[serde(default)]
    pub is_entry: bool,

    /// Whether the chunk is only reachable through `import()`
    #[serde(default)]
    pub is_dynamic_entry: bool,

    /// Statically imported chunks (manifest keys)
    #[serde(default)]
    pub imports: Vec<String>,

    /// Lazily imported chunks (manifest keys); never preloaded
    #[serde(default)]
    pub dynamic_imports: Vec<String>,

    /// Stylesheets emitted for this chunk
    #[serde(default)]
    pub css: Vec<String>,

    /// Other static assets referenced by this chunk
    #[serde(default)]
    pub assets: Vec<String>,
}

impl ManifestEntry {
    /// Create an entry for the given output file with no dependencies.
    pub fn new(file: impl Into<String>) -> Self {
        ManifestEntry {
            file: file.into(),
            src: None,
            name: None,
            is_entry: false,
            is_dynamic_entry: false,
            imports: Vec::new(),
            dynamic_imports: Vec::new(),
            css: Vec::new(),
            assets: Vec::new(),
        }
    }
}

/// Kind of edge in the manifest import graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Static,
    Dynamic,
}

/// The parsed manifest.
///
/// Keys keep the order they appear in the document; that order is the
/// tie-break whenever a caller asks for "the" entrypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, ManifestEntry)>,
    index: HashMap<String, usize>,
}

impl Manifest {
    /// Create an empty manifest.
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Parse a manifest document.
    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Insert or replace an entry. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, entry: ManifestEntry) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, entry));
            }
        }
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Check whether the manifest contains a key.
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Keys of all entries flagged `isEntry`, in document order.
    pub fn entrypoints(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, entry)| entry.is_entry)
            .map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the import graph. Edges to keys missing from the manifest are
    /// left out; the walker reports those when it reaches them.
    pub fn import_graph(&self) -> DiGraph<&str, ImportKind> {
        let mut graph = DiGraph::new();
        let nodes: Vec<NodeIndex> = self.iter().map(|(key, _)| graph.add_node(key)).collect();

        for (pos, (_, entry)) in self.entries.iter().enumerate() {
            let edges = entry
                .imports
                .iter()
                .map(|k| (k, ImportKind::Static))
                .chain(entry.dynamic_imports.iter().map(|k| (k, ImportKind::Dynamic)));

            for (target, kind) in edges {
                if let Some(&to) = self.index.get(target) {
                    graph.add_edge(nodes[pos], nodes[to], kind);
                }
            }
        }

        graph
    }

    /// Groups of keys that statically import each other in a cycle.
    pub fn static_import_cycles(&self) -> Vec<Vec<String>> {
        let mut graph = self.import_graph();
        graph.retain_edges(|g, e| g[e] == ImportKind::Static);

        tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .map(|scc| scc.into_iter().map(|n| graph[n].to_string()).collect())
            .collect()
    }
}

impl<'de> Deserialize<'de> for Manifest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ManifestVisitor;

        impl<'de> Visitor<'de> for ManifestVisitor {
            type Value = Manifest;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of chunk names to manifest entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Manifest, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut manifest = Manifest::new();
                while let Some(key) = map.next_key::<String>()? {
                    let entry: ManifestEntry = map
                        .next_value()
                        .map_err(|e| de::Error::custom(format!("entry `{}`: {}", key, e)))?;
                    manifest.insert(key, entry);
                }
                Ok(manifest)
            }
        }

        deserializer.deserialize_map(ManifestVisitor)
    }
}
