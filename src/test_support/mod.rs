//! Test utilities and mocks for unit tests.
//!
//! Provides stand-ins for the host collaborators (configuration and
//! request access) and helpers for writing manifests to disk.

pub mod fixtures;

use std::cell::Cell;
use std::path::{Path, PathBuf};

use url::Url;

use crate::resolver::{DevServerMode, DevServerUri, ResolveError};
use crate::util::{ConfigSource, RequestIntrospector};

/// Write a manifest into `dir` and return its path.
pub fn write_manifest(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("manifest.json");
    std::fs::write(&path, contents).unwrap();
    path
}

/// Fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig {
    pub default_manifest: Option<PathBuf>,
    pub mode: DevServerMode,
    pub uri: DevServerUri,
    pub asset_base: Option<String>,
}

impl StaticConfig {
    pub fn new(mode: DevServerMode, uri: DevServerUri) -> Self {
        StaticConfig {
            mode,
            uri,
            ..StaticConfig::default()
        }
    }

    /// Dev server switched off.
    pub fn production() -> Self {
        StaticConfig::new(DevServerMode::Fixed(false), DevServerUri::Auto)
    }
}

impl ConfigSource for StaticConfig {
    fn default_manifest(&self) -> Option<PathBuf> {
        self.default_manifest.clone()
    }

    fn dev_server_mode(&self) -> DevServerMode {
        self.mode
    }

    fn dev_server_uri(&self) -> DevServerUri {
        self.uri.clone()
    }

    fn asset_base(&self) -> Option<String> {
        self.asset_base.clone()
    }
}

/// Request introspector that returns a fixed URI and counts calls.
#[derive(Debug)]
pub struct CountingIntrospector {
    uri: String,
    calls: Cell<usize>,
}

impl CountingIntrospector {
    pub fn new(uri: impl Into<String>) -> Self {
        CountingIntrospector {
            uri: uri.into(),
            calls: Cell::new(0),
        }
    }

    /// How often the URI was derived.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RequestIntrospector for CountingIntrospector {
    fn derive_dev_server_uri(&self) -> Result<Url, ResolveError> {
        self.calls.set(self.calls.get() + 1);
        Url::parse(&self.uri).map_err(|source| ResolveError::InvalidDevServerUri {
            uri: self.uri.clone(),
            source,
        })
    }
}
