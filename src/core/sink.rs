//! Destination for resolved assets.
//!
//! The host owns HTML rendering; it only has to accept descriptors through
//! [`AssetSink`]. [`AssetCollector`] is an in-memory sink that keeps the
//! placement rules so hosts without their own queue can use it directly.

use crate::core::asset::{AssetDescriptor, AssetKind};

/// Receives assets as they are resolved.
pub trait AssetSink {
    /// Queue an asset, honoring `emit_before_existing`.
    fn add_asset(&mut self, asset: AssetDescriptor);
}

/// Ordered, de-duplicated asset queue.
#[derive(Debug, Clone, Default)]
pub struct AssetCollector {
    assets: Vec<AssetDescriptor>,

    /// Number of leading assets that were added with priority
    prioritized: usize,
}

impl AssetCollector {
    pub fn new() -> Self {
        AssetCollector::default()
    }

    /// Check whether an asset with this kind and URL is already queued.
    pub fn contains(&self, kind: AssetKind, url: &str) -> bool {
        self.assets.iter().any(|a| a.kind == kind && a.url == url)
    }

    /// Queued assets in output order.
    pub fn assets(&self) -> &[AssetDescriptor] {
        &self.assets
    }

    /// Queued assets of one kind, in output order.
    pub fn of_kind(&self, kind: AssetKind) -> impl Iterator<Item = &AssetDescriptor> {
        self.assets.iter().filter(move |a| a.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn into_assets(self) -> Vec<AssetDescriptor> {
        self.assets
    }
}

impl AssetSink for AssetCollector {
    fn add_asset(&mut self, asset: AssetDescriptor) {
        if self.contains(asset.kind, &asset.url) {
            tracing::trace!("Skipping duplicate {} {}", asset.kind, asset.url);
            return;
        }

        if asset.emit_before_existing {
            self.assets.insert(self.prioritized, asset);
            self.prioritized += 1;
        } else {
            self.assets.push(asset);
        }
    }
}

impl AssetSink for Vec<AssetDescriptor> {
    fn add_asset(&mut self, asset: AssetDescriptor) {
        self.push(asset);
    }
}
