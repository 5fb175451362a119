//! Turn a resolution request into the assets for one entrypoint.
//!
//! In production the manifest is loaded and walked; with the dev server
//! active the manifest is not touched at all, since the dev server resolves
//! module dependencies itself.

use url::Url;

use crate::core::{AssetDescriptor, AssetKind, AssetSink, Attributes, ResolutionRequest};
use crate::resolver::{
    dev_server_url, resolve_base_uri, resolve_entrypoint, should_use_dev_server, walk,
    ResolveError, DEV_CLIENT_PATH,
};
use crate::sources::ManifestStore;
use crate::util::{ConfigSource, EnvironmentProbe, RequestIntrospector};

/// Resolves requests against the host's configuration and environment.
pub struct AssetAssembler<'a> {
    store: &'a ManifestStore,
    config: &'a dyn ConfigSource,
    probe: &'a dyn EnvironmentProbe,
    introspector: &'a dyn RequestIntrospector,
}

impl<'a> AssetAssembler<'a> {
    pub fn new(
        store: &'a ManifestStore,
        config: &'a dyn ConfigSource,
        probe: &'a dyn EnvironmentProbe,
        introspector: &'a dyn RequestIntrospector,
    ) -> Self {
        AssetAssembler {
            store,
            config,
            probe,
            introspector,
        }
    }

    /// Resolve a request into ordered asset descriptors.
    pub fn assemble(&self, request: &ResolutionRequest) -> Result<Vec<AssetDescriptor>, ResolveError> {
        let mode = self.config.dev_server_mode();
        let mut assets = if should_use_dev_server(mode, self.probe) {
            tracing::debug!("Using dev server (mode: {})", mode);
            self.from_dev_server(request)?
        } else {
            tracing::debug!("Using manifest (mode: {})", mode);
            self.from_manifest(request)?
        };

        if request.priority {
            for asset in &mut assets {
                asset.emit_before_existing = true;
            }
        }

        Ok(assets)
    }

    /// Resolve a request and hand the assets to a sink. Returns how many
    /// assets were passed on.
    pub fn collect_into(
        &self,
        request: &ResolutionRequest,
        sink: &mut dyn AssetSink,
    ) -> Result<usize, ResolveError> {
        let assets = self.assemble(request)?;
        let count = assets.len();
        for asset in assets {
            sink.add_asset(asset);
        }
        Ok(count)
    }

    fn from_manifest(&self, request: &ResolutionRequest) -> Result<Vec<AssetDescriptor>, ResolveError> {
        let path = request
            .manifest
            .clone()
            .or_else(|| self.config.default_manifest())
            .ok_or(ResolveError::ManifestPathMissing)?;

        let manifest = self.store.load(&path)?;
        let entry = resolve_entrypoint(&manifest, request.entry.as_deref())?;
        let mut assets = walk(&manifest, &entry)?;

        let base = self.config.asset_base();
        for asset in &mut assets {
            if let Some(base) = base.as_deref() {
                asset.url = join_asset_base(base, &asset.url);
            }
            asset.apply_default_attributes();
            match asset.kind {
                AssetKind::ScriptModule => asset.merge_attributes(&request.script_tag_attributes),
                AssetKind::Style => asset.merge_attributes(&request.css_tag_attributes),
                _ => {}
            }
        }

        tracing::info!(
            "Resolved {} assets for `{}` from {}",
            assets.len(),
            entry,
            path.display()
        );

        Ok(assets)
    }

    fn from_dev_server(&self, request: &ResolutionRequest) -> Result<Vec<AssetDescriptor>, ResolveError> {
        let entry = request
            .entry
            .as_deref()
            .ok_or_else(|| ResolveError::AmbiguousEntrypoint { candidates: Vec::new() })?;

        let base = resolve_base_uri(&self.config.dev_server_uri(), self.introspector)?;
        tracing::info!("Loading `{}` from dev server {}", entry, base);

        Ok(vec![
            dev_asset(AssetKind::DevClient, &base, DEV_CLIENT_PATH, &request.dev_tag_attributes),
            dev_asset(AssetKind::DevEntry, &base, entry, &request.dev_tag_attributes),
        ])
    }
}

fn dev_asset(kind: AssetKind, base: &Url, path: &str, attributes: &Attributes) -> AssetDescriptor {
    let mut asset = AssetDescriptor::new(kind, dev_server_url(base, path));
    asset.merge_attributes(attributes);
    asset
}

fn join_asset_base(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
