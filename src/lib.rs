//! vite-assets - resolve Vite build output into page assets
//!
//! Given a Vite manifest (or a running dev server) and an entrypoint, this
//! crate computes the ordered list of scripts, stylesheets, preload hints
//! and static assets a page has to include. Rendering the tags is left to
//! the host, which receives [`AssetDescriptor`]s through an [`AssetSink`].
//!
//! ```rust,ignore
//! use vite_assets::util::config::{global_config_path, load_config, project_config_path};
//! use vite_assets::{AssetAssembler, ApplicationContext, ManifestStore, RequestOrigin,
//!     ResolutionRequest};
//!
//! let store = ManifestStore::new();
//! let config = load_config(
//!     &global_config_path().unwrap_or_default(),
//!     &project_config_path(".".as_ref()),
//! )?;
//! let context = ApplicationContext::from_env();
//! let origin = RequestOrigin::new("https", "example.com");
//!
//! let assets = AssetAssembler::new(&store, &config, &context, &origin)
//!     .assemble(&ResolutionRequest::new().with_entry("src/main.ts"))?;
//! ```

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only compiled for `cargo test`.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    asset::AssetDescriptor, asset::AssetKind, asset::Attributes, manifest::Manifest,
    manifest::ManifestEntry, request::ResolutionRequest, sink::AssetCollector, sink::AssetSink,
};

pub use ops::AssetAssembler;
pub use resolver::{DevServerMode, DevServerUri, ResolveError};
pub use sources::ManifestStore;
pub use util::{
    ApplicationContext, Config, ConfigSource, EnvironmentProbe, RequestIntrospector, RequestOrigin,
};
