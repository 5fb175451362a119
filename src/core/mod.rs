//! Core data structures.
//!
//! - Manifest schema (chunks and their dependencies)
//! - Asset descriptors and attributes
//! - The per-call resolution request
//! - The sink resolved assets are handed to

pub mod asset;
pub mod manifest;
pub mod request;
pub mod sink;

pub use asset::{attributes, AssetDescriptor, AssetKind, Attributes};
pub use manifest::{ImportKind, Manifest, ManifestEntry};
pub use request::ResolutionRequest;
pub use sink::{AssetCollector, AssetSink};
