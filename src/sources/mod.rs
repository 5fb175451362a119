//! Where manifests come from.

pub mod store;

pub use store::ManifestStore;
