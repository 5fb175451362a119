//! Caller input for a single resolution.

use std::path::PathBuf;

use crate::core::asset::Attributes;

/// Everything a template call passes in to get the tags for one entrypoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Manifest to read; falls back to the configured default
    pub manifest: Option<PathBuf>,

    /// Manifest key (production) or module path (dev server)
    pub entry: Option<String>,

    /// Extra attributes for dev server script tags
    pub dev_tag_attributes: Attributes,

    /// Extra attributes for the entry script tag
    pub script_tag_attributes: Attributes,

    /// Extra attributes for stylesheet links
    pub css_tag_attributes: Attributes,

    /// Emit ahead of assets other callers have already queued
    pub priority: bool,
}

impl ResolutionRequest {
    pub fn new() -> Self {
        ResolutionRequest::default()
    }

    /// Request a specific entry.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Read a specific manifest instead of the configured default.
    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest = Some(path.into());
        self
    }

    pub fn with_dev_tag_attributes(mut self, attributes: Attributes) -> Self {
        self.dev_tag_attributes = attributes;
        self
    }

    pub fn with_script_tag_attributes(mut self, attributes: Attributes) -> Self {
        self.script_tag_attributes = attributes;
        self
    }

    pub fn with_css_tag_attributes(mut self, attributes: Attributes) -> Self {
        self.css_tag_attributes = attributes;
        self
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }
}
