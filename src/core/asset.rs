//! Asset descriptors handed to the host page.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// HTML attributes attached to a tag, kept sorted for stable output.
pub type Attributes = BTreeMap<String, String>;

/// What kind of tag the host should render for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetKind {
    /// `<script type="module" src>` for the entry chunk
    ScriptModule,
    /// `<link rel="stylesheet" href>`
    Style,
    /// `<link rel="modulepreload" href>`
    ModulePreload,
    /// Static asset referenced by a chunk (fonts, images, ...)
    RawAsset,
    /// The dev server's client script
    DevClient,
    /// An entry module served unbundled by the dev server
    DevEntry,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::ScriptModule => "script-module",
            AssetKind::Style => "style",
            AssetKind::ModulePreload => "modulepreload",
            AssetKind::RawAsset => "raw-asset",
            AssetKind::DevClient => "dev-client",
            AssetKind::DevEntry => "dev-entry",
        }
    }

    /// Attributes the tag itself is made of. Callers cannot set these.
    pub fn structural_attributes(&self) -> &'static [&'static str] {
        match self {
            AssetKind::ScriptModule | AssetKind::DevClient | AssetKind::DevEntry => &["src", "type"],
            AssetKind::Style | AssetKind::ModulePreload => &["href", "rel"],
            AssetKind::RawAsset => &["href"],
        }
    }

    /// Attributes the bundler puts on its own tags; callers may override them.
    pub fn default_attributes(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            AssetKind::ScriptModule | AssetKind::Style | AssetKind::ModulePreload => {
                &[("crossorigin", "")]
            }
            AssetKind::RawAsset | AssetKind::DevClient | AssetKind::DevEntry => &[],
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One asset the host page needs in order to load an entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDescriptor {
    pub kind: AssetKind,

    /// Absolute or server-relative URL
    pub url: String,

    pub attributes: Attributes,

    /// Place ahead of assets already queued by other callers
    pub emit_before_existing: bool,
}

impl AssetDescriptor {
    /// Create a descriptor with no attributes and normal placement.
    pub fn new(kind: AssetKind, url: impl Into<String>) -> Self {
        AssetDescriptor {
            kind,
            url: url.into(),
            attributes: Attributes::new(),
            emit_before_existing: false,
        }
    }

    /// Fill in the kind's default attributes that are not already set.
    pub fn apply_default_attributes(&mut self) {
        for (name, value) in self.kind.default_attributes() {
            self.attributes
                .entry((*name).to_string())
                .or_insert_with(|| (*value).to_string());
        }
    }

    /// Shallow-merge caller attributes. Caller values win over defaults;
    /// structural attributes are never taken from the caller.
    pub fn merge_attributes(&mut self, extra: &Attributes) {
        let structural = self.kind.structural_attributes();
        for (name, value) in extra {
            if structural.contains(&name.to_ascii_lowercase().as_str()) {
                tracing::warn!(
                    "Ignoring attribute `{}` on {} tag for {}: it is set by the tag itself",
                    name,
                    self.kind,
                    self.url
                );
                continue;
            }
            self.attributes.insert(name.clone(), value.clone());
        }
    }
}

/// Build an attribute map from name/value pairs.
pub fn attributes<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
