//! Dev server mode selection and base URI.
//!
//! No network access happens here: the dev server is never probed, only
//! its URL is built.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

use crate::resolver::ResolveError;
use crate::util::context::EnvironmentProbe;
use crate::util::request::RequestIntrospector;

/// Path of the dev server's client script, relative to its base URI.
pub const DEV_CLIENT_PATH: &str = "@vite/client";

/// Whether assets come from the dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevServerMode {
    /// Ask the environment probe
    #[default]
    Auto,
    /// Fixed decision
    Fixed(bool),
}

impl<'de> Deserialize<'de> for DevServerMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Ok(DevServerMode::Fixed(flag)),
            Raw::Text(text) => text.parse().map_err(de::Error::custom),
        }
    }
}

impl Serialize for DevServerMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DevServerMode::Auto => serializer.serialize_str("auto"),
            DevServerMode::Fixed(flag) => serializer.serialize_bool(*flag),
        }
    }
}

/// A dev server mode string that is neither a boolean nor `auto`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid dev server mode `{0}`: expected a boolean or `auto`")]
pub struct InvalidDevServerMode(pub String);

impl FromStr for DevServerMode {
    type Err = InvalidDevServerMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DevServerMode::Auto),
            "1" | "true" | "yes" | "on" => Ok(DevServerMode::Fixed(true)),
            "0" | "false" | "no" | "off" | "" => Ok(DevServerMode::Fixed(false)),
            _ => Err(InvalidDevServerMode(s.to_string())),
        }
    }
}

impl fmt::Display for DevServerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevServerMode::Auto => f.write_str("auto"),
            DevServerMode::Fixed(flag) => write!(f, "{}", flag),
        }
    }
}

/// Where the dev server lives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DevServerUri {
    /// Derive from the current request
    #[default]
    Auto,
    /// Configured URI, parsed when needed
    Literal(String),
}

impl From<String> for DevServerUri {
    fn from(value: String) -> Self {
        if value.trim().eq_ignore_ascii_case("auto") {
            DevServerUri::Auto
        } else {
            DevServerUri::Literal(value)
        }
    }
}

impl From<&str> for DevServerUri {
    fn from(value: &str) -> Self {
        DevServerUri::from(value.to_string())
    }
}

impl From<DevServerUri> for String {
    fn from(uri: DevServerUri) -> Self {
        match uri {
            DevServerUri::Auto => "auto".to_string(),
            DevServerUri::Literal(value) => value,
        }
    }
}

/// Decide between dev server and manifest delivery.
pub fn should_use_dev_server(mode: DevServerMode, probe: &dyn EnvironmentProbe) -> bool {
    match mode {
        DevServerMode::Auto => probe.is_development_context(),
        DevServerMode::Fixed(flag) => flag,
    }
}

/// Compute the dev server's base URI.
pub fn resolve_base_uri(
    configured: &DevServerUri,
    introspector: &dyn RequestIntrospector,
) -> Result<Url, ResolveError> {
    match configured {
        DevServerUri::Auto => introspector.derive_dev_server_uri(),
        DevServerUri::Literal(value) => {
            Url::parse(value.trim()).map_err(|source| ResolveError::InvalidDevServerUri {
                uri: value.clone(),
                source,
            })
        }
    }
}

/// Join a path onto a dev server base URI, keeping any base path.
///
/// Query and fragment of the base are dropped.
pub fn dev_server_url(base: &Url, path: &str) -> String {
    let mut base = base.clone();
    base.set_query(None);
    base.set_fragment(None);

    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
