//! Configuration file support.
//!
//! Two configuration file locations are supported:
//! - Global: `<user config dir>/vite-assets/config.toml` - User-wide defaults
//! - Project: `.vite-assets.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. Environment
//! variables (`VITE_ASSETS_*`) take precedence over both.
//!
//! ```toml
//! default_manifest = "public/build/.vite/manifest.json"
//! use_dev_server = "auto"      # or true / false
//! dev_server_uri = "auto"      # or "https://localhost:5173"
//! asset_base = "/build/"
//! ```

use std::env::VarError;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::resolver::{DevServerMode, DevServerUri};

/// Environment variable overriding the default manifest.
pub const ENV_DEFAULT_MANIFEST: &str = "VITE_ASSETS_DEFAULT_MANIFEST";
/// Environment variable overriding the dev server mode.
pub const ENV_USE_DEV_SERVER: &str = "VITE_ASSETS_USE_DEV_SERVER";
/// Environment variable overriding the dev server URI.
pub const ENV_DEV_SERVER_URI: &str = "VITE_ASSETS_DEV_SERVER_URI";
/// Environment variable overriding the asset base.
pub const ENV_ASSET_BASE: &str = "VITE_ASSETS_ASSET_BASE";

const ENV_OVERRIDES: [&str; 4] = [
    ENV_DEFAULT_MANIFEST,
    ENV_USE_DEV_SERVER,
    ENV_DEV_SERVER_URI,
    ENV_ASSET_BASE,
];

/// Name of the project configuration file.
pub const PROJECT_CONFIG_NAME: &str = ".vite-assets.toml";

/// Read access to the settings the resolver needs.
pub trait ConfigSource {
    /// Manifest used when a request does not name one
    fn default_manifest(&self) -> Option<PathBuf>;

    /// `true`, `false` or `auto`
    fn dev_server_mode(&self) -> DevServerMode;

    /// Literal URI or `auto`
    fn dev_server_uri(&self) -> DevServerUri;

    /// Public URL prefix for files listed in the manifest
    fn asset_base(&self) -> Option<String> {
        None
    }
}

/// Asset resolution configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest used when a request does not name one
    pub default_manifest: Option<PathBuf>,

    /// Dev server mode; `None` means `auto`
    pub use_dev_server: Option<DevServerMode>,

    /// Dev server URI; `None` means `auto`
    pub dev_server_uri: Option<DevServerUri>,

    /// Public URL prefix for manifest files (e.g. `/build/`)
    pub asset_base: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.default_manifest.is_some() {
            self.default_manifest = other.default_manifest;
        }
        if other.use_dev_server.is_some() {
            self.use_dev_server = other.use_dev_server;
        }
        if other.dev_server_uri.is_some() {
            self.dev_server_uri = other.dev_server_uri;
        }
        if other.asset_base.is_some() {
            self.asset_base = other.asset_base;
        }
    }

    /// Apply overrides from `VITE_ASSETS_*` environment variables.
    ///
    /// Only the known names are read; other variables are never decoded.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name))
    }

    fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let mut overrides = Vec::new();
        for name in ENV_OVERRIDES {
            match lookup(name) {
                Ok(value) => overrides.push((name, value)),
                Err(VarError::NotPresent) => {}
                Err(e) => return Err(e).with_context(|| format!("failed to read {}", name)),
            }
        }
        self.apply_overrides(overrides)
    }

    /// Apply overrides from name/value pairs; unrelated names are ignored.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in vars {
            let name = name.as_ref();
            let value: String = value.into();
            match name {
                ENV_DEFAULT_MANIFEST => self.default_manifest = Some(PathBuf::from(value)),
                ENV_USE_DEV_SERVER => {
                    let mode = value
                        .parse::<DevServerMode>()
                        .with_context(|| format!("invalid value for {}", name))?;
                    self.use_dev_server = Some(mode);
                }
                ENV_DEV_SERVER_URI => self.dev_server_uri = Some(DevServerUri::from(value)),
                ENV_ASSET_BASE => self.asset_base = Some(value),
                _ => {}
            }
        }
        Ok(())
    }
}

impl ConfigSource for Config {
    fn default_manifest(&self) -> Option<PathBuf> {
        self.default_manifest.clone()
    }

    fn dev_server_mode(&self) -> DevServerMode {
        self.use_dev_server.unwrap_or_default()
    }

    fn dev_server_uri(&self) -> DevServerUri {
        self.dev_server_uri.clone().unwrap_or_default()
    }

    fn asset_base(&self) -> Option<String> {
        self.asset_base.clone()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Environment variables (`VITE_ASSETS_*`)
/// 2. Project config (.vite-assets.toml)
/// 3. Global config (<config dir>/vite-assets/config.toml)
/// 4. Defaults
///
/// Missing files are skipped. A file that exists but fails to parse is an
/// error, not a silent fallback to defaults.
pub fn load_config(global_path: &Path, project_path: &Path) -> Result<Config> {
    load_layers(global_path, project_path, |name| std::env::var(name))
}

fn load_layers<F>(global_path: &Path, project_path: &Path, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let mut config = Config::default();

    for path in [global_path, project_path] {
        if path.exists() {
            config.merge(Config::load(path)?);
        }
    }

    config.apply_env_with(lookup)?;
    Ok(config)
}

/// Get the global config path (`<user config dir>/vite-assets/config.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "vite-assets")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Get the project config path.
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.default_manifest().is_none());
        assert_eq!(config.dev_server_mode(), DevServerMode::Auto);
        assert_eq!(config.dev_server_uri(), DevServerUri::Auto);
        assert!(ConfigSource::asset_base(&config).is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
default_manifest = "public/build/.vite/manifest.json"
use_dev_server = true
dev_server_uri = "https://localhost:5173"
asset_base = "/build/"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(
            config.default_manifest(),
            Some(PathBuf::from("public/build/.vite/manifest.json"))
        );
        assert_eq!(config.dev_server_mode(), DevServerMode::Fixed(true));
        assert_eq!(
            config.dev_server_uri(),
            DevServerUri::Literal("https://localhost:5173".to_string())
        );
        assert_eq!(config.asset_base.as_deref(), Some("/build/"));
    }

    #[test]
    fn test_config_load_rejects_bad_mode() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "use_dev_server = \"sometimes\"\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config {
            default_manifest: Some(PathBuf::from("global.json")),
            use_dev_server: Some(DevServerMode::Fixed(false)),
            ..Config::default()
        };

        base.merge(Config {
            use_dev_server: Some(DevServerMode::Auto),
            ..Config::default()
        });

        assert_eq!(base.default_manifest, Some(PathBuf::from("global.json")));
        assert_eq!(base.use_dev_server, Some(DevServerMode::Auto));
    }

    fn no_env(_: &str) -> Result<String, VarError> {
        Err(VarError::NotPresent)
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = project_config_path(tmp.path());

        std::fs::write(
            &global_path,
            "default_manifest = \"global.json\"\ndev_server_uri = \"http://global:5173\"\n",
        )
        .unwrap();
        std::fs::write(&project_path, "default_manifest = \"project.json\"\n").unwrap();

        let config = load_layers(&global_path, &project_path, no_env).unwrap();

        assert_eq!(config.default_manifest, Some(PathBuf::from("project.json")));
        assert_eq!(
            config.dev_server_uri,
            Some(DevServerUri::Literal("http://global:5173".to_string()))
        );
    }

    #[test]
    fn test_env_overrides_both_files() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = project_config_path(tmp.path());

        std::fs::write(&global_path, "asset_base = \"/global/\"\n").unwrap();
        std::fs::write(
            &project_path,
            "default_manifest = \"project.json\"\nuse_dev_server = false\n",
        )
        .unwrap();

        let config = load_layers(&global_path, &project_path, |name| match name {
            ENV_USE_DEV_SERVER => Ok("true".to_string()),
            _ => Err(VarError::NotPresent),
        })
        .unwrap();

        assert_eq!(config.use_dev_server, Some(DevServerMode::Fixed(true)));
        assert_eq!(config.default_manifest, Some(PathBuf::from("project.json")));
        assert_eq!(config.asset_base.as_deref(), Some("/global/"));
    }

    #[test]
    fn test_load_config_reports_bad_file() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = project_config_path(tmp.path());

        std::fs::write(&global_path, "default_manifest = \"global.json\"\n").unwrap();
        std::fs::write(&project_path, "use_dev_server = \"sometimes\"\n").unwrap();

        let err = load_layers(&global_path, &project_path, no_env).unwrap_err();
        assert!(format!("{:#}", err).contains(PROJECT_CONFIG_NAME));
    }

    #[test]
    fn test_load_config_without_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_layers(
            &tmp.path().join("global.toml"),
            &project_config_path(tmp.path()),
            no_env,
        )
        .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_value_not_unicode() {
        let mut config = Config::default();
        let err = config
            .apply_env_with(|name| match name {
                ENV_ASSET_BASE => Err(VarError::NotUnicode("\u{fffd}".into())),
                _ => Err(VarError::NotPresent),
            })
            .unwrap_err();

        assert!(format!("{:#}", err).contains(ENV_ASSET_BASE));
        assert!(config.asset_base.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_apply_env_ignores_unrelated_non_utf8_variable() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var("VITE_ASSETS_UNRELATED_BYTES", OsStr::from_bytes(b"\xff\xfe"));

        let mut config = Config::default();
        let result = config.apply_env();
        std::env::remove_var("VITE_ASSETS_UNRELATED_BYTES");

        assert!(result.is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides([
                (ENV_USE_DEV_SERVER, "on"),
                (ENV_DEV_SERVER_URI, "auto"),
                (ENV_ASSET_BASE, "/dist/"),
                ("PATH", "/usr/bin"),
            ])
            .unwrap();

        assert_eq!(config.use_dev_server, Some(DevServerMode::Fixed(true)));
        assert_eq!(config.dev_server_uri, Some(DevServerUri::Auto));
        assert_eq!(config.asset_base.as_deref(), Some("/dist/"));
        assert!(config.default_manifest.is_none());
    }

    #[test]
    fn test_overrides_reject_bad_mode() {
        let mut config = Config::default();
        let err = config
            .apply_overrides([(ENV_USE_DEV_SERVER, "perhaps")])
            .unwrap_err();
        assert!(format!("{:#}", err).contains(ENV_USE_DEV_SERVER));
    }
}
