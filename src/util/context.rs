//! Application context detection.
//!
//! The host tells us whether it runs in development through
//! [`EnvironmentProbe`]. [`ApplicationContext`] reads the usual
//! `APP_CONTEXT` variable (`Development`, `Production/Staging`, ...).

use std::fmt;
use std::str::FromStr;

/// Environment variable holding the application context.
pub const APP_CONTEXT_ENV: &str = "APP_CONTEXT";

/// Reports the runtime context of the host application.
pub trait EnvironmentProbe {
    fn is_development_context(&self) -> bool;
}

/// Top-level application context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationContext {
    #[default]
    Production,
    Development,
    Testing,
}

impl ApplicationContext {
    /// Read the context from `APP_CONTEXT`, defaulting to production.
    pub fn from_env() -> Self {
        match std::env::var(APP_CONTEXT_ENV) {
            Ok(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    "Unknown application context `{}` in {}, assuming Production",
                    value,
                    APP_CONTEXT_ENV
                );
                ApplicationContext::Production
            }),
            Err(_) => ApplicationContext::Production,
        }
    }
}

impl FromStr for ApplicationContext {
    type Err = String;

    /// Parses the root of a context path; `Development/Local` is development.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let root = s.trim().split('/').next().unwrap_or_default();
        match root.to_ascii_lowercase().as_str() {
            "production" => Ok(ApplicationContext::Production),
            "development" => Ok(ApplicationContext::Development),
            "testing" => Ok(ApplicationContext::Testing),
            _ => Err(format!("unknown application context: {}", s)),
        }
    }
}

impl fmt::Display for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationContext::Production => write!(f, "Production"),
            ApplicationContext::Development => write!(f, "Development"),
            ApplicationContext::Testing => write!(f, "Testing"),
        }
    }
}

impl EnvironmentProbe for ApplicationContext {
    fn is_development_context(&self) -> bool {
        *self == ApplicationContext::Development
    }
}
