//! Host-facing plumbing: configuration, environment and request access.

pub mod config;
pub mod context;
pub mod request;

pub use config::{Config, ConfigSource};
pub use context::{ApplicationContext, EnvironmentProbe};
pub use request::{RequestIntrospector, RequestOrigin};
