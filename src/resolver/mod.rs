//! Asset resolution.
//!
//! Entry inference, the manifest dependency walk and the dev server
//! decision. Everything here is pure: the manifest is loaded before, and
//! host state arrives through the collaborator traits in [`crate::util`].

pub mod dev_server;
pub mod entrypoint;
pub mod errors;
pub mod graph;

pub use dev_server::{
    dev_server_url, resolve_base_uri, should_use_dev_server, DevServerMode, DevServerUri,
    InvalidDevServerMode, DEV_CLIENT_PATH,
};
pub use entrypoint::resolve_entrypoint;
pub use errors::ResolveError;
pub use graph::walk;
