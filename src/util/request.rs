//! Dev server URI derived from the current request.

use url::Url;

use crate::resolver::ResolveError;

/// Default port of the Vite dev server.
pub const DEFAULT_DEV_SERVER_PORT: u16 = 5173;

/// Derives the dev server URI from whatever request is being rendered.
pub trait RequestIntrospector {
    fn derive_dev_server_uri(&self) -> Result<Url, ResolveError>;
}

/// The dev server runs on the same host as the page, on its own port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin {
    scheme: String,
    host: String,
    dev_server_port: u16,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        RequestOrigin {
            scheme: scheme.into(),
            host: host.into(),
            dev_server_port: DEFAULT_DEV_SERVER_PORT,
        }
    }

    /// Take scheme and host from the URL of the current request.
    pub fn from_request_url(url: &Url) -> Self {
        RequestOrigin::new(url.scheme(), url.host_str().unwrap_or("localhost"))
    }

    /// Use a dev server port other than Vite's default.
    pub fn with_dev_server_port(mut self, port: u16) -> Self {
        self.dev_server_port = port;
        self
    }
}

impl RequestIntrospector for RequestOrigin {
    fn derive_dev_server_uri(&self) -> Result<Url, ResolveError> {
        let uri = format!("{}://{}:{}", self.scheme, self.host, self.dev_server_port);
        Url::parse(&uri).map_err(|source| ResolveError::InvalidDevServerUri { uri, source })
    }
}
