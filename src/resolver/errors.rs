//! Resolution error types and diagnostics.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error while turning a request into assets.
///
/// Every variant is a configuration or usage problem; none of them is
/// worth retrying.
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("unable to determine manifest: no manifest given and no default manifest configured")]
    #[diagnostic(
        code(vite_assets::manifest::unspecified),
        help("Pass a manifest path or set `default_manifest` in the configuration")
    )]
    ManifestPathMissing,

    #[error("manifest not found: {}", .path.display())]
    #[diagnostic(
        code(vite_assets::manifest::not_found),
        help("Run the production build, or check that the manifest path is correct")
    )]
    ManifestNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse manifest {}", .path.display())]
    #[diagnostic(
        code(vite_assets::manifest::parse),
        help("Make sure `build.manifest` is enabled and the file was written by the bundler")
    )]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot infer entrypoint: {}", describe_candidates(.candidates))]
    #[diagnostic(
        code(vite_assets::entry::ambiguous),
        help("Specify the entry name explicitly")
    )]
    AmbiguousEntrypoint { candidates: Vec<String> },

    #[error("entrypoint `{entry}` not found in manifest{}", importer_suffix(.importer.as_deref()))]
    #[diagnostic(
        code(vite_assets::entry::not_found),
        help("Check the entry name against the keys of the manifest, or rebuild")
    )]
    EntrypointNotFound {
        entry: String,
        /// Chunk whose `imports` named the missing key
        importer: Option<String>,
    },

    #[error("invalid dev server URI `{uri}`")]
    #[diagnostic(
        code(vite_assets::dev_server::invalid_uri),
        help("Use an absolute URI such as `http://localhost:5173`, or `auto`")
    )]
    InvalidDevServerUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },
}

fn describe_candidates(candidates: &[String]) -> String {
    match candidates {
        [] => "no entrypoint available".to_string(),
        _ => format!(
            "manifest has {} entrypoints ({})",
            candidates.len(),
            candidates.join(", ")
        ),
    }
}

fn importer_suffix(importer: Option<&str>) -> String {
    importer
        .map(|i| format!(" (imported by `{}`)", i))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = ResolveError::AmbiguousEntrypoint {
            candidates: vec!["a.ts".to_string(), "b.ts".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 entrypoints"));
        assert!(msg.contains("a.ts, b.ts"));

        let err = ResolveError::AmbiguousEntrypoint { candidates: vec![] };
        assert!(err.to_string().contains("no entrypoint"));
    }

    #[test]
    fn test_not_found_names_importer() {
        let err = ResolveError::EntrypointNotFound {
            entry: "lib.ts".to_string(),
            importer: Some("main.ts".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "entrypoint `lib.ts` not found in manifest (imported by `main.ts`)"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = ResolveError::ManifestPathMissing;
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("vite_assets::manifest::unspecified"));
    }
}
