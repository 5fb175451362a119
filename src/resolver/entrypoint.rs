//! Entrypoint selection.

use crate::core::Manifest;
use crate::resolver::ResolveError;

/// Pick the manifest key to load.
///
/// A requested entry is returned as-is; whether it exists is checked by the
/// graph walk. Without one, the manifest must flag exactly one chunk as an
/// entry.
pub fn resolve_entrypoint(
    manifest: &Manifest,
    requested: Option<&str>,
) -> Result<String, ResolveError> {
    if let Some(entry) = requested {
        return Ok(entry.to_string());
    }

    let candidates: Vec<&str> = manifest.entrypoints().collect();
    match candidates.as_slice() {
        [only] => {
            tracing::debug!("Inferred entrypoint `{}` from manifest", only);
            Ok((*only).to_string())
        }
        _ => Err(ResolveError::AmbiguousEntrypoint {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }),
    }
}
