//! Trait seams for external collaborators.

use std::path::Path;

use crate::error::Result;

/// Produces plain text from a source document.
///
/// Implementations are blocking: a run processes one input at a time.
pub trait TextExtractor {
    /// Human-readable name used in logs (e.g. "gs").
    fn name(&self) -> &str;

    /// Extract the full text of the document at `path`.
    fn extract(&self, path: &Path) -> Result<String>;
}
