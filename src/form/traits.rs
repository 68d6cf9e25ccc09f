//! Traits for the generation seam used by the web layer.

use std::path::Path;

use super::{FormError, RenderedDocument};

/// Something that writes a finished form to a fixed location.
pub trait Generator: Send + Sync {
    /// Render the document, overwriting the file at `destination()`.
    fn generate(&self) -> Result<RenderedDocument, FormError>;

    /// Where `generate` writes.
    fn destination(&self) -> &Path;
}
