use crate::shared::Result;

/// OutputPresenter port for presenting the serialized SBOM
///
/// Abstracts the destination (stdout or a file).
pub trait OutputPresenter {
    /// Presents the formatted SBOM content
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
