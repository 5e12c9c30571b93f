use crate::shared::Result;

/// Identity of the host an SBOM is uploaded for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    /// Distribution identifier, used as the parent project name
    pub distribution: String,
    /// Host name, used as the child project name
    pub hostname: String,
    /// Operating system version, used as the child project version
    pub os_version: String,
}

/// SbomUploader port for pushing a finished document to an inventory service
pub trait SbomUploader {
    /// Uploads the serialized document for the given host
    ///
    /// # Errors
    /// Returns an error if the projects cannot be created or resolved, or the
    /// service rejects the document
    fn upload(&self, document: &str, target: &UploadTarget) -> Result<()>;
}
