use crate::sbom_generation::domain::Distribution;

/// SbomRequest - Request DTO for the SBOM generation use case
///
/// Carries the identity of the host being inventoried. Both fields are
/// resolved by the caller (configuration or host detection) before the use
/// case runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomRequest {
    /// Distribution whose package manager is queried
    pub distribution: Distribution,
    /// Operating system version recorded on the root and metadata components
    pub os_version: String,
}

impl SbomRequest {
    pub fn new(distribution: Distribution, os_version: impl Into<String>) -> Self {
        Self {
            distribution,
            os_version: os_version.into(),
        }
    }
}
