use crate::sbom_generation::domain::{Component, SbomMetadata};
use chrono::Utc;
use uuid::Uuid;

/// Name recorded as the generating tool in every document
pub const TOOL_NAME: &str = "distro2sbom";

/// SbomGenerator service for generating SBOM metadata
///
/// Creates a fresh timestamp and serial number for each document.
pub struct SbomGenerator;

impl SbomGenerator {
    /// Generates SBOM metadata with current timestamp and unique serial number
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool generating the SBOM
    /// * `tool_version` - Version of the tool
    /// * `operating_system` - Component describing the scanned host
    pub fn generate_metadata(
        tool_name: &str,
        tool_version: &str,
        operating_system: Component,
    ) -> SbomMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let serial_number = format!("urn:uuid:{}", Uuid::new_v4());

        SbomMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            serial_number,
            operating_system,
        )
    }

    /// Generates SBOM metadata with this tool's name and compile-time version
    pub fn generate_default_metadata(operating_system: Component) -> SbomMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"), operating_system)
    }
}
