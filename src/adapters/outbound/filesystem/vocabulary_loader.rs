use crate::sbom_generation::domain::LicenseVocabulary;
use crate::shared::error::SbomError;
use crate::shared::security::{read_bounded_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::path::Path;

/// Loads the SPDX license vocabulary from a schema document on disk.
///
/// # Errors
/// Returns [`SbomError::LicenseVocabulary`] if the file is missing, unreadable,
/// not JSON, or lists no license identifiers.
pub fn load_license_vocabulary(path: &Path) -> Result<LicenseVocabulary> {
    let content = read_bounded_file(path, "SPDX license schema", MAX_FILE_SIZE).map_err(|e| {
        e.context(SbomError::LicenseVocabulary {
            path: path.to_path_buf(),
            details: "the schema file could not be read".to_string(),
        })
    })?;

    let vocabulary = LicenseVocabulary::from_schema_json(&content).map_err(|e| {
        SbomError::LicenseVocabulary {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
    })?;

    tracing::debug!(
        path = %path.display(),
        identifiers = vocabulary.len(),
        "loaded license vocabulary"
    );
    Ok(vocabulary)
}
