use crate::shared::Result;
use serde_json::Value;
use std::collections::HashSet;

/// The set of license identifiers accepted in the SBOM
///
/// Loaded once at startup and shared read-only (behind an `Arc`) with every
/// component that validates license tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseVocabulary {
    identifiers: HashSet<String>,
}

impl LicenseVocabulary {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a license schema document.
    ///
    /// Accepts either a top-level `enum` array or the CycloneDX
    /// `spdx.schema.json` layout (`definitions.license.enum`).
    pub fn from_schema_json(content: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Invalid JSON: {}", e))?;

        let entries = document
            .get("enum")
            .or_else(|| document.pointer("/definitions/license/enum"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                anyhow::anyhow!("No \"enum\" array of license identifiers found in schema")
            })?;

        let vocabulary = Self::new(entries.iter().filter_map(Value::as_str));
        if vocabulary.is_empty() {
            anyhow::bail!("Schema does not list any license identifiers");
        }
        Ok(vocabulary)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}
