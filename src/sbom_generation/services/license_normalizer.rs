use crate::sbom_generation::domain::LicenseVocabulary;
use crate::sbom_generation::policies::LicenseCorrections;
use std::collections::BTreeSet;

/// Raw license value meaning "no license information available"
pub const UNKNOWN_LICENSE: &str = "UNKNOWN";

/// Which words are treated as joining words between license identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConjunctionMode {
    /// Drop `and` / `or`
    #[default]
    Standard,
    /// Also drop `with`, `exception`, `only` and `other`
    Extended,
}

impl ConjunctionMode {
    fn is_conjunction(&self, token: &str) -> bool {
        let lowered = token.to_ascii_lowercase();
        match lowered.as_str() {
            "and" | "or" => true,
            "with" | "exception" | "only" | "other" => *self == ConjunctionMode::Extended,
            _ => false,
        }
    }
}

/// Turns a free-text license field into a set of vocabulary identifiers
///
/// Tokenizes on `, | / & ;` and whitespace, drops conjunctions, applies
/// [`LicenseCorrections`] and keeps only identifiers present in the vocabulary.
/// Anything else is discarded and logged at debug level.
pub struct LicenseNormalizer<'a> {
    vocabulary: &'a LicenseVocabulary,
    mode: ConjunctionMode,
}

impl<'a> LicenseNormalizer<'a> {
    pub fn new(vocabulary: &'a LicenseVocabulary, mode: ConjunctionMode) -> Self {
        Self { vocabulary, mode }
    }

    pub fn normalize(&self, raw: &str) -> BTreeSet<String> {
        let raw = raw.trim();
        if raw.is_empty() || raw == UNKNOWN_LICENSE {
            return BTreeSet::new();
        }

        raw.split(|c: char| matches!(c, ',' | '|' | '/' | '&' | ';') || c.is_whitespace())
            .map(|token| token.trim_matches(|c: char| c == '(' || c == ')'))
            .filter(|token| !token.is_empty() && !self.mode.is_conjunction(token))
            .filter_map(|token| {
                let corrected = LicenseCorrections::correct(token);
                if self.vocabulary.contains(corrected) {
                    Some(corrected.to_string())
                } else {
                    tracing::debug!(token, corrected, "dropping license token outside the SPDX vocabulary");
                    None
                }
            })
            .collect()
    }
}
