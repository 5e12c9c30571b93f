use crate::ports::outbound::{LicenseFileReader, PackageManager};
use crate::sbom_generation::domain::{LicenseVocabulary, PackageManagerKind};
use crate::sbom_generation::services::{ConjunctionMode, LicenseNormalizer, UNKNOWN_LICENSE};
use std::collections::BTreeSet;

/// LicenseResolver application service
///
/// Finds the raw license text of a package and normalizes it against the
/// vocabulary. Resolution is best-effort: query failures are logged and the
/// package simply ends up with fewer (or no) licenses.
pub struct LicenseResolver<'a, PM, LF> {
    package_manager: &'a PM,
    license_files: &'a LF,
    normalizer: LicenseNormalizer<'a>,
}

impl<'a, PM, LF> LicenseResolver<'a, PM, LF>
where
    PM: PackageManager,
    LF: LicenseFileReader,
{
    pub fn new(
        package_manager: &'a PM,
        license_files: &'a LF,
        vocabulary: &'a LicenseVocabulary,
        mode: ConjunctionMode,
    ) -> Self {
        Self {
            package_manager,
            license_files,
            normalizer: LicenseNormalizer::new(vocabulary, mode),
        }
    }

    /// Resolves the license identifiers of one package; never fails.
    pub fn resolve(&self, kind: PackageManagerKind, package_name: &str) -> BTreeSet<String> {
        match self.raw_license(kind, package_name) {
            Some(raw) => self.normalizer.normalize(&raw),
            None => BTreeSet::new(),
        }
    }

    /// Package manager license field first, then the on-disk license files.
    fn raw_license(&self, kind: PackageManagerKind, package_name: &str) -> Option<String> {
        let native = match self.package_manager.query_license(kind, package_name) {
            Ok(license) => license,
            Err(e) => {
                tracing::debug!(package = package_name, error = %e, "license query failed");
                None
            }
        };

        native
            .filter(|raw| is_usable(raw))
            .or_else(|| self.license_files.read_license_field(package_name))
            .filter(|raw| is_usable(raw))
    }
}

fn is_usable(raw: &str) -> bool {
    let raw = raw.trim();
    !raw.is_empty() && raw != UNKNOWN_LICENSE
}
