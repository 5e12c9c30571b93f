use crate::sbom_generation::domain::{Package, PackageManagerKind};
use crate::shared::Result;

/// PackageManager port for querying the host's package database
///
/// Each operation corresponds to one external command. Implementations must be
/// `Send + Sync` because dependency queries run on a pool of worker threads.
pub trait PackageManager: Send + Sync {
    /// Lists installed packages as name/version pairs
    ///
    /// Malformed output lines are skipped rather than reported.
    ///
    /// # Errors
    /// Returns an error if the listing command cannot be launched, exits with
    /// a non-zero status or exceeds the command timeout
    fn list_packages(&self, kind: PackageManagerKind) -> Result<Vec<Package>>;

    /// Queries the package manager's own license field for a package
    ///
    /// # Returns
    /// The raw license text, or `None` when the package manager has none
    fn query_license(&self, kind: PackageManagerKind, package_name: &str)
        -> Result<Option<String>>;

    /// Queries the direct dependencies of a package
    ///
    /// # Returns
    /// Trimmed, non-empty output lines; these are raw tokens that may still
    /// carry version constraints or relation prefixes
    fn query_dependencies(&self, kind: PackageManagerKind, package_name: &str)
        -> Result<Vec<String>>;
}
