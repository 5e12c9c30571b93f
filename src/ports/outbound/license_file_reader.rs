/// LicenseFileReader port for the on-disk license fallback
///
/// Used when the package manager reports no license for a package.
pub trait LicenseFileReader: Send + Sync {
    /// Returns the value of the first `License:` line found in the package's
    /// copyright or license files, if any
    fn read_license_field(&self, package_name: &str) -> Option<String>;
}
