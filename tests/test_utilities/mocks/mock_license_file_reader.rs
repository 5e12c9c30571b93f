use distro2sbom::prelude::*;
use std::collections::HashMap;

/// Mock LicenseFileReader serving `License:` values from memory
#[derive(Default)]
pub struct MockLicenseFileReader {
    licenses: HashMap<String, String>,
}

impl MockLicenseFileReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_license(mut self, package_name: &str, license: &str) -> Self {
        self.licenses
            .insert(package_name.to_string(), license.to_string());
        self
    }
}

impl LicenseFileReader for MockLicenseFileReader {
    fn read_license_field(&self, package_name: &str) -> Option<String> {
        self.licenses.get(package_name).cloned()
    }
}
