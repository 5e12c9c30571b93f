use crate::shared::Result;
use std::collections::BTreeSet;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 255;

/// NewType wrapper for an installed package name
///
/// Names are passed as arguments to package manager commands and joined into
/// filesystem paths, so they must start with an alphanumeric character and may
/// not contain whitespace, control characters, path separators or colons.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if !name.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
            anyhow::bail!(
                "Package name '{}' must start with an alphanumeric character or underscore",
                name
            );
        }

        if name
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '\\' | ':'))
        {
            anyhow::bail!(
                "Package name contains invalid characters. Whitespace, control characters, path separators and colons are not allowed."
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a package version as reported by the package manager
///
/// Distro versions carry epochs, tildes and release suffixes (`1:2.3~rc1-4ubuntu1`),
/// so only whitespace and control characters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if version.chars().any(|c| c.is_whitespace() || c.is_control()) {
            anyhow::bail!("Package version contains whitespace or control characters.");
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Package value object: one installed name/version pair
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: PackageName,
    version: Version,
}

impl Package {
    pub fn new(name: String, version: String) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            version: Version::new(version)?,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }
}

/// A package together with the license identifiers resolved for it
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedPackage {
    pub package: Package,
    pub licenses: BTreeSet<String>,
}

impl EnrichedPackage {
    pub fn new(package: Package, licenses: BTreeSet<String>) -> Self {
        Self { package, licenses }
    }
}
