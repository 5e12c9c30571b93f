mod dependency_name;
mod license_corrections;

pub use dependency_name::DependencyNamePolicy;
pub use license_corrections::LicenseCorrections;
