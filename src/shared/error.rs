use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// argument errors and failures during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// SBOM generated (and uploaded, when configured)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unsupported distro, command failure, upload error, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for SBOM generation.
///
/// Uses thiserror to derive Display and Error traits. Variants that a user
/// can act on carry a hint line.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("Unsupported distribution: {distro}\n\n💡 Hint: Supported distributions are ubuntu, debian, alpine, centos, fedora, rhel, opensuse and rocky")]
    UnsupportedDistribution { distro: String },

    #[error("Unsupported package manager: {manager}\n\n💡 Hint: Supported package managers are dpkg, apk and rpm")]
    UnsupportedPackageManager { manager: String },

    #[error("Command failed: {command}\nDetails: {details}\n\n💡 Hint: Please verify that the package manager is installed and usable by the current user")]
    CommandFailed { command: String, details: String },

    #[error("Command timed out after {timeout:?}: {command}\n\n💡 Hint: Increase the limit with --command-timeout if the package database is slow to query")]
    CommandTimeout { command: String, timeout: Duration },

    #[error("Failed to fetch dependencies for package '{package}'\n\n💡 Hint: Use --tolerate-fetch-errors to skip packages whose dependencies cannot be queried")]
    DependencyFetch { package: String },

    #[error("Failed to load SPDX license schema: {path}\nDetails: {details}\n\n💡 Hint: Point --spdx-schema at a JSON document containing an \"enum\" array of license identifiers")]
    LicenseVocabulary { path: PathBuf, details: String },

    #[error("Assembled SBOM is inconsistent: {details}")]
    InvalidDocument { details: String },

    #[error("Failed to upload SBOM to Dependency-Track: {details}\n\n💡 Hint: Please verify the API URL, the API key permissions and the TLS settings")]
    Upload { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}
