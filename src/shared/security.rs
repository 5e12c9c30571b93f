use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size for schema and config documents (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size for a package's copyright or license file (4 MB)
pub const MAX_LICENSE_FILE_SIZE: u64 = 4 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected rather than its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SbomError::FileReadError {
        path: path.to_path_buf(),
        details: format!("cannot read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(metadata.len())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a regular file into a string after the symlink and size checks.
///
/// Bytes that are not valid UTF-8 (Latin-1 copyright files, for instance)
/// are replaced rather than rejected.
///
/// # Arguments
/// * `path` - File to read
/// * `file_description` - Human readable name used in error messages
/// * `max_size` - Upper bound in bytes
pub fn read_bounded_file(path: &Path, file_description: &str, max_size: u64) -> Result<String> {
    let file_size = validate_regular_file(path, file_description)?;
    validate_file_size(file_size, path, max_size)?;

    let bytes = fs::read(path).map_err(|e| SbomError::FileReadError {
        path: path.to_path_buf(),
        details: format!("cannot read {}: {}", file_description, e),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
