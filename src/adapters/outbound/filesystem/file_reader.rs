use crate::ports::outbound::{HostInfoProvider, LicenseFileReader};
use crate::shared::security::{read_bounded_file, MAX_LICENSE_FILE_SIZE};
use crate::shared::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// License file locations, relative to the filesystem root, in lookup order
const LICENSE_FILE_TEMPLATES: [&str; 3] = [
    "usr/share/doc/{}/copyright",
    "usr/share/licenses/{}/LICENSE",
    "usr/share/{}/LICENSE",
];

const OS_RELEASE_PATHS: [&str; 2] = ["etc/os-release", "usr/lib/os-release"];
const KERNEL_RELEASE_PATH: &str = "proc/sys/kernel/osrelease";
const HOSTNAME_PATHS: [&str; 2] = ["proc/sys/kernel/hostname", "etc/hostname"];

/// FileSystemReader adapter for host files
///
/// Implements the license file fallback and host identification. All paths
/// are resolved below a configurable root so an image mounted elsewhere (or a
/// test fixture) can be inspected.
pub struct FileSystemReader {
    root: PathBuf,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn os_release(&self) -> Option<HashMap<String, String>> {
        OS_RELEASE_PATHS
            .iter()
            .find_map(|path| fs::read_to_string(self.root.join(path)).ok())
            .map(|content| parse_os_release(&content))
    }

    fn read_first_line(&self, path: &str) -> Option<String> {
        let content = fs::read_to_string(self.root.join(path)).ok()?;
        let line = content.lines().next()?.trim();
        if line.is_empty() {
            None
        } else {
            Some(line.to_string())
        }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseFileReader for FileSystemReader {
    fn read_license_field(&self, package_name: &str) -> Option<String> {
        LICENSE_FILE_TEMPLATES.iter().find_map(|template| {
            let path = self.root.join(template.replace("{}", package_name));
            if !path.exists() {
                return None;
            }
            match read_bounded_file(&path, "license file", MAX_LICENSE_FILE_SIZE) {
                Ok(content) => extract_license_field(&content),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping license file");
                    None
                }
            }
        })
    }
}

impl HostInfoProvider for FileSystemReader {
    fn distribution_id(&self) -> Option<String> {
        self.os_release()?
            .remove("ID")
            .map(|id| id.to_ascii_lowercase())
            .filter(|id| !id.is_empty())
    }

    fn os_version(&self) -> String {
        self.os_release()
            .and_then(|mut fields| fields.remove("VERSION_ID"))
            .filter(|version| !version.is_empty())
            .or_else(|| self.read_first_line(KERNEL_RELEASE_PATH))
            .unwrap_or_else(|| {
                format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
            })
    }

    fn hostname(&self) -> Result<String> {
        HOSTNAME_PATHS
            .iter()
            .find_map(|path| self.read_first_line(path))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unable to determine the host name from {}",
                    HOSTNAME_PATHS
                        .iter()
                        .map(|p| Path::new("/").join(p).display().to_string())
                        .collect::<Vec<_>>()
                        .join(" or ")
                )
            })
    }
}

/// Value of the first `License:` line, if present and non-empty.
fn extract_license_field(content: &str) -> Option<String> {
    content
        .lines()
        .find_map(|line| line.trim().strip_prefix("License:"))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Parses `KEY=value` lines, unquoting values and ignoring comments.
fn parse_os_release(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}
