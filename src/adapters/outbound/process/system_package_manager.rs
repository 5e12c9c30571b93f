use super::command_runner::CommandRunner;
use crate::ports::outbound::PackageManager;
use crate::sbom_generation::domain::{Package, PackageManagerKind};
use crate::shared::Result;
use std::time::Duration;

/// SystemPackageManager adapter driving dpkg, apk or rpm through their CLIs
///
/// | operation    | dpkg                                           | apk                 | rpm                                            |
/// |--------------|------------------------------------------------|---------------------|------------------------------------------------|
/// | list         | `dpkg-query -W -f='${Package} ${Version}\n'`   | `apk info -v`       | `rpm -qa --qf '%{NAME} %{VERSION}-%{RELEASE}\n'` |
/// | license      | `dpkg-query -W -f='${License}' <name>`         | `apk info --license <name>` | `rpm -q --qf '%{LICENSE}' <name>`        |
/// | dependencies | `apt-cache depends <name>`                     | `apk info -d <name>` | `rpm -qR <name>`                              |
pub struct SystemPackageManager {
    runner: CommandRunner,
}

impl SystemPackageManager {
    pub fn new(command_timeout: Option<Duration>) -> Self {
        Self {
            runner: CommandRunner::new(command_timeout),
        }
    }
}

impl PackageManager for SystemPackageManager {
    fn list_packages(&self, kind: PackageManagerKind) -> Result<Vec<Package>> {
        let output = match kind {
            PackageManagerKind::Dpkg => self
                .runner
                .run("dpkg-query", &["-W", "-f=${Package} ${Version}\n"])?,
            PackageManagerKind::Apk => self.runner.run("apk", &["info", "-v"])?,
            PackageManagerKind::Rpm => self
                .runner
                .run("rpm", &["-qa", "--qf", "%{NAME} %{VERSION}-%{RELEASE}\n"])?,
        };
        Ok(parse_package_listing(kind, &output))
    }

    fn query_license(
        &self,
        kind: PackageManagerKind,
        package_name: &str,
    ) -> Result<Option<String>> {
        let output = match kind {
            PackageManagerKind::Dpkg => self
                .runner
                .run("dpkg-query", &["-W", "-f=${License}", package_name])?,
            PackageManagerKind::Apk => self
                .runner
                .run("apk", &["info", "--license", package_name])?,
            PackageManagerKind::Rpm => self
                .runner
                .run("rpm", &["-q", "--qf", "%{LICENSE}", package_name])?,
        };
        Ok(parse_license_output(&output))
    }

    fn query_dependencies(
        &self,
        kind: PackageManagerKind,
        package_name: &str,
    ) -> Result<Vec<String>> {
        let output = match kind {
            PackageManagerKind::Dpkg => self.runner.run("apt-cache", &["depends", package_name])?,
            PackageManagerKind::Apk => self.runner.run("apk", &["info", "-d", package_name])?,
            PackageManagerKind::Rpm => self.runner.run("rpm", &["-qR", package_name])?,
        };
        Ok(parse_dependency_output(&output))
    }
}

/// Parses "name version" lines; malformed lines are skipped.
///
/// `apk info -v` prints atoms such as `musl-1.2.4-r2` instead of two fields,
/// which are split at the version boundary.
pub(crate) fn parse_package_listing(kind: PackageManagerKind, output: &str) -> Vec<Package> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let (name, version) = match (fields.next(), fields.next()) {
                (Some(name), Some(version)) => (name, version.to_string()),
                (Some(atom), None) if kind == PackageManagerKind::Apk => split_apk_atom(atom)?,
                _ => {
                    if !line.trim().is_empty() {
                        tracing::debug!(line, "skipping malformed package listing line");
                    }
                    return None;
                }
            };

            match Package::new(name.to_string(), version) {
                Ok(package) => Some(package),
                Err(e) => {
                    tracing::debug!(line, error = %e, "skipping invalid package");
                    None
                }
            }
        })
        .collect()
}

/// Splits `name-version-rN` into `("name", "version-rN")`.
fn split_apk_atom(atom: &str) -> Option<(&str, String)> {
    let mut parts = atom.rsplitn(3, '-');
    let release = parts.next()?;
    let version = parts.next()?;
    let name = parts.next()?;

    let is_release = release.starts_with('r') && release[1..].chars().all(|c| c.is_ascii_digit());
    let is_version = version.starts_with(|c: char| c.is_ascii_digit());
    if name.is_empty() || !is_release || !is_version {
        tracing::debug!(atom, "skipping apk entry without a version suffix");
        return None;
    }

    Some((name, format!("{}-{}", version, release)))
}

/// Joins the license lines of a query; `None` when nothing usable was printed.
///
/// Header lines ending in `:` (as printed by `apk info`) and rpm's `(none)` are ignored.
pub(crate) fn parse_license_output(output: &str) -> Option<String> {
    let license = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':') && *line != "(none)")
        .collect::<Vec<_>>()
        .join(" ");

    if license.is_empty() {
        None
    } else {
        Some(license)
    }
}

/// Keeps every trimmed, non-empty output line as a raw dependency token.
pub(crate) fn parse_dependency_output(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
