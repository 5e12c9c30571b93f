use super::component::Supplier;
use crate::shared::error::SbomError;
use std::fmt;
use std::str::FromStr;

/// The closed set of package manager families the tool can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManagerKind {
    Dpkg,
    Apk,
    Rpm,
}

impl PackageManagerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManagerKind::Dpkg => "dpkg",
            PackageManagerKind::Apk => "apk",
            PackageManagerKind::Rpm => "rpm",
        }
    }

    /// Package URL type for this package format
    pub fn purl_type(&self) -> &'static str {
        match self {
            PackageManagerKind::Dpkg => "deb",
            PackageManagerKind::Apk => "apk",
            PackageManagerKind::Rpm => "rpm",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManagerKind {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dpkg" => Ok(PackageManagerKind::Dpkg),
            "apk" => Ok(PackageManagerKind::Apk),
            "rpm" => Ok(PackageManagerKind::Rpm),
            _ => Err(SbomError::UnsupportedPackageManager {
                manager: s.to_string(),
            }),
        }
    }
}

/// Supported Linux distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distribution {
    Ubuntu,
    Debian,
    Alpine,
    CentOs,
    Fedora,
    Rhel,
    OpenSuse,
    Rocky,
}

impl Distribution {
    pub const ALL: [Distribution; 8] = [
        Distribution::Ubuntu,
        Distribution::Debian,
        Distribution::Alpine,
        Distribution::CentOs,
        Distribution::Fedora,
        Distribution::Rhel,
        Distribution::OpenSuse,
        Distribution::Rocky,
    ];

    /// Lowercase identifier, matching the `ID` field of os-release
    pub fn id(&self) -> &'static str {
        match self {
            Distribution::Ubuntu => "ubuntu",
            Distribution::Debian => "debian",
            Distribution::Alpine => "alpine",
            Distribution::CentOs => "centos",
            Distribution::Fedora => "fedora",
            Distribution::Rhel => "rhel",
            Distribution::OpenSuse => "opensuse",
            Distribution::Rocky => "rocky",
        }
    }

    pub fn package_manager(&self) -> PackageManagerKind {
        match self {
            Distribution::Ubuntu | Distribution::Debian => PackageManagerKind::Dpkg,
            Distribution::Alpine => PackageManagerKind::Apk,
            Distribution::CentOs
            | Distribution::Fedora
            | Distribution::Rhel
            | Distribution::OpenSuse
            | Distribution::Rocky => PackageManagerKind::Rpm,
        }
    }

    pub fn supplier(&self) -> Supplier {
        let (name, contact_email) = match self {
            Distribution::Ubuntu => (
                "Ubuntu Developers",
                "ubuntu-devel-discuss@lists.ubuntu.com",
            ),
            Distribution::Debian => ("Debian Developers", "debian-devel@lists.debian.org"),
            Distribution::Alpine => (
                "Alpine Linux Developers",
                "alpine-devel@lists.alpinelinux.org",
            ),
            Distribution::CentOs => ("CentOS Developers", "centos-devel@centos.org"),
            Distribution::Fedora => ("Fedora Developers", "devel@lists.fedoraproject.org"),
            Distribution::Rhel => ("Red Hat Developers", "devel@redhat.com"),
            Distribution::OpenSuse => ("openSUSE Developers", "opensuse-devel@opensuse.org"),
            Distribution::Rocky => ("Rocky Linux Developers", "devel@lists.rockylinux.org"),
        };
        Supplier {
            name: name.to_string(),
            contact_email: contact_email.to_string(),
        }
    }

    pub fn homepage(&self) -> &'static str {
        match self {
            Distribution::Ubuntu => "https://ubuntu.com/",
            Distribution::Debian => "https://www.debian.org/",
            Distribution::Alpine => "https://www.alpinelinux.org/",
            Distribution::CentOs => "https://www.centos.org/",
            Distribution::Fedora => "https://fedoraproject.org/",
            Distribution::Rhel => "https://www.redhat.com/",
            Distribution::OpenSuse => "https://www.opensuse.org/",
            Distribution::Rocky => "https://rockylinux.org/",
        }
    }

    /// Public package index page for a package of this distribution
    pub fn package_page(&self, package_name: &str) -> String {
        let name = urlencoding::encode(package_name);
        match self {
            Distribution::Ubuntu => format!("https://packages.ubuntu.com/{}", name),
            Distribution::Debian => format!("https://packages.debian.org/{}", name),
            Distribution::Alpine => format!("https://pkgs.alpinelinux.org/packages?name={}", name),
            Distribution::Fedora => format!("https://packages.fedoraproject.org/pkgs/{}/", name),
            other => format!("https://packages.{}.org/{}", other.id(), name),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Distribution {
    type Err = SbomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_matches('"').to_ascii_lowercase();
        let distribution = match normalized.as_str() {
            "opensuse-leap" | "opensuse-tumbleweed" => Some(Distribution::OpenSuse),
            other => Distribution::ALL.into_iter().find(|d| d.id() == other),
        };
        distribution.ok_or_else(|| SbomError::UnsupportedDistribution {
            distro: s.to_string(),
        })
    }
}
