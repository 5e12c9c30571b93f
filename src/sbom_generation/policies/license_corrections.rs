/// Static table of license spellings found in distro metadata and the SPDX
/// identifiers they stand for.
///
/// Debian copyright files and rpm headers use short forms such as `GPL-2+` or
/// `BSD-3-clause`; these are mapped onto identifiers present in the SPDX list.
pub struct LicenseCorrections;

impl LicenseCorrections {
    /// Returns the corrected identifier, or the token unchanged when no correction applies
    pub fn correct(token: &str) -> &str {
        match token {
            "GPL-3+" => "GPL-3.0+",
            "GPL-3" => "GPL-3.0",
            "GPL-2+" => "GPL-2.0+",
            "GPL-2" | "GPL-2)" => "GPL-2.0",
            "GPL-1" => "GPL-1.0",
            "GPL-1+" => "GPL-1.0+",
            "GPL" | "GPL-any" => "GPL-3.0",
            "LGPL-1" => "LGPL-1.0",
            "LGPL-1+" => "LGPL-1.0+",
            "LGPL-2" => "LGPL-2.0",
            "LGPL-2+" => "LGPL-2.0+",
            "LGPL-3" => "LGPL-3.0",
            "LGPL-3+" => "LGPL-3.0+",
            "LPGL-2.1+" => "LGPL-2.1-or-later",
            "AGPL-1" => "AGPL-1.0",
            "AGPL-2" => "AGPL-2.0",
            "AGPL-3" => "AGPL-3.0",
            "AGPL-3+" => "AGPL-3.0-or-later",
            "BSD-2" | "BSD-2-clause" => "BSD-2-Clause",
            "BSD-3" | "BSD-3-clause" | "BSD-3-clauses" => "BSD-3-Clause",
            "BSD-4" | "BSD-4-clause" => "BSD-4-Clause",
            "WTFPL-2" => "WTFPL",
            "Apache-2" | "APACHE-2-LLVM-EXCEPTIONS" => "Apache-2.0",
            "Artistic" => "Artistic-2.0",
            "GFDL-NIV-1.3+" => "GFDL-1.3",
            "SIL-OFL-1.1" | "SIL-1.1" => "OFL-1.1",
            "OpenLDAP-2.8" => "OLDAP-2.8",
            "MIT-1" => "MIT",
            other => other,
        }
    }
}
