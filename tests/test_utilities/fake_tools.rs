//! Stand-in `dpkg-query` and `apt-cache` scripts for end-to-end runs.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Listing: `bash` and `libc6`; `bash` depends on `libc6`.
pub const DPKG_QUERY: &str = r#"#!/bin/sh
if [ "$#" -eq 2 ]; then
  printf 'bash 5.2.21-2ubuntu4\nlibc6 2.39-0ubuntu8.3\n'
  exit 0
fi
case "$3" in
  bash) printf 'GPL-3+' ;;
  libc6) printf 'LGPL-2.1, GPL-2+' ;;
esac
"#;

pub const APT_CACHE: &str = r#"#!/bin/sh
echo "$2"
case "$2" in
  bash) printf '  PreDepends: libc6\n  Depends: base-files\n' ;;
  libc6) printf '  Depends: libgcc-s1\n  Recommends: libidn2-0\n' ;;
esac
"#;

/// `apt-cache` that cannot resolve `libc6`
pub const APT_CACHE_FAILING: &str = r#"#!/bin/sh
if [ "$2" = "libc6" ]; then
  echo "E: No packages found" >&2
  exit 100
fi
echo "$2"
printf '  PreDepends: libc6\n'
"#;

/// `apt-cache` that never answers in time
pub const APT_CACHE_HANGING: &str = "#!/bin/sh\nexec sleep 5\n";

/// Writes an executable script named `name` into `bin_dir`.
pub fn write_tool(bin_dir: &Path, name: &str, script: &str) {
    fs::create_dir_all(bin_dir).unwrap();
    let path = bin_dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Creates `bin/` under `dir` with a fake dpkg toolchain.
pub fn install_dpkg_tools(dir: &Path, apt_cache: &str) -> PathBuf {
    let bin_dir = dir.join("bin");
    write_tool(&bin_dir, "dpkg-query", DPKG_QUERY);
    write_tool(&bin_dir, "apt-cache", apt_cache);
    bin_dir
}

/// `PATH` with `bin_dir` searched first
pub fn path_with(bin_dir: &Path) -> String {
    match std::env::var("PATH") {
        Ok(path) => format!("{}:{}", bin_dir.display(), path),
        Err(_) => bin_dir.display().to_string(),
    }
}

/// Absolute path of the bundled SPDX license schema fixture
pub fn license_schema() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/license-schema.json")
}
