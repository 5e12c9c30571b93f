use clap::Parser;
use std::num::{NonZeroU64, NonZeroUsize};
use std::path::PathBuf;

/// Generate CycloneDX SBOMs for the packages installed on a Linux host
#[derive(Parser, Debug)]
#[command(name = "distro2sbom")]
#[command(version)]
#[command(
    about = "Generate CycloneDX SBOMs for the packages installed on a Linux host",
    long_about = None
)]
pub struct Args {
    /// Distribution: ubuntu, debian, alpine, centos, fedora, rhel, opensuse or rocky
    /// (detected from /etc/os-release when omitted)
    #[arg(short, long)]
    pub distro: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a YAML config file (defaults to /etc/distro2sbom.yaml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the SPDX license schema (spdx.schema.json)
    #[arg(long, value_name = "PATH")]
    pub spdx_schema: Option<PathBuf>,

    /// Dependency-Track base URL; the SBOM is uploaded when both URL and key are set
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Dependency-Track API key
    #[arg(long, env = "DISTRO2SBOM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Verify the TLS certificate of the Dependency-Track server
    #[arg(long, value_name = "BOOL")]
    pub tls_verify: Option<bool>,

    /// Number of concurrent dependency queries [default: 4]
    #[arg(long, value_name = "N")]
    pub workers: Option<NonZeroUsize>,

    /// Timeout for each package manager command, in seconds [default: 120]
    #[arg(long, value_name = "SECONDS")]
    pub command_timeout: Option<NonZeroU64>,

    /// Record empty dependencies for packages whose dependency query fails
    /// instead of aborting
    #[arg(long)]
    pub tolerate_fetch_errors: bool,

    /// Also drop "with", "exception", "only" and "other" from license strings
    #[arg(long)]
    pub extended_conjunctions: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
