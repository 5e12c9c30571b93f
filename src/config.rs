//! Configuration file support for distro2sbom.
//!
//! Settings come from three layers: command-line flags (and their environment
//! variables), an optional YAML config file and built-in defaults, in that
//! order of precedence.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Args;
use distro2sbom::application::services::{FetchPolicy, DEFAULT_WORKER_COUNT};
use distro2sbom::application::use_cases::GenerationOptions;
use distro2sbom::sbom_generation::services::ConjunctionMode;
use distro2sbom::shared::Result;

/// Config file read when `--config` is not given; a missing file is not an error.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/distro2sbom.yaml";

/// Default per-command timeout for package manager queries
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub distro: Option<String>,
    pub output: Option<PathBuf>,
    pub spdx_schema: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub tls_verify: Option<bool>,
    pub workers: Option<usize>,
    pub command_timeout_secs: Option<u64>,
    pub tolerate_fetch_errors: Option<bool>,
    pub extended_conjunctions: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Load config from `path` if it exists. Returns `None` silently if not found.
pub fn discover_config(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let strings = [
        ("distro", config.distro.as_deref()),
        ("api_url", config.api_url.as_deref()),
        ("api_key", config.api_key.as_deref()),
    ];
    for (field, value) in strings {
        if value.is_some_and(|v| v.trim().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n💡 Hint: Remove the field or give it a value.",
                field
            );
        }
    }

    let paths = [
        ("output", config.output.as_deref()),
        ("spdx_schema", config.spdx_schema.as_deref()),
    ];
    for (field, value) in paths {
        if value.is_some_and(|p| p.as_os_str().is_empty()) {
            bail!(
                "Invalid config: {} must not be empty.\n\n💡 Hint: Remove the field or give it a path.",
                field
            );
        }
    }

    if config.workers == Some(0) {
        bail!("Invalid config: workers must be greater than zero.");
    }
    if config.command_timeout_secs == Some(0) {
        bail!("Invalid config: command_timeout_secs must be greater than zero.");
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub distro: Option<String>,
    pub output: Option<PathBuf>,
    pub spdx_schema: Option<PathBuf>,
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub tls_verify: bool,
    pub workers: usize,
    pub command_timeout: Duration,
    pub tolerate_fetch_errors: bool,
    pub extended_conjunctions: bool,
}

impl Settings {
    pub fn merge(args: Args, config: ConfigFile) -> Self {
        Self {
            distro: args.distro.or(config.distro),
            output: args.output.or(config.output),
            spdx_schema: args.spdx_schema.or(config.spdx_schema),
            api_url: args.api_url.or(config.api_url),
            api_key: args.api_key.or(config.api_key),
            tls_verify: args.tls_verify.or(config.tls_verify).unwrap_or(true),
            workers: args
                .workers
                .map(|n| n.get())
                .or(config.workers)
                .unwrap_or(DEFAULT_WORKER_COUNT),
            command_timeout: Duration::from_secs(
                args.command_timeout
                    .map(|n| n.get())
                    .or(config.command_timeout_secs)
                    .unwrap_or(DEFAULT_COMMAND_TIMEOUT_SECS),
            ),
            tolerate_fetch_errors: args.tolerate_fetch_errors
                || config.tolerate_fetch_errors.unwrap_or(false),
            extended_conjunctions: args.extended_conjunctions
                || config.extended_conjunctions.unwrap_or(false),
        }
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            workers: self.workers,
            fetch_policy: if self.tolerate_fetch_errors {
                FetchPolicy::SkipFailed
            } else {
                FetchPolicy::FailFast
            },
            conjunction_mode: if self.extended_conjunctions {
                ConjunctionMode::Extended
            } else {
                ConjunctionMode::Standard
            },
        }
    }

    /// URL and key, when both are configured
    pub fn upload_endpoint(&self) -> Option<(&str, &str)> {
        match (self.api_url.as_deref(), self.api_key.as_deref()) {
            (Some(url), Some(key)) => Some((url, key)),
            _ => None,
        }
    }

    /// Exactly one of URL and key is configured
    pub fn upload_half_configured(&self) -> bool {
        self.api_url.is_some() != self.api_key.is_some()
    }
}
