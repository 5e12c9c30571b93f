mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, Settings, DEFAULT_CONFIG_PATH};
use distro2sbom::adapters::outbound::console::StderrProgressReporter;
use distro2sbom::adapters::outbound::filesystem::{load_license_vocabulary, FileSystemReader};
use distro2sbom::adapters::outbound::formatters::CycloneDxFormatter;
use distro2sbom::adapters::outbound::network::DependencyTrackClient;
use distro2sbom::adapters::outbound::process::SystemPackageManager;
use distro2sbom::application::dto::SbomRequest;
use distro2sbom::application::factories::{PresenterFactory, PresenterType};
use distro2sbom::application::use_cases::GenerateSbomUseCase;
use distro2sbom::ports::outbound::{
    HostInfoProvider, ProgressReporter, SbomFormatter, SbomUploader, UploadTarget,
};
use distro2sbom::sbom_generation::domain::Distribution;
use distro2sbom::shared::error::{ExitCode, SbomError};
use distro2sbom::shared::Result;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

/// Diagnostics go to stderr; stdout is reserved for the SBOM.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "distro2sbom=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(args: Args) -> Result<()> {
    // Load configuration (explicit path, or the system-wide default if present)
    let config = match args.config.as_deref() {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(Path::new(DEFAULT_CONFIG_PATH))?.unwrap_or_default(),
    };
    let settings = Settings::merge(args, config);

    // Identify the host
    let host = FileSystemReader::new();
    let distribution = resolve_distribution(settings.distro.as_deref(), &host)?;
    let os_version = host.os_version();

    // Load the license vocabulary once, before any package is inspected
    let schema_path = settings
        .spdx_schema
        .as_deref()
        .ok_or_else(|| SbomError::Validation {
            message: "No SPDX license schema configured.\n\n💡 Hint: Pass --spdx-schema <PATH> or set spdx_schema in the config file".to_string(),
        })?;
    let vocabulary = Arc::new(load_license_vocabulary(schema_path)?);

    let progress_reporter = StderrProgressReporter::new();
    progress_reporter.report(&format!(
        "🐧 Generating SBOM for {} {}",
        distribution, os_version
    ));

    // Create use case with injected dependencies
    let use_case = GenerateSbomUseCase::new(
        SystemPackageManager::new(Some(settings.command_timeout)),
        FileSystemReader::new(),
        progress_reporter,
        vocabulary,
        settings.generation_options(),
    );
    let response = use_case.execute(SbomRequest::new(distribution, os_version.clone()))?;

    eprintln!("📝 Generating CycloneDX JSON format output...");
    let document = CycloneDxFormatter::new().format(&response.bill_of_materials)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(settings.output.clone()));
    presenter.present(&document)?;

    upload_if_configured(&settings, &host, distribution, &os_version, &document)
}

/// Configured distribution first, then the host's os-release `ID`.
fn resolve_distribution(
    configured: Option<&str>,
    host: &impl HostInfoProvider,
) -> Result<Distribution> {
    if let Some(distro) = configured {
        return Ok(distro.parse::<Distribution>()?);
    }

    let detected = host.distribution_id().ok_or_else(|| SbomError::Validation {
        message: "Unable to detect the distribution from /etc/os-release.\n\n💡 Hint: Pass --distro <NAME>".to_string(),
    })?;
    tracing::debug!(distro = %detected, "detected distribution");
    Ok(detected.parse::<Distribution>()?)
}

fn upload_if_configured(
    settings: &Settings,
    host: &impl HostInfoProvider,
    distribution: Distribution,
    os_version: &str,
    document: &str,
) -> Result<()> {
    let Some((api_url, api_key)) = settings.upload_endpoint() else {
        if settings.upload_half_configured() {
            eprintln!(
                "⚠️  Warning: Both an API URL and an API key are required to upload the SBOM; skipping upload."
            );
        }
        return Ok(());
    };

    let target = UploadTarget {
        distribution: distribution.id().to_string(),
        hostname: host.hostname()?,
        os_version: os_version.to_string(),
    };

    eprintln!("📤 Uploading SBOM to Dependency-Track at {}...", api_url);
    let client = DependencyTrackClient::new(api_url, api_key, settings.tls_verify)?;
    client.upload(document, &target)?;
    eprintln!("✅ SBOM uploaded for host {}", target.hostname);
    Ok(())
}
