//! distro2sbom - SBOM generation for the packages installed on a Linux host
//!
//! This library lists installed packages through dpkg, apk or rpm, resolves
//! their licenses against an SPDX vocabulary, fetches their dependencies on a
//! bounded worker pool and assembles a validated CycloneDX bill of materials.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use distro2sbom::prelude::*;
//! use std::path::Path;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # fn main() -> Result<()> {
//! let vocabulary = load_license_vocabulary(Path::new("/usr/share/distro2sbom/spdx.schema.json"))?;
//!
//! let use_case = GenerateSbomUseCase::new(
//!     SystemPackageManager::new(Some(Duration::from_secs(120))),
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//!     Arc::new(vocabulary),
//!     GenerationOptions::default(),
//! );
//!
//! let response = use_case.execute(SbomRequest::new(Distribution::Debian, "12"))?;
//! let output = CycloneDxFormatter::new().format(&response.bill_of_materials)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        load_license_vocabulary, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::CycloneDxFormatter;
    pub use crate::adapters::outbound::network::DependencyTrackClient;
    pub use crate::adapters::outbound::process::SystemPackageManager;
    pub use crate::application::dto::{SbomRequest, SbomResponse};
    pub use crate::application::services::{DependencyFetcher, FetchPolicy, LicenseResolver};
    pub use crate::application::use_cases::{GenerateSbomUseCase, GenerationOptions};
    pub use crate::ports::outbound::{
        HostInfoProvider, LicenseFileReader, OutputPresenter, PackageManager, ProgressReporter,
        SbomFormatter, SbomUploader, UploadTarget,
    };
    pub use crate::sbom_generation::domain::{
        BillOfMaterials, Component, Distribution, EnrichedPackage, LicenseVocabulary, Package,
        PackageManagerKind, SbomMetadata,
    };
    pub use crate::sbom_generation::services::{ConjunctionMode, SbomAssembler, SbomGenerator};
    pub use crate::shared::Result;
}
