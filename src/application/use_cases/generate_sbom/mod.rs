use crate::application::dto::{SbomRequest, SbomResponse};
use crate::application::services::{
    DependencyFetcher, FetchPolicy, LicenseResolver, DEFAULT_WORKER_COUNT,
};
use crate::ports::outbound::{LicenseFileReader, PackageManager, ProgressReporter};
use crate::sbom_generation::domain::{
    EnrichedPackage, LicenseVocabulary, Package, PackageManagerKind,
};
use crate::sbom_generation::services::{
    ConjunctionMode, DependencyMap, SbomAssembler, SbomGenerator,
};
use crate::shared::Result;
use std::sync::Arc;

/// Tuning knobs for a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Number of concurrent dependency queries
    pub workers: usize,
    /// Behaviour when a dependency query fails
    pub fetch_policy: FetchPolicy,
    /// Which words are dropped as conjunctions in license strings
    pub conjunction_mode: ConjunctionMode,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKER_COUNT,
            fetch_policy: FetchPolicy::default(),
            conjunction_mode: ConjunctionMode::default(),
        }
    }
}

/// GenerateSbomUseCase - Core use case for SBOM generation
///
/// Lists the installed packages, resolves their licenses, fetches their
/// dependencies on a worker pool and assembles the validated document.
/// Any failure while listing, fetching or assembling aborts the run; no
/// partial document is returned.
///
/// # Type Parameters
/// * `PM` - PackageManager implementation
/// * `LF` - LicenseFileReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateSbomUseCase<PM, LF, PR> {
    package_manager: PM,
    license_files: LF,
    progress_reporter: PR,
    vocabulary: Arc<LicenseVocabulary>,
    options: GenerationOptions,
}

impl<PM, LF, PR> GenerateSbomUseCase<PM, LF, PR>
where
    PM: PackageManager,
    LF: LicenseFileReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateSbomUseCase with injected dependencies
    pub fn new(
        package_manager: PM,
        license_files: LF,
        progress_reporter: PR,
        vocabulary: Arc<LicenseVocabulary>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            package_manager,
            license_files,
            progress_reporter,
            vocabulary,
            options,
        }
    }

    /// Executes the SBOM generation use case
    ///
    /// # Errors
    /// Returns an error if the package listing or a dependency query fails
    /// (under the fail-fast policy), or if the assembled document is
    /// inconsistent
    pub fn execute(&self, request: SbomRequest) -> Result<SbomResponse> {
        let kind = request.distribution.package_manager();

        // Step 1: List installed packages
        let packages = self.list_packages(kind)?;

        // Step 2: Resolve licenses
        let enriched_packages = self.resolve_licenses(kind, packages);

        // Step 3: Fetch dependencies of every package
        let dependency_map = self.fetch_dependencies(kind, &enriched_packages)?;

        // Step 4: Assemble and validate the document
        let operating_system =
            SbomAssembler::operating_system_component(request.distribution, &request.os_version);
        let metadata = SbomGenerator::generate_default_metadata(operating_system);
        let bill_of_materials = SbomAssembler::assemble(
            request.distribution,
            &request.os_version,
            &enriched_packages,
            &dependency_map,
            metadata,
        )?;

        self.progress_reporter.report(&format!(
            "✅ Assembled SBOM: {} component(s), {} dependency edge(s)",
            bill_of_materials.components().len(),
            bill_of_materials.dependencies().len()
        ));

        Ok(SbomResponse::new(bill_of_materials))
    }

    fn list_packages(&self, kind: PackageManagerKind) -> Result<Vec<Package>> {
        self.progress_reporter
            .report(&format!("📦 Listing installed packages ({})...", kind));

        let packages = self.package_manager.list_packages(kind)?;

        self.progress_reporter
            .report(&format!("✅ Detected {} package(s)", packages.len()));
        Ok(packages)
    }

    /// Best-effort: a package without a recognized license keeps an empty set.
    fn resolve_licenses(
        &self,
        kind: PackageManagerKind,
        packages: Vec<Package>,
    ) -> Vec<EnrichedPackage> {
        self.progress_reporter
            .report("🔍 Resolving license information...");

        let resolver = LicenseResolver::new(
            &self.package_manager,
            &self.license_files,
            &self.vocabulary,
            self.options.conjunction_mode,
        );

        let total = packages.len();
        let enriched: Vec<EnrichedPackage> = packages
            .into_iter()
            .enumerate()
            .map(|(idx, package)| {
                let licenses = resolver.resolve(kind, package.name());
                self.progress_reporter
                    .report_progress(idx + 1, total, Some("Resolving licenses"));
                EnrichedPackage::new(package, licenses)
            })
            .collect();

        let unlicensed = enriched.iter().filter(|p| p.licenses.is_empty()).count();
        if unlicensed > 0 {
            self.progress_reporter.report(&format!(
                "   - {} of {} package(s) without a recognized license",
                unlicensed, total
            ));
        }
        enriched
    }

    fn fetch_dependencies(
        &self,
        kind: PackageManagerKind,
        packages: &[EnrichedPackage],
    ) -> Result<DependencyMap> {
        self.progress_reporter.report(&format!(
            "🔗 Fetching dependencies ({} worker(s))...",
            self.options.workers.max(1)
        ));

        let fetcher = DependencyFetcher::new(
            &self.package_manager,
            self.options.workers,
            self.options.fetch_policy,
        );
        fetcher.fetch_all(
            kind,
            packages.iter().map(|p| p.package.name()),
            |done, total| {
                self.progress_reporter
                    .report_progress(done, total, Some("Fetching dependencies"))
            },
        )
    }
}
