/// Integration tests for the application layer
mod test_utilities;

use distro2sbom::prelude::*;
use distro2sbom::sbom_generation::domain::ROOT_COMPONENT_REF;
use distro2sbom::shared::error::SbomError;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use test_utilities::mocks::*;

fn vocabulary() -> Arc<LicenseVocabulary> {
    let schema = include_str!("fixtures/license-schema.json");
    Arc::new(LicenseVocabulary::from_schema_json(schema).unwrap())
}

fn ubuntu_host() -> MockPackageManager {
    MockPackageManager::new()
        .with_package("bash", "5.2.21-2ubuntu4")
        .with_package("libc6", "2.39-0ubuntu8.3")
        .with_package("base-files", "13ubuntu10")
        .with_license("bash", "GPL-3+")
        .with_license("libc6", "LGPL-2.1 and GPL-2+")
        .with_dependencies("bash", &["bash", "  PreDepends: libc6", "  Depends: base-files"])
        .with_dependencies(
            "libc6",
            &["libc6", "  Depends: libgcc-s1", "  Recommends: libidn2-0"],
        )
}

fn run(
    package_manager: MockPackageManager,
    license_files: MockLicenseFileReader,
    options: GenerationOptions,
) -> (Result<SbomResponse>, MockProgressReporter) {
    let progress_reporter = MockProgressReporter::new();
    let use_case = GenerateSbomUseCase::new(
        package_manager,
        license_files,
        progress_reporter.clone(),
        vocabulary(),
        options,
    );
    let result = use_case.execute(SbomRequest::new(Distribution::Ubuntu, "24.04"));
    (result, progress_reporter)
}

#[test]
fn test_generate_sbom_happy_path() {
    let (result, _) = run(
        ubuntu_host(),
        MockLicenseFileReader::new(),
        GenerationOptions::default(),
    );
    let bom = result.unwrap().bill_of_materials;

    let refs: Vec<&str> = bom.components().iter().map(|c| c.bom_ref()).collect();
    assert_eq!(
        refs,
        [ROOT_COMPONENT_REF, "1-bash", "2-libc6", "3-base-files"]
    );

    let root = bom.root_edge().unwrap();
    assert_eq!(root.to(), ["1-bash", "2-libc6", "3-base-files"]);

    let edges: HashMap<&str, &[String]> = bom
        .dependencies()
        .iter()
        .map(|e| (e.from(), e.to()))
        .collect();
    assert_eq!(edges["1-bash"], ["2-libc6", "3-base-files"]);
    // libgcc-s1 is not installed and Recommends is not a dependency
    assert!(!edges.contains_key("2-libc6"));
    assert!(!edges.contains_key("3-base-files"));
}

#[test]
fn test_generate_sbom_licenses_and_identifiers() {
    let (result, _) = run(
        ubuntu_host(),
        MockLicenseFileReader::new().with_license("base-files", "public-domain"),
        GenerationOptions::default(),
    );
    let bom = result.unwrap().bill_of_materials;
    let by_name: HashMap<&str, &Component> =
        bom.components().iter().map(|c| (c.name(), c)).collect();

    let bash = by_name["bash"];
    assert_eq!(
        bash.licenses().iter().collect::<Vec<_>>(),
        ["GPL-3.0+"]
    );
    assert_eq!(bash.purl(), Some("pkg:deb/ubuntu/bash@5.2.21-2ubuntu4"));
    assert_eq!(
        bash.cpe(),
        Some("cpe:2.3:a:ubuntu:bash:5.2.21-2ubuntu4:*:*:*:*:*:*:*")
    );

    let libc = by_name["libc6"];
    assert!(libc.licenses().contains("LGPL-2.1"));
    assert!(libc.licenses().contains("GPL-2.0+"));

    // Read from the license file, but not an SPDX identifier
    assert!(by_name["base-files"].licenses().is_empty());
}

#[test]
fn test_generate_sbom_license_file_fallback() {
    let package_manager = MockPackageManager::new().with_package("zlib1g", "1:1.3");
    let (result, _) = run(
        package_manager,
        MockLicenseFileReader::new().with_license("zlib1g", "Zlib"),
        GenerationOptions::default(),
    );
    let bom = result.unwrap().bill_of_materials;

    let zlib = &bom.components()[1];
    assert!(zlib.licenses().contains("Zlib"));
}

#[test]
fn test_generate_sbom_graph_invariants() {
    let mut package_manager = MockPackageManager::new();
    for i in 0..25 {
        let name = format!("pkg{}", i);
        let next = format!("Depends: pkg{}", (i + 1) % 25);
        package_manager = package_manager
            .with_package(&name, "1.0")
            .with_dependencies(&name, &[&next, &next, &format!("Depends: {}", name)]);
    }

    let (result, _) = run(
        package_manager,
        MockLicenseFileReader::new(),
        GenerationOptions::default(),
    );
    let bom = result.unwrap().bill_of_materials;

    let known: HashSet<&str> = bom.components().iter().map(|c| c.bom_ref()).collect();
    assert_eq!(known.len(), bom.components().len());

    let mut sources = HashSet::new();
    for edge in bom.dependencies() {
        assert!(known.contains(edge.from()));
        assert!(sources.insert(edge.from()), "duplicate edge source");
        let targets: HashSet<&String> = edge.to().iter().collect();
        assert_eq!(targets.len(), edge.to().len(), "duplicate edge target");
        for target in edge.to() {
            assert!(known.contains(target.as_str()));
            assert_ne!(target, edge.from());
        }
    }
    assert_eq!(bom.dependencies().len(), 26);
}

#[test]
fn test_generate_sbom_respects_worker_limit() {
    let mut package_manager = MockPackageManager::new().with_query_delay(Duration::from_millis(20));
    for i in 0..12 {
        package_manager = package_manager.with_package(&format!("pkg{}", i), "1.0");
    }
    let probe = package_manager.clone();

    let options = GenerationOptions {
        workers: 3,
        ..GenerationOptions::default()
    };
    let (result, _) = run(package_manager, MockLicenseFileReader::new(), options);
    result.unwrap();

    assert_eq!(probe.dependency_query_count(), 12);
    assert!(probe.peak_concurrency() <= 3);
    assert!(probe.peak_concurrency() >= 1);
}

#[test]
fn test_generate_sbom_is_repeatable() {
    let first = run(
        ubuntu_host(),
        MockLicenseFileReader::new(),
        GenerationOptions::default(),
    )
    .0
    .unwrap()
    .bill_of_materials;
    let second = run(
        ubuntu_host(),
        MockLicenseFileReader::new(),
        GenerationOptions {
            workers: 1,
            ..GenerationOptions::default()
        },
    )
    .0
    .unwrap()
    .bill_of_materials;

    assert_eq!(first.components(), second.components());
    assert_eq!(first.dependencies(), second.dependencies());
    assert_ne!(
        first.metadata().serial_number(),
        second.metadata().serial_number()
    );
}

#[test]
fn test_generate_sbom_dependency_failure() {
    let (result, _) = run(
        ubuntu_host().failing_dependencies_for("libc6"),
        MockLicenseFileReader::new(),
        GenerationOptions::default(),
    );
    let err = result.unwrap_err();

    match err.downcast_ref::<SbomError>() {
        Some(SbomError::DependencyFetch { package }) => assert_eq!(package, "libc6"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_generate_sbom_dependency_failure_tolerated() {
    let options = GenerationOptions {
        fetch_policy: FetchPolicy::SkipFailed,
        ..GenerationOptions::default()
    };
    let (result, _) = run(
        ubuntu_host().failing_dependencies_for("bash"),
        MockLicenseFileReader::new(),
        options,
    );
    let bom = result.unwrap().bill_of_materials;

    assert_eq!(bom.components().len(), 4);
    // Only the root edge remains
    assert_eq!(bom.dependencies().len(), 1);
}

#[test]
fn test_generate_sbom_progress_messages() {
    let (result, reporter) = run(
        ubuntu_host(),
        MockLicenseFileReader::new(),
        GenerationOptions::default(),
    );
    result.unwrap();

    assert!(reporter.has_message("Listing installed packages (dpkg)"));
    let messages = reporter.get_messages();
    assert!(messages.iter().any(|m| m == "Progress: 3/3 - Resolving licenses"));
    assert!(messages.iter().any(|m| m == "Progress: 3/3 - Fetching dependencies"));
    assert!(reporter.has_message("Assembled SBOM: 4 component(s), 2 dependency edge(s)"));
    assert!(reporter.message_count() > 6);
}

#[test]
fn test_generate_sbom_formats_as_cyclonedx() {
    let (result, _) = run(
        ubuntu_host(),
        MockLicenseFileReader::new(),
        GenerationOptions::default(),
    );
    let bom = result.unwrap().bill_of_materials;

    let document = CycloneDxFormatter::new().format(&bom).unwrap();
    let json: serde_json::Value = serde_json::from_str(&document).unwrap();

    assert_eq!(json["bomFormat"], "CycloneDX");
    assert_eq!(json["specVersion"], "1.6");
    assert_eq!(json["metadata"]["component"]["name"], "ubuntu");
    assert_eq!(json["metadata"]["component"]["version"], "24.04");
    assert_eq!(json["components"].as_array().unwrap().len(), 4);
    assert_eq!(json["components"][1]["licenses"][0]["license"]["id"], "GPL-3.0+");
    assert_eq!(json["dependencies"][0]["ref"], ROOT_COMPONENT_REF);
}
