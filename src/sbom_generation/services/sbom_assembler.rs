use crate::sbom_generation::domain::{
    BillOfMaterials, Component, ComponentIndex, ComponentKind, DependencyEdge, Distribution,
    EnrichedPackage, ExternalReference, ExternalReferenceKind, SbomMetadata, DOCUMENT_REF,
    ROOT_COMPONENT_NAME, ROOT_COMPONENT_REF,
};
use crate::sbom_generation::policies::DependencyNamePolicy;
use crate::shared::Result;
use std::collections::{HashMap, HashSet};

/// Raw dependency names per package name, as returned by the dependency fetcher
pub type DependencyMap = HashMap<String, Vec<String>>;

/// SbomAssembler service: builds the component list and dependency graph
///
/// The synthetic root component occupies position 0 and every package
/// component gets the reference `"{ordinal}-{name}"` with a 1-based ordinal
/// taken from the listing order. The root edge lists every package component;
/// package edges are emitted only when at least one dependency resolves.
pub struct SbomAssembler;

impl SbomAssembler {
    /// Assembles and validates the bill of materials.
    ///
    /// # Arguments
    /// * `distribution` - Distribution the packages were listed from
    /// * `os_version` - Version of the operating system, used for the root component
    /// * `packages` - Listed packages with their resolved licenses, in listing order
    /// * `dependency_map` - Raw dependency names for every package name
    /// * `metadata` - Document metadata (timestamp, serial number, tool, OS component)
    pub fn assemble(
        distribution: Distribution,
        os_version: &str,
        packages: &[EnrichedPackage],
        dependency_map: &DependencyMap,
        metadata: SbomMetadata,
    ) -> Result<BillOfMaterials> {
        let mut components = Vec::with_capacity(packages.len() + 1);
        components.push(Self::root_component(os_version));
        components.extend(
            packages
                .iter()
                .enumerate()
                .map(|(i, pkg)| Self::package_component(distribution, i + 1, pkg)),
        );

        let index = ComponentIndex::build(
            packages
                .iter()
                .zip(&components[1..])
                .map(|(pkg, component)| (pkg.package.name(), component.bom_ref())),
        );

        let mut dependencies = Vec::with_capacity(packages.len() + 1);
        dependencies.push(DependencyEdge::new(
            ROOT_COMPONENT_REF.to_string(),
            components[1..]
                .iter()
                .map(|c| c.bom_ref().to_string())
                .collect(),
        ));

        for (pkg, component) in packages.iter().zip(&components[1..]) {
            let raw = dependency_map
                .get(pkg.package.name())
                .map(Vec::as_slice)
                .unwrap_or_default();
            let targets = Self::resolve_targets(&index, component.bom_ref(), raw);
            if !targets.is_empty() {
                dependencies.push(DependencyEdge::new(component.bom_ref().to_string(), targets));
            }
        }

        let bom = BillOfMaterials::new(
            metadata,
            ROOT_COMPONENT_REF.to_string(),
            components,
            dependencies,
        );
        bom.validate()?;
        Ok(bom)
    }

    /// Component describing the scanned operating system, placed in the metadata block
    pub fn operating_system_component(distribution: Distribution, os_version: &str) -> Component {
        Component::new(
            DOCUMENT_REF.to_string(),
            ComponentKind::OperatingSystem,
            distribution.id().to_string(),
            os_version.to_string(),
        )
        .with_external_reference(ExternalReference {
            kind: ExternalReferenceKind::Website,
            url: distribution.homepage().to_string(),
            comment: Some("Home page for project".to_string()),
        })
    }

    pub fn reference_id(ordinal: usize, package_name: &str) -> String {
        format!("{}-{}", ordinal, package_name)
    }

    /// Package URL, e.g. `pkg:deb/debian/libc6@2.36-9`
    pub fn purl(distribution: Distribution, name: &str, version: &str) -> String {
        format!(
            "pkg:{}/{}/{}@{}",
            distribution.package_manager().purl_type(),
            distribution.id(),
            urlencoding::encode(name),
            urlencoding::encode(version)
        )
    }

    /// CPE 2.3 formatted string with the distribution as vendor
    pub fn cpe(distribution: Distribution, name: &str, version: &str) -> String {
        format!(
            "cpe:2.3:a:{}:{}:{}:*:*:*:*:*:*:*",
            distribution.id(),
            escape_cpe(name),
            escape_cpe(version)
        )
    }

    fn root_component(os_version: &str) -> Component {
        Component::new(
            ROOT_COMPONENT_REF.to_string(),
            ComponentKind::Application,
            ROOT_COMPONENT_NAME.to_string(),
            os_version.to_string(),
        )
    }

    fn package_component(
        distribution: Distribution,
        ordinal: usize,
        enriched: &EnrichedPackage,
    ) -> Component {
        let name = enriched.package.name();
        let version = enriched.package.version();

        Component::new(
            Self::reference_id(ordinal, name),
            ComponentKind::Library,
            name.to_string(),
            version.to_string(),
        )
        .with_licenses(enriched.licenses.clone())
        .with_supplier(distribution.supplier())
        .with_purl(Self::purl(distribution, name, version))
        .with_cpe(Self::cpe(distribution, name, version))
        .with_external_reference(ExternalReference {
            kind: ExternalReferenceKind::Distribution,
            url: distribution.package_page(name),
            comment: Some("Package distribution reference".to_string()),
        })
    }

    /// Maps raw dependency names to reference identifiers, first-seen order,
    /// without duplicates or a self reference.
    fn resolve_targets(index: &ComponentIndex, own_ref: &str, raw: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut targets = Vec::new();

        for entry in DependencyNamePolicy::dependency_lines(raw) {
            let resolved = index.lookup(entry.trim()).or_else(|| {
                DependencyNamePolicy::candidate_name(entry).and_then(|name| index.lookup(name))
            });

            match resolved {
                Some(target) if target != own_ref => {
                    if seen.insert(target) {
                        targets.push(target.to_string());
                    }
                }
                Some(_) => {}
                None => tracing::trace!(dependency = %entry, from = own_ref, "unresolved dependency name"),
            }
        }

        targets
    }
}

fn escape_cpe(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ':' | '*' | '?' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
