use super::component::Component;
use super::sbom_metadata::SbomMetadata;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::collections::HashSet;

/// A component and the components it depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    from: String,
    to: Vec<String>,
}

impl DependencyEdge {
    pub fn new(from: String, to: Vec<String>) -> Self {
        Self { from, to }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &[String] {
        &self.to
    }
}

/// The assembled document: metadata, ordered components and ordered dependency edges
#[derive(Debug, Clone)]
pub struct BillOfMaterials {
    metadata: SbomMetadata,
    root_ref: String,
    components: Vec<Component>,
    dependencies: Vec<DependencyEdge>,
}

impl BillOfMaterials {
    pub fn new(
        metadata: SbomMetadata,
        root_ref: String,
        components: Vec<Component>,
        dependencies: Vec<DependencyEdge>,
    ) -> Self {
        Self {
            metadata,
            root_ref,
            components,
            dependencies,
        }
    }

    pub fn metadata(&self) -> &SbomMetadata {
        &self.metadata
    }

    pub fn root_ref(&self) -> &str {
        &self.root_ref
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn dependencies(&self) -> &[DependencyEdge] {
        &self.dependencies
    }

    pub fn root_edge(&self) -> Option<&DependencyEdge> {
        self.dependencies.iter().find(|e| e.from == self.root_ref)
    }

    /// Checks the structural invariants of the document:
    /// - component reference identifiers are unique
    /// - every edge source and target names an existing component
    /// - each source has a single edge and no duplicate targets
    /// - the root component exists and has an edge
    pub fn validate(&self) -> Result<()> {
        let mut refs = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if !refs.insert(component.bom_ref()) {
                return Err(invalid(format!(
                    "duplicate component reference '{}'",
                    component.bom_ref()
                )));
            }
        }

        if !refs.contains(self.root_ref.as_str()) {
            return Err(invalid(format!(
                "root component '{}' is missing",
                self.root_ref
            )));
        }

        let mut sources = HashSet::with_capacity(self.dependencies.len());
        for edge in &self.dependencies {
            if !refs.contains(edge.from()) {
                return Err(invalid(format!(
                    "dependency source '{}' is not a component",
                    edge.from()
                )));
            }
            if !sources.insert(edge.from()) {
                return Err(invalid(format!(
                    "component '{}' has more than one dependency edge",
                    edge.from()
                )));
            }

            let mut targets = HashSet::with_capacity(edge.to().len());
            for target in edge.to() {
                if !refs.contains(target.as_str()) {
                    return Err(invalid(format!(
                        "dependency target '{}' of '{}' is not a component",
                        target,
                        edge.from()
                    )));
                }
                if !targets.insert(target.as_str()) {
                    return Err(invalid(format!(
                        "dependency target '{}' listed twice for '{}'",
                        target,
                        edge.from()
                    )));
                }
            }
        }

        if !sources.contains(self.root_ref.as_str()) {
            return Err(invalid("root dependency edge is missing".to_string()));
        }

        Ok(())
    }
}

fn invalid(details: String) -> anyhow::Error {
    SbomError::InvalidDocument { details }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::component::{
        ComponentKind, DOCUMENT_REF, ROOT_COMPONENT_NAME, ROOT_COMPONENT_REF,
    };

    fn metadata() -> SbomMetadata {
        SbomMetadata::new(
            "2024-01-01T00:00:00Z".to_string(),
            "distro2sbom".to_string(),
            "0.0.0".to_string(),
            "urn:uuid:test".to_string(),
            Component::new(
                DOCUMENT_REF.to_string(),
                ComponentKind::OperatingSystem,
                "ubuntu".to_string(),
                "24.04".to_string(),
            ),
        )
    }

    fn component(bom_ref: &str) -> Component {
        Component::new(
            bom_ref.to_string(),
            ComponentKind::Library,
            bom_ref.to_string(),
            "1.0".to_string(),
        )
    }

    fn root() -> Component {
        Component::new(
            ROOT_COMPONENT_REF.to_string(),
            ComponentKind::Application,
            ROOT_COMPONENT_NAME.to_string(),
            "24.04".to_string(),
        )
    }

    fn edge(from: &str, to: &[&str]) -> DependencyEdge {
        DependencyEdge::new(from.to_string(), to.iter().map(|s| s.to_string()).collect())
    }

    fn bom(components: Vec<Component>, dependencies: Vec<DependencyEdge>) -> BillOfMaterials {
        BillOfMaterials::new(
            metadata(),
            ROOT_COMPONENT_REF.to_string(),
            components,
            dependencies,
        )
    }

    #[test]
    fn test_valid_document() {
        let document = bom(
            vec![root(), component("1-a"), component("2-b")],
            vec![edge(ROOT_COMPONENT_REF, &["1-a", "2-b"]), edge("1-a", &["2-b"])],
        );
        assert!(document.validate().is_ok());
        assert_eq!(document.root_edge().unwrap().to().len(), 2);
    }

    #[test]
    fn test_empty_root_edge_is_valid() {
        let document = bom(vec![root()], vec![edge(ROOT_COMPONENT_REF, &[])]);
        assert!(document.validate().is_ok());
    }

    #[test]
    fn test_missing_root_edge() {
        let document = bom(vec![root(), component("1-a")], vec![]);
        let err = document.validate().unwrap_err().to_string();
        assert!(err.contains("root dependency edge is missing"));
    }

    #[test]
    fn test_dangling_target() {
        let document = bom(
            vec![root(), component("1-a")],
            vec![edge(ROOT_COMPONENT_REF, &["1-a"]), edge("1-a", &["9-ghost"])],
        );
        let err = document.validate().unwrap_err().to_string();
        assert!(err.contains("9-ghost"));
    }

    #[test]
    fn test_duplicate_reference() {
        let document = bom(
            vec![root(), component("1-a"), component("1-a")],
            vec![edge(ROOT_COMPONENT_REF, &["1-a"])],
        );
        let err = document.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate component reference"));
    }

    #[test]
    fn test_duplicate_target() {
        let document = bom(
            vec![root(), component("1-a")],
            vec![edge(ROOT_COMPONENT_REF, &["1-a", "1-a"])],
        );
        assert!(document.validate().is_err());
    }
}
