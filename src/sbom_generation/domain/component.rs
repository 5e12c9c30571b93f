use std::collections::BTreeSet;

/// Reference identifier of the synthetic root component
pub const ROOT_COMPONENT_REF: &str = "CDXRef-RootComponent";

/// Name of the synthetic root component
pub const ROOT_COMPONENT_NAME: &str = "RootComponent";

/// Reference identifier of the operating system component in the metadata block
pub const DOCUMENT_REF: &str = "CDXRef-DOCUMENT";

/// CycloneDX component classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Application,
    Library,
    OperatingSystem,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Application => "application",
            ComponentKind::Library => "library",
            ComponentKind::OperatingSystem => "operating-system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalReferenceKind {
    Website,
    Distribution,
}

impl ExternalReferenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalReferenceKind::Website => "website",
            ExternalReferenceKind::Distribution => "distribution",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    pub kind: ExternalReferenceKind,
    pub url: String,
    pub comment: Option<String>,
}

/// Organization that ships a package, with its contact address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Supplier {
    pub name: String,
    pub contact_email: String,
}

/// One node of the bill of materials
///
/// Built with [`Component::new`] and the `with_*` methods; immutable once
/// handed to a [`BillOfMaterials`](super::BillOfMaterials).
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    bom_ref: String,
    kind: ComponentKind,
    name: String,
    version: String,
    licenses: BTreeSet<String>,
    purl: Option<String>,
    cpe: Option<String>,
    supplier: Option<Supplier>,
    external_references: Vec<ExternalReference>,
}

impl Component {
    pub fn new(bom_ref: String, kind: ComponentKind, name: String, version: String) -> Self {
        Self {
            bom_ref,
            kind,
            name,
            version,
            licenses: BTreeSet::new(),
            purl: None,
            cpe: None,
            supplier: None,
            external_references: Vec::new(),
        }
    }

    pub fn with_licenses(mut self, licenses: BTreeSet<String>) -> Self {
        self.licenses = licenses;
        self
    }

    pub fn with_purl(mut self, purl: String) -> Self {
        self.purl = Some(purl);
        self
    }

    pub fn with_cpe(mut self, cpe: String) -> Self {
        self.cpe = Some(cpe);
        self
    }

    pub fn with_supplier(mut self, supplier: Supplier) -> Self {
        self.supplier = Some(supplier);
        self
    }

    pub fn with_external_reference(mut self, reference: ExternalReference) -> Self {
        self.external_references.push(reference);
        self
    }

    pub fn bom_ref(&self) -> &str {
        &self.bom_ref
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn licenses(&self) -> &BTreeSet<String> {
        &self.licenses
    }

    pub fn purl(&self) -> Option<&str> {
        self.purl.as_deref()
    }

    pub fn cpe(&self) -> Option<&str> {
        self.cpe.as_deref()
    }

    pub fn supplier(&self) -> Option<&Supplier> {
        self.supplier.as_ref()
    }

    pub fn external_references(&self) -> &[ExternalReference] {
        &self.external_references
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_builder() {
        let component = Component::new(
            "1-bash".to_string(),
            ComponentKind::Library,
            "bash".to_string(),
            "5.2".to_string(),
        )
        .with_purl("pkg:deb/debian/bash@5.2".to_string())
        .with_licenses(BTreeSet::from(["GPL-3.0".to_string()]))
        .with_external_reference(ExternalReference {
            kind: ExternalReferenceKind::Distribution,
            url: "https://packages.debian.org/bash".to_string(),
            comment: None,
        });

        assert_eq!(component.bom_ref(), "1-bash");
        assert_eq!(component.kind().as_str(), "library");
        assert_eq!(component.purl(), Some("pkg:deb/debian/bash@5.2"));
        assert!(component.cpe().is_none());
        assert!(component.licenses().contains("GPL-3.0"));
        assert_eq!(component.external_references().len(), 1);
    }

    #[test]
    fn test_kind_strings() {
        assert_eq!(ComponentKind::Application.as_str(), "application");
        assert_eq!(ComponentKind::OperatingSystem.as_str(), "operating-system");
        assert_eq!(ExternalReferenceKind::Website.as_str(), "website");
        assert_eq!(ExternalReferenceKind::Distribution.as_str(), "distribution");
    }
}
