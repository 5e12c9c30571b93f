use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{
    BillOfMaterials, Component as DomainComponent, DependencyEdge, SbomMetadata,
};
use crate::shared::Result;
use serde::Serialize;

const SPEC_VERSION: &str = "1.6";
const LIFECYCLE_PHASE: &str = "operations";
const LICENSE_ACKNOWLEDGEMENT: &str = "concluded";

#[derive(Debug, Serialize)]
struct Bom<'a> {
    #[serde(rename = "bomFormat")]
    bom_format: &'static str,
    #[serde(rename = "specVersion")]
    spec_version: &'static str,
    #[serde(rename = "serialNumber")]
    serial_number: &'a str,
    version: u32,
    metadata: Metadata<'a>,
    components: Vec<Component<'a>>,
    dependencies: Vec<Dependency<'a>>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    timestamp: &'a str,
    lifecycles: Vec<Lifecycle>,
    tools: Tools<'a>,
    component: Component<'a>,
}

#[derive(Debug, Serialize)]
struct Lifecycle {
    phase: &'static str,
}

#[derive(Debug, Serialize)]
struct Tools<'a> {
    components: Vec<Tool<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    #[serde(rename = "type")]
    component_type: &'static str,
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
struct Component<'a> {
    #[serde(rename = "type")]
    component_type: &'static str,
    #[serde(rename = "bom-ref")]
    bom_ref: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    supplier: Option<Supplier<'a>>,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    licenses: Vec<License>,
    #[serde(skip_serializing_if = "Option::is_none")]
    purl: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cpe: Option<&'a str>,
    #[serde(rename = "externalReferences", skip_serializing_if = "Vec::is_empty")]
    external_references: Vec<ExternalReference<'a>>,
}

#[derive(Debug, Serialize)]
struct Supplier<'a> {
    name: &'a str,
    contact: Vec<Contact<'a>>,
}

#[derive(Debug, Serialize)]
struct Contact<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct License {
    license: LicenseContent,
}

#[derive(Debug, Serialize)]
struct LicenseContent {
    id: String,
    url: String,
    acknowledgement: &'static str,
}

#[derive(Debug, Serialize)]
struct ExternalReference<'a> {
    #[serde(rename = "type")]
    reference_type: &'static str,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Dependency<'a> {
    #[serde(rename = "ref")]
    bom_ref: &'a str,
    #[serde(rename = "dependsOn")]
    depends_on: &'a [String],
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.6 JSON format
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, bom: &BillOfMaterials) -> Result<String> {
        let document = Bom {
            bom_format: "CycloneDX",
            spec_version: SPEC_VERSION,
            serial_number: bom.metadata().serial_number(),
            version: 1,
            metadata: build_metadata(bom.metadata()),
            components: bom.components().iter().map(build_component).collect(),
            dependencies: bom.dependencies().iter().map(build_dependency).collect(),
        };

        serde_json::to_string_pretty(&document).map_err(Into::into)
    }
}

fn build_metadata(metadata: &SbomMetadata) -> Metadata<'_> {
    Metadata {
        timestamp: metadata.timestamp(),
        lifecycles: vec![Lifecycle {
            phase: LIFECYCLE_PHASE,
        }],
        tools: Tools {
            components: vec![Tool {
                component_type: "application",
                name: metadata.tool_name(),
                version: metadata.tool_version(),
            }],
        },
        component: build_component(metadata.operating_system()),
    }
}

fn build_component(component: &DomainComponent) -> Component<'_> {
    Component {
        component_type: component.kind().as_str(),
        bom_ref: component.bom_ref(),
        supplier: component.supplier().map(|supplier| Supplier {
            name: &supplier.name,
            contact: vec![Contact {
                email: &supplier.contact_email,
            }],
        }),
        name: component.name(),
        version: component.version(),
        licenses: component
            .licenses()
            .iter()
            .map(|id| License {
                license: LicenseContent {
                    id: id.clone(),
                    url: format!("https://spdx.org/licenses/{}.html", id),
                    acknowledgement: LICENSE_ACKNOWLEDGEMENT,
                },
            })
            .collect(),
        purl: component.purl(),
        cpe: component.cpe(),
        external_references: component
            .external_references()
            .iter()
            .map(|reference| ExternalReference {
                reference_type: reference.kind.as_str(),
                url: &reference.url,
                comment: reference.comment.as_deref(),
            })
            .collect(),
    }
}

fn build_dependency(edge: &DependencyEdge) -> Dependency<'_> {
    Dependency {
        bom_ref: edge.from(),
        depends_on: edge.to(),
    }
}
