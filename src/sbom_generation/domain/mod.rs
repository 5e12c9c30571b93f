pub mod bill_of_materials;
pub mod component;
pub mod component_index;
pub mod distribution;
pub mod license_vocabulary;
pub mod package;
pub mod sbom_metadata;

pub use bill_of_materials::{BillOfMaterials, DependencyEdge};
pub use component::{
    Component, ComponentKind, ExternalReference, ExternalReferenceKind, Supplier, DOCUMENT_REF,
    ROOT_COMPONENT_NAME, ROOT_COMPONENT_REF,
};
pub use component_index::ComponentIndex;
pub use distribution::{Distribution, PackageManagerKind};
pub use license_vocabulary::LicenseVocabulary;
pub use package::{EnrichedPackage, Package, PackageName, Version};
pub use sbom_metadata::SbomMetadata;
