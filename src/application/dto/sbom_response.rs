use crate::sbom_generation::domain::BillOfMaterials;

/// SbomResponse - Response DTO from the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomResponse {
    /// The validated document, ready for formatting
    pub bill_of_materials: BillOfMaterials,
}

impl SbomResponse {
    pub fn new(bill_of_materials: BillOfMaterials) -> Self {
        Self { bill_of_materials }
    }
}
