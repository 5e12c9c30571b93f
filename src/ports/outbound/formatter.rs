use crate::sbom_generation::domain::BillOfMaterials;
use crate::shared::Result;

/// SbomFormatter port for serializing an assembled bill of materials
pub trait SbomFormatter {
    /// Formats the document into its wire representation
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, bom: &BillOfMaterials) -> Result<String>;
}
