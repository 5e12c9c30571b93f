mod license_normalizer;
mod sbom_assembler;
mod sbom_generator;

pub use license_normalizer::{ConjunctionMode, LicenseNormalizer, UNKNOWN_LICENSE};
pub use sbom_assembler::{DependencyMap, SbomAssembler};
pub use sbom_generator::{SbomGenerator, TOOL_NAME};
