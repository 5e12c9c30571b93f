/// Data Transfer Objects for application layer
///
/// DTOs carry data between the entry point and the use case, keeping the
/// domain layer isolated from configuration and CLI concerns.
mod sbom_request;
mod sbom_response;

pub use sbom_request::SbomRequest;
pub use sbom_response::SbomResponse;
