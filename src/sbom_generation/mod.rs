/// SBOM generation core - domain model, pure services and static policies
///
/// Nothing in this module performs I/O; package manager output and files are
/// reached through the ports in `crate::ports`.
pub mod domain;
pub mod policies;
pub mod services;
