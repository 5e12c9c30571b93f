/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with the package manager,
/// the filesystem, the console and Dependency-Track.
pub mod outbound;
