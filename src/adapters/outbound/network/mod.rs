/// Network adapters for the SBOM upload
mod dependency_track_client;

pub use dependency_track_client::DependencyTrackClient;
