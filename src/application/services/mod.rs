/// Application services coordinating ports for a single run
mod dependency_fetcher;
mod license_resolver;

pub use dependency_fetcher::{DependencyFetcher, FetchPolicy, DEFAULT_WORKER_COUNT};
pub use license_resolver::LicenseResolver;
