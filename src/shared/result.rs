/// Result alias used throughout the crate; errors propagate as `anyhow::Error`
/// and typed failures are carried as `SbomError` inside it.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
