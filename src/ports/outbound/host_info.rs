use crate::shared::Result;

/// HostInfoProvider port for identifying the scanned host
pub trait HostInfoProvider {
    /// Distribution identifier (the os-release `ID`), if it can be determined
    fn distribution_id(&self) -> Option<String>;

    /// Operating system version; always yields a value, falling back to the
    /// kernel release and finally to the platform name
    fn os_version(&self) -> String;

    /// Host name used as the Dependency-Track project name
    ///
    /// # Errors
    /// Returns an error if no host name source is readable
    fn hostname(&self) -> Result<String>;
}
