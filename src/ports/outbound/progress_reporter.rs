/// ProgressReporter port for user-facing status messages
///
/// Diagnostics go through `tracing`; this port carries the phase messages and
/// progress counts a user watches while packages are inspected.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress of a counted phase
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Items in the phase
    /// * `message` - Optional label for the phase
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
