/// Outbound ports (driven ports) - Infrastructure interfaces
///
/// These ports define how the application core reaches the package manager,
/// the filesystem, the console and the network.
pub mod formatter;
pub mod host_info;
pub mod license_file_reader;
pub mod output_presenter;
pub mod package_manager;
pub mod progress_reporter;
pub mod sbom_uploader;

pub use formatter::SbomFormatter;
pub use host_info::HostInfoProvider;
pub use license_file_reader::LicenseFileReader;
pub use output_presenter::OutputPresenter;
pub use package_manager::PackageManager;
pub use progress_reporter::ProgressReporter;
pub use sbom_uploader::{SbomUploader, UploadTarget};
