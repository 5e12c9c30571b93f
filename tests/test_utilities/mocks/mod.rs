/// Mock implementations for testing
mod mock_license_file_reader;
mod mock_package_manager;
mod mock_progress_reporter;

pub use mock_license_file_reader::MockLicenseFileReader;
pub use mock_package_manager::MockPackageManager;
pub use mock_progress_reporter::MockProgressReporter;
