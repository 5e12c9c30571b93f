/// Process adapters for invoking the host's package manager
mod command_runner;
mod system_package_manager;

pub use command_runner::CommandRunner;
pub use system_package_manager::SystemPackageManager;
