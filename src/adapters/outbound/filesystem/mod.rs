/// Filesystem adapters for host files, the license schema and output
mod file_reader;
mod file_writer;
mod vocabulary_loader;

pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use vocabulary_loader::load_license_vocabulary;
