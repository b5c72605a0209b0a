pub mod file_format;
pub mod log_setup;
pub mod serde;
pub mod test_utils;

pub use file_format::{FileExtensionError, FileFormat, get_file_extension};
