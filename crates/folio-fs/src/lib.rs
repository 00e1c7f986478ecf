pub mod io;
pub mod scanner;

pub use io::{FsError, atomic_write_str, read_optional_yaml, read_yaml};
pub use scanner::{list_dirs, list_files_with_ext};
