//! File I/O

mod fs;

pub use fs::{FsError, MARKDOWN_EXTENSIONS, is_markdown_file, read_markdown, write_atomic};
