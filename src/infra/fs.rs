//! Markdown file reading and atomic artifact writes.

use std::io::{self, Write as IoWrite};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

/// File extensions treated as markdown, compared case-insensitively.
pub const MARKDOWN_EXTENSIONS: [&str; 8] = [
    "md", "markdown", "mdown", "mkd", "mkdn", "mdwn", "mdtxt", "mdtext",
];

/// Errors during file system operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("File not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a file: {path}")]
    NotAFile { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Unable to decode file. File may not be a text file.")]
    InvalidEncoding { path: PathBuf },

    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("atomic write failed for {path}: {source}")]
    AtomicWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FsError::NotFound { path: path.into() },
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path: path.into() },
            _ => FsError::Io {
                path: path.into(),
                source: error,
            },
        }
    }

    /// Path the failed operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            FsError::NotFound { path }
            | FsError::NotAFile { path }
            | FsError::PermissionDenied { path }
            | FsError::InvalidEncoding { path }
            | FsError::Io { path, .. }
            | FsError::AtomicWrite { path, .. } => path,
        }
    }
}

/// Reads a markdown file as UTF-8 text, dropping a leading byte order mark.
///
/// # Errors
///
/// Returns `FsError::NotFound` if the file doesn't exist.
/// Returns `FsError::NotAFile` if the path is a directory or other non-file.
/// Returns `FsError::PermissionDenied` if access is denied.
/// Returns `FsError::InvalidEncoding` if the bytes are not valid UTF-8.
pub fn read_markdown(path: &Path) -> Result<String, FsError> {
    let metadata = std::fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
    if !metadata.is_file() {
        return Err(FsError::NotAFile { path: path.into() });
    }

    let bytes = std::fs::read(path).map_err(|e| FsError::from_io(path, e))?;
    let content =
        String::from_utf8(bytes).map_err(|_| FsError::InvalidEncoding { path: path.into() })?;

    match content.strip_prefix('\u{FEFF}') {
        Some(stripped) => Ok(stripped.to_string()),
        None => Ok(content),
    }
}

/// Writes bytes to `path` atomically, creating missing parent directories.
///
/// The content goes to a temporary file in the target directory which is then
/// renamed over `path`, so readers never observe a partial file. On Unix a
/// new file gets the usual `0o666` less the umask, and an existing file keeps
/// its mode.
///
/// # Errors
///
/// Returns `FsError::PermissionDenied` or `FsError::Io` if the directory or
/// temporary file cannot be created, and `FsError::AtomicWrite` if the rename
/// fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), FsError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

    let mut temp = temp_file_in(parent).map_err(|e| FsError::from_io(path, e))?;
    temp.write_all(contents)
        .map_err(|e| FsError::from_io(path, e))?;

    // An overwritten file keeps its mode.
    #[cfg(unix)]
    if let Ok(existing) = std::fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| FsError::from_io(path, e))?;
    }

    temp.persist(path).map_err(|e| FsError::AtomicWrite {
        path: path.into(),
        source: e.error,
    })?;

    Ok(())
}

/// Temporary file created with the mode a plain `File::create` would get
/// (`0o666` less the umask) instead of tempfile's private `0o600`.
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

/// True when the path carries one of [`MARKDOWN_EXTENSIONS`].
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
