use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// File-level failure. Any of these stops processing of the current file.
#[derive(Debug)]
pub enum IoError {
    /// The path does not resolve to a readable file.
    FileNotFound(PathBuf),
    /// I/O fault while opening or streaming the file.
    ReadError { path: PathBuf, message: String },
    /// The document structure is malformed (XML only).
    ParseError { path: PathBuf, message: String },
    /// Extension is neither `.csv` nor `.xml`. No file access was attempted.
    UnsupportedFormat(PathBuf),
    /// Writing a report export failed.
    Export { path: PathBuf, message: String },
}

impl IoError {
    pub(crate) fn open(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            _ => Self::read(path, err),
        }
    }

    pub(crate) fn read(path: &Path, err: impl fmt::Display) -> Self {
        Self::ReadError { path: path.to_path_buf(), message: err.to_string() }
    }

    pub(crate) fn export(path: &Path, err: impl fmt::Display) -> Self {
        Self::Export { path: path.to_path_buf(), message: err.to_string() }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::FileNotFound(path) | Self::UnsupportedFormat(path) => path,
            Self::ReadError { path, .. }
            | Self::ParseError { path, .. }
            | Self::Export { path, .. } => path,
        }
    }
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::ReadError { path, message } => {
                write!(f, "error reading {}: {message}", path.display())
            }
            Self::ParseError { path, message } => {
                write!(f, "malformed XML in {}: {message}", path.display())
            }
            Self::UnsupportedFormat(path) => write!(
                f,
                "unsupported file format: {} (expected .csv or .xml)",
                path.display()
            ),
            Self::Export { path, message } => {
                write!(f, "cannot export to {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for IoError {}
