//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | CLI usage error (bad args, bad settings value)   |
//! | 3    | Input file not found                             |
//! | 4    | I/O error while reading input or writing export  |
//! | 5    | Malformed XML document                           |
//! | 6    | Unsupported input/export format                  |
//! | 7    | Input parsed but contained no address records    |
//!
//! `analyze` renders whatever was parsed before failing, so a non-zero code
//! does not mean the output is empty.

use addrstat_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, invalid settings.
pub const EXIT_USAGE: u8 = 2;

/// Input path does not resolve.
pub const EXIT_FILE_NOT_FOUND: u8 = 3;

/// I/O fault mid-stream, or export could not be written.
pub const EXIT_READ: u8 = 4;

/// Malformed XML document structure.
pub const EXIT_PARSE: u8 = 5;

/// Extension is not one of the supported formats.
pub const EXIT_UNSUPPORTED_FORMAT: u8 = 6;

/// File was read but produced zero records.
pub const EXIT_NO_RECORDS: u8 = 7;

/// Map a file-level error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::FileNotFound(_) => EXIT_FILE_NOT_FOUND,
        IoError::ReadError { .. } | IoError::Export { .. } => EXIT_READ,
        IoError::ParseError { .. } => EXIT_PARSE,
        IoError::UnsupportedFormat(_) => EXIT_UNSUPPORTED_FORMAT,
    }
}
