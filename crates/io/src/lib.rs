// File I/O: address import (CSV, XML) and report export

pub mod csv;
pub mod diagnostic;
pub mod error;
pub mod export;
pub mod format;
pub mod xml;

pub use diagnostic::{Diagnostic, Location, ParseOutcome, SkipReason};
pub use error::IoError;
pub use format::{parse_file, Format, ParseOptions, Parser};
