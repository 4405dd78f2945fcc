// Format detection and parser dispatch

use std::path::Path;

use encoding_rs::Encoding;

use crate::csv::CsvParser;
use crate::diagnostic::ParseOutcome;
use crate::error::IoError;
use crate::xml::XmlParser;

/// A reader that turns one file into address records.
///
/// Implementations never fail outright: file-level errors are reported in
/// [`ParseOutcome::error`] next to the records collected so far.
pub trait Parser {
    fn parse(&self, path: &Path) -> ParseOutcome;
}

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Xml,
}

impl Format {
    /// Pick the format from the file extension (case-insensitive).
    /// Only looks at the path string, never touches the file system.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Some(Self::Csv),
            Some("xml") => Some(Self::Xml),
            _ => None,
        }
    }

    pub fn parser(self, options: &ParseOptions) -> Box<dyn Parser> {
        match self {
            Self::Csv => Box::new(CsvParser::new(options.clone())),
            Self::Xml => Box::new(XmlParser),
        }
    }
}

/// Knobs shared by the parsers.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Encoding used for CSV lines that are not valid UTF-8.
    pub fallback_encoding: &'static Encoding,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { fallback_encoding: encoding_rs::WINDOWS_1251 }
    }
}

impl ParseOptions {
    /// Options with the fallback encoding given by a WHATWG label
    /// (e.g. `"windows-1251"`, `"latin1"`). `None` if the label is unknown.
    pub fn with_fallback_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|fallback_encoding| Self { fallback_encoding })
    }
}

/// Parse `path` with the parser matching its extension.
///
/// Unknown extensions yield an empty outcome carrying
/// [`IoError::UnsupportedFormat`], without opening the file.
pub fn parse_file(path: &Path, options: &ParseOptions) -> ParseOutcome {
    let Some(format) = Format::from_path(path) else {
        return ParseOutcome::failed(IoError::UnsupportedFormat(path.to_path_buf()));
    };

    log::debug!("parsing {} as {:?}", path.display(), format);
    let outcome = format.parser(options).parse(path);
    log::debug!(
        "{}: {} records, {} skipped",
        path.display(),
        outcome.records.len(),
        outcome.diagnostics.len()
    );
    outcome
}
