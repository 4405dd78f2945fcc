// Skipped-entry diagnostics and the parse result that carries them

use std::fmt;

use addrstat_core::Address;

use crate::error::IoError;

/// Where a skipped entry came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// 1-based physical line number plus the raw line text.
    Line { number: usize, text: String },
    /// 0-based ordinal among the `item` elements of the document.
    Element { index: usize },
}

/// Why an entry was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TooFewFields { found: usize },
    InvalidFloor { value: String },
}

/// One advisory message about a dropped row or element. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: Location,
    pub reason: SkipReason,
}

impl Diagnostic {
    pub fn line(number: usize, text: impl Into<String>, reason: SkipReason) -> Self {
        Self { location: Location::Line { number, text: text.into() }, reason }
    }

    pub fn element(index: usize, reason: SkipReason) -> Self {
        Self { location: Location::Element { index }, reason }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewFields { found } => {
                write!(f, "expected at least 4 fields, found {found}")
            }
            Self::InvalidFloor { value } => write!(f, "floor is not an integer: {value:?}"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::Line { number, text } => {
                write!(f, "skipped line {number} ({}): {text}", self.reason)
            }
            Location::Element { index } => {
                write!(f, "skipped XML item #{} ({})", index + 1, self.reason)
            }
        }
    }
}

/// Everything one parser run produced.
///
/// `records` holds whatever was accumulated, even when `error` is set, so
/// downstream statistics always receive a valid (possibly empty) collection.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub records: Vec<Address>,
    pub diagnostics: Vec<Diagnostic>,
    pub error: Option<IoError>,
}

impl ParseOutcome {
    /// Outcome for a file that failed before any entry was read.
    pub fn failed(error: IoError) -> Self {
        Self { error: Some(error), ..Self::default() }
    }

    pub(crate) fn push(&mut self, address: Address) {
        self.records.push(address);
    }

    pub(crate) fn skip(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// True if the whole file was read without a file-level error.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}
