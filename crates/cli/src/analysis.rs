// One pipeline run: parse a file, compute statistics, time it

use std::path::Path;
use std::time::{Duration, Instant};

use addrstat_core::Report;
use addrstat_io::{parse_file, Diagnostic, IoError, ParseOptions};

pub struct Analysis {
    pub report: Report,
    pub diagnostics: Vec<Diagnostic>,
    /// File-level failure. `report` still covers the records read before it.
    pub error: Option<IoError>,
    pub elapsed: Duration,
}

pub fn analyze(path: &Path, options: &ParseOptions) -> Analysis {
    let started = Instant::now();
    let outcome = parse_file(path, options);
    let report = Report::compute(&outcome.records);

    Analysis {
        report,
        diagnostics: outcome.diagnostics,
        error: outcome.error,
        elapsed: started.elapsed(),
    }
}
