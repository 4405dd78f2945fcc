// Report rendering (text / JSON)

use std::io::{self, Write};

use serde::Serialize;

use addrstat_config::ReportFormat;
use addrstat_core::ReportSummary;

use crate::analysis::Analysis;

pub fn render<W: Write>(
    out: &mut W,
    analysis: &Analysis,
    format: ReportFormat,
    show_timing: bool,
) -> io::Result<()> {
    match format {
        ReportFormat::Text => render_text(out, analysis, show_timing),
        ReportFormat::Json => render_json(out, analysis, show_timing),
    }
}

fn render_text<W: Write>(out: &mut W, analysis: &Analysis, show_timing: bool) -> io::Result<()> {
    let report = &analysis.report;

    if report.is_empty() {
        writeln!(out, "File contains no data or could not be read")?;
    } else {
        writeln!(out, "\n=== STATISTICS ===")?;

        writeln!(out, "\n--- DUPLICATE RECORDS ---")?;
        let duplicates = report.sorted_duplicates();
        if duplicates.is_empty() {
            writeln!(out, "No duplicates found")?;
        }
        for (address, count) in duplicates {
            writeln!(out, "{address} - occurrences: {count}")?;
        }

        writeln!(out, "\n--- FLOOR STATISTICS ---")?;
        for (city, histogram) in report.sorted_cities() {
            let [f1, f2, f3, f4, f5] = *histogram.buckets();
            writeln!(
                out,
                "{city}: 1-floor: {f1}, 2-floor: {f2}, 3-floor: {f3}, 4-floor: {f4}, 5-floor: {f5}"
            )?;
        }
    }

    if show_timing {
        writeln!(out, "\nProcessing time: {} ms", analysis.elapsed.as_millis())?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    summary: ReportSummary<'a>,
    skipped: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<u64>,
}

fn render_json<W: Write>(out: &mut W, analysis: &Analysis, show_timing: bool) -> io::Result<()> {
    let json = JsonReport {
        summary: analysis.report.summary(),
        skipped: analysis.diagnostics.len(),
        error: analysis.error.as_ref().map(|e| e.to_string()),
        elapsed_ms: show_timing.then(|| analysis.elapsed.as_millis() as u64),
    };
    serde_json::to_writer_pretty(&mut *out, &json)?;
    writeln!(out)
}
