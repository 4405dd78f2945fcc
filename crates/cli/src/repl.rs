// Interactive loop: read a path per line, analyze it, print the report

use std::io::{self, BufRead, Write};
use std::path::Path;

use addrstat_config::Settings;
use addrstat_io::ParseOptions;

use crate::analysis::analyze;
use crate::report;
use crate::CliError;

pub fn run(settings: &Settings, options: &ParseOptions) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(stdin.lock(), &mut stdout.lock(), settings, options).map_err(CliError::output)
}

/// Drive the loop over arbitrary input/output. Stops on `exit`
/// (any case) or end of input; blank lines are ignored. File errors are
/// reported and the loop keeps going.
pub fn run_with<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    settings: &Settings,
    options: &ParseOptions,
) -> io::Result<()> {
    writeln!(out, "=== Address Analyzer ===")?;
    writeln!(out, "Enter a path to a CSV or XML file")?;
    writeln!(out, "Type 'exit' or press Ctrl+D to quit")?;

    let mut raw = Vec::new();
    loop {
        write!(out, "\n{}", settings.repl.prompt)?;
        out.flush()?;

        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(out, "\nExiting...")?;
            break;
        }

        // Invalid UTF-8 becomes U+FFFD; such a path is reported like any other.
        let line = String::from_utf8_lossy(&raw);
        let path = line.trim();
        if path.eq_ignore_ascii_case("exit") {
            writeln!(out, "Exiting...")?;
            break;
        }
        if path.is_empty() {
            continue;
        }

        let analysis = analyze(Path::new(path), options);
        if let Some(err) = &analysis.error {
            writeln!(out, "error: {err}")?;
        }
        report::render(out, &analysis, settings.report.format, settings.report.show_timing)?;
    }

    Ok(())
}
