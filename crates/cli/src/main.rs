// addrstat CLI - duplicate and floor statistics for address files

mod analysis;
mod exit_codes;
mod repl;
mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use addrstat_config::{ReportFormat, Settings, SettingsError};
use addrstat_io::{IoError, ParseOptions};

use exit_codes::{io_exit_code, EXIT_ERROR, EXIT_NO_RECORDS, EXIT_SUCCESS, EXIT_USAGE};

/// Environment variable overriding the configured log level (env_logger syntax).
const LOG_ENV: &str = "ADDRSTAT_LOG";

#[derive(Parser)]
#[command(name = "addrstat")]
#[command(about = "Find duplicate addresses and per-city floor statistics in CSV/XML files")]
#[command(version)]
struct Cli {
    /// Settings file (default: <config dir>/addrstat/settings.toml)
    #[arg(long, global = true, env = "ADDRSTAT_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one file and print its statistics
    #[command(after_help = "\
Examples:
  addrstat analyze addresses.csv
  addrstat analyze addresses.xml --json
  addrstat analyze addresses.csv -o stats.csv
  addrstat analyze addresses.csv -o stats.json -q")]
    Analyze {
        /// Input file (.csv or .xml)
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also write the statistics to a .csv or .json file
        #[arg(long, short = 'o', value_name = "PATH")]
        export: Option<PathBuf>,

        /// Suppress stderr notes (e.g. skipped-entry counts)
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Prompt for file paths until `exit` or end of input (default)
    Repl,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (settings, settings_error) = match load_settings(cli.config.as_deref()) {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    init_logging(&settings);
    if let Some(e) = settings_error {
        log::warn!("{e}; using default settings");
    }

    let result = parse_options(&settings).and_then(|options| match cli.command {
        None | Some(Commands::Repl) => repl::run(&settings, &options),
        Some(Commands::Analyze { file, json, export, quiet }) => {
            cmd_analyze(&settings, &options, &file, json, export.as_deref(), quiet)
        }
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings, SettingsError> {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

fn init_logging(settings: &Settings) {
    env_logger::Builder::new()
        .filter_level(settings.log_level())
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn parse_options(settings: &Settings) -> Result<ParseOptions, CliError> {
    let label = &settings.input.fallback_encoding;
    ParseOptions::with_fallback_label(label).ok_or_else(|| {
        CliError::args(format!("unknown encoding {label:?} in settings (input.fallback_encoding)"))
            .with_hint("use an encoding label such as windows-1251, windows-1252 or utf-8")
    })
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Failure writing to stdout.
    pub fn output(err: std::io::Error) -> Self {
        Self { code: EXIT_ERROR, message: err.to_string(), hint: None }
    }

    pub fn io(err: IoError) -> Self {
        let hint = match &err {
            IoError::UnsupportedFormat(_) => Some("use a .csv or .xml file".to_string()),
            IoError::FileNotFound(_) => {
                Some("check the path; relative paths start at the current directory".to_string())
            }
            _ => None,
        };
        Self { code: io_exit_code(&err), message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// analyze
// ============================================================================

fn cmd_analyze(
    settings: &Settings,
    options: &ParseOptions,
    file: &Path,
    json: bool,
    export: Option<&Path>,
    quiet: bool,
) -> Result<(), CliError> {
    let analysis = analysis::analyze(file, options);

    if !quiet && !analysis.diagnostics.is_empty() {
        eprintln!("note: {} malformed entries skipped", analysis.diagnostics.len());
    }

    let format = if json { ReportFormat::Json } else { settings.report.format };
    let stdout = std::io::stdout();
    report::render(&mut stdout.lock(), &analysis, format, settings.report.show_timing)
        .map_err(CliError::output)?;

    if let Some(err) = analysis.error {
        return Err(CliError::io(err));
    }

    if analysis.report.is_empty() {
        return Err(CliError {
            code: EXIT_NO_RECORDS,
            message: format!("no address records in {}", file.display()),
            hint: None,
        });
    }

    if let Some(path) = export {
        let written = addrstat_io::export::export(&analysis.report, path).map_err(CliError::io)?;
        if !quiet {
            for path in written {
                eprintln!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}
