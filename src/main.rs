// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use subshift::app_config::{self, Config, OverflowPolicy, RangePolicy};
use subshift::app_controller::Controller;
use subshift::delay::Delay;
use subshift::file_utils::FileManager;

/// CLI Wrapper for OverflowPolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOverflowPolicy {
    Wrap,
    Saturate,
    Reject,
}

impl From<CliOverflowPolicy> for OverflowPolicy {
    fn from(cli_policy: CliOverflowPolicy) -> Self {
        match cli_policy {
            CliOverflowPolicy::Wrap => OverflowPolicy::Wrap,
            CliOverflowPolicy::Saturate => OverflowPolicy::Saturate,
            CliOverflowPolicy::Reject => OverflowPolicy::Reject,
        }
    }
}

/// CLI Wrapper for RangePolicy to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliRangePolicy {
    Ignore,
    Warn,
    Reject,
}

impl From<CliRangePolicy> for RangePolicy {
    fn from(cli_policy: CliRangePolicy) -> Self {
        match cli_policy {
            CliRangePolicy::Ignore => RangePolicy::Ignore,
            CliRangePolicy::Warn => RangePolicy::Warn,
            CliRangePolicy::Reject => RangePolicy::Reject,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subshift
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subshift - move every entry of an SRT subtitle file by a fixed delay
#[derive(Parser, Debug)]
#[command(name = "subshift")]
#[command(version)]
#[command(about = "Shift SRT subtitle timings by a fixed delay")]
#[command(allow_negative_numbers = true)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
#[command(long_about = "subshift loads an SRT subtitle file, moves the start and end of every entry
by the same delay, and prints the result.

EXAMPLES:
    subshift +1 m movie.srt                     # One minute later, printed to stdout
    subshift -1500 ms movie.srt -o fixed.srt    # 1.5 seconds earlier, into a file
    subshift 30 seconds movie.srt -w            # Write movie.shifted.srt next to the input
    subshift -e latin1 -2 s old.srt             # Read a Latin-1 encoded file
    subshift --overflow reject -10 m movie.srt  # Fail instead of wrapping past midnight
    subshift completions bash > subshift.bash   # Generate bash completions

UNITS:
    ms, s, m (or milliseconds, seconds, minutes)

CONFIGURATION:
    Settings are read from subshift.json when it exists. You can specify a
    different file with --config. Command line options take precedence.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Signed delay magnitude, e.g. +1 or -1500
    #[arg(value_name = "DELAY", required = true)]
    delay: Option<String>,

    /// Unit of the delay: ms, s or m
    #[arg(value_name = "UNIT", required = true)]
    unit: Option<String>,

    /// Input SRT file
    #[arg(value_name = "INPUT_PATH", required = true)]
    input_path: Option<PathBuf>,

    /// Write the shifted subtitles to this file instead of stdout
    #[arg(short, long, conflicts_with = "write")]
    output: Option<PathBuf>,

    /// Write the shifted subtitles next to the input as <name>.shifted.srt
    #[arg(short, long)]
    write: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "subshift.json")]
    config_path: String,

    /// Input file encoding (utf-8 or latin1)
    #[arg(short, long)]
    encoding: Option<String>,

    /// What to do when a shifted time leaves the day
    #[arg(long, value_enum)]
    overflow: Option<CliOverflowPolicy>,

    /// How to treat entries that end before they start
    #[arg(long, value_enum)]
    range_check: Option<CliRangePolicy>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Label and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (label, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                label,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Warnings only until the configuration says otherwise
    if let Err(e) = CustomLogger::init(LevelFilter::Warn) {
        eprintln!("failed to initialize logging: {}", e);
    }

    let cli = CommandLineOptions::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error while executing the delay command:\n-> {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subshift", &mut std::io::stdout());
        return Ok(());
    }

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // clap requires the positionals whenever no subcommand is given
    let (Some(delay), Some(unit), Some(input_path)) = (&cli.delay, &cli.unit, &cli.input_path)
    else {
        return Err(anyhow!("missing arguments: <DELAY> <UNIT> <INPUT_PATH>"));
    };

    let config = load_config(&cli)?;
    let delay = Delay::parse(delay, unit)?;
    debug!("Applying delay {} to {}", delay, input_path.display());

    let controller = Controller::with_config(config)?;

    let output_path = if cli.write {
        Some(FileManager::generate_output_path(input_path, "shifted"))
    } else {
        cli.output.clone()
    };

    match output_path {
        Some(output_path) => {
            if FileManager::file_exists(&output_path) && !cli.force_overwrite {
                warn!(
                    "Output file already exists: {:?}. Use -f to force overwrite.",
                    output_path
                );
                return Ok(());
            }
            controller.run_to_file(input_path, delay, &output_path)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            controller.run(input_path, delay, &mut out)?;
        }
    }

    Ok(())
}

// Load the configuration file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_default(&cli.config_path)
        .with_context(|| format!("Failed to load configuration: {}", cli.config_path))?;

    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.clone();
    }
    if let Some(overflow) = &cli.overflow {
        config.overflow_policy = overflow.clone().into();
    }
    if let Some(range_check) = &cli.range_check {
        config.range_policy = range_check.clone().into();
    }

    // Update log level in config if specified via command line
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // Only the command line level has been applied so far
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}
