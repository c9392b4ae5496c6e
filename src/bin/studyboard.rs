//! Studyboard CLI - command-line interface for the dashboard engine
//!
//! Commands:
//! - layout: Resolve a viewport into layout flags
//! - heatmap: Build the activity heat-map report from samples
//! - stats: Print summary statistics for samples
//! - generate: Emit a synthetic activity history
//! - config: Print the effective configuration

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use studyboard::pipeline::{parse_samples_json, parse_samples_ndjson, BoardProcessor};
use studyboard::synthetic::{default_window, generate_activity, SyntheticConfig};
use studyboard::types::{ActivitySample, ActivitySummary, Platform, Viewport, DATE_FORMAT};
use studyboard::{BoardConfig, BoardError, PRODUCER_NAME, STUDYBOARD_VERSION};

/// Studyboard - layout and learning-activity engine for the student dashboard
#[derive(Parser)]
#[command(name = "studyboard")]
#[command(author = "4976 Education")]
#[command(version = STUDYBOARD_VERSION)]
#[command(about = "Resolve dashboard layouts and build activity heat maps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a viewport into device class and layout flags
    Layout {
        /// Viewport width in logical pixels
        #[arg(long)]
        width: f64,

        /// Viewport height in logical pixels
        #[arg(long, default_value = "0")]
        height: f64,

        /// Host platform
        #[arg(long, value_enum, default_value = "web")]
        platform: PlatformArg,

        /// Configuration file (TOML, or JSON with a .json extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Build the activity heat-map report
    Heatmap {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,

        /// Screen width used for the scroll decision
        #[arg(long, default_value = "390")]
        screen_width: f64,

        /// Configuration file (TOML, or JSON with a .json extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print summary statistics for activity samples
    Stats {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a synthetic activity history
    Generate {
        /// Random seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// First day (YYYY-MM-DD), defaults to 2024-06-01
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD), defaults to 2024-12-31
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: SampleFormat,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Configuration file to load and validate
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PlatformArg {
    /// Browser host
    Web,
    /// iOS / Android host
    Native,
}

impl From<PlatformArg> for Platform {
    fn from(p: PlatformArg) -> Self {
        match p {
            PlatformArg::Web => Platform::Web,
            PlatformArg::Native => Platform::Native,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    /// JSON array of samples
    Json,
    /// Newline-delimited JSON (one sample per line)
    Ndjson,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleFormat {
    /// JSON array of samples
    Json,
    /// Newline-delimited JSON (one sample per line)
    Ndjson,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BoardCliError> {
    match cli.command {
        Commands::Layout {
            width,
            height,
            platform,
            config,
            pretty,
        } => cmd_layout(width, height, platform.into(), config.as_deref(), pretty),

        Commands::Heatmap {
            input,
            input_format,
            output,
            output_format,
            screen_width,
            config,
        } => cmd_heatmap(
            &input,
            input_format,
            &output,
            output_format,
            screen_width,
            config.as_deref(),
        ),

        Commands::Stats {
            input,
            input_format,
            json,
        } => cmd_stats(&input, input_format, json),

        Commands::Generate {
            seed,
            start,
            end,
            output,
            output_format,
        } => cmd_generate(seed, start, end, &output, output_format),

        Commands::Config { config } => cmd_config(config.as_deref()),
    }
}

fn load_processor(config: Option<&Path>) -> Result<BoardProcessor, BoardCliError> {
    let config = match config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    Ok(BoardProcessor::with_config(config)?)
}

fn cmd_layout(
    width: f64,
    height: f64,
    platform: Platform,
    config: Option<&Path>,
    pretty: bool,
) -> Result<(), BoardCliError> {
    let processor = load_processor(config)?;
    let report = processor.layout(&Viewport::new(width, height, platform));

    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);
    Ok(())
}

fn cmd_heatmap(
    input: &Path,
    input_format: InputFormat,
    output: &Path,
    output_format: OutputFormat,
    screen_width: f64,
    config: Option<&Path>,
) -> Result<(), BoardCliError> {
    let processor = load_processor(config)?;
    let samples = read_samples(input, input_format)?;

    let report = processor.heatmap(&samples, screen_width)?;
    debug!(weeks = report.weeks.len(), scrollable = report.scrollable, "built heat map");

    let data = match output_format {
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };
    write_output(output, &(data + "\n"))
}

fn cmd_stats(input: &Path, input_format: InputFormat, json: bool) -> Result<(), BoardCliError> {
    let samples = read_samples(input, input_format)?;
    let summary = ActivitySummary::from_samples(&samples)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Activity Summary");
        println!("================");
        println!("Samples:      {}", samples.len());
        println!("Active days:  {}", summary.active_day_count);
        println!("Max per day:  {}", summary.max_daily_count);
        println!("Total:        {}", summary.total_count);
    }
    Ok(())
}

fn cmd_generate(
    seed: Option<u64>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    output: &Path,
    format: SampleFormat,
) -> Result<(), BoardCliError> {
    let (default_start, default_end) = default_window();
    let config = SyntheticConfig {
        start: start.unwrap_or(default_start),
        end: end.unwrap_or(default_end),
        seed,
    };

    if config.start > config.end {
        return Err(BoardCliError::InvalidWindow(config.start, config.end));
    }

    let samples = generate_activity(&config);
    write_output(output, &format_samples(&samples, format)?)
}

fn cmd_config(config: Option<&Path>) -> Result<(), BoardCliError> {
    let processor = load_processor(config)?;
    println!("# {} {}", PRODUCER_NAME, STUDYBOARD_VERSION);
    print!("{}", processor.config().to_toml_string()?);
    Ok(())
}

// Helper functions

fn read_input(input: &Path) -> Result<String, BoardCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn read_samples(input: &Path, format: InputFormat) -> Result<Vec<ActivitySample>, BoardCliError> {
    let data = read_input(input)?;
    let samples = match format {
        InputFormat::Json => parse_samples_json(&data)?,
        InputFormat::Ndjson => parse_samples_ndjson(&data)?,
    };

    if samples.is_empty() {
        return Err(BoardCliError::NoSamples);
    }
    Ok(samples)
}

fn write_output(output: &Path, data: &str) -> Result<(), BoardCliError> {
    if output.to_string_lossy() == "-" {
        print!("{}", data);
    } else {
        fs::write(output, data)?;
    }
    Ok(())
}

fn format_samples(samples: &[ActivitySample], format: SampleFormat) -> Result<String, BoardCliError> {
    match format {
        SampleFormat::Json => Ok(serde_json::to_string_pretty(samples)? + "\n"),
        SampleFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::with_capacity(samples.len());
            for sample in samples {
                lines.push(serde_json::to_string(sample)?);
            }
            Ok(lines.join("\n") + "\n")
        }
    }
}

// Error types

#[derive(Debug)]
enum BoardCliError {
    Io(io::Error),
    Board(BoardError),
    Json(serde_json::Error),
    NoSamples,
    InvalidWindow(NaiveDate, NaiveDate),
}

impl From<io::Error> for BoardCliError {
    fn from(e: io::Error) -> Self {
        BoardCliError::Io(e)
    }
}

impl From<BoardError> for BoardCliError {
    fn from(e: BoardError) -> Self {
        BoardCliError::Board(e)
    }
}

impl From<serde_json::Error> for BoardCliError {
    fn from(e: serde_json::Error) -> Self {
        BoardCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<BoardCliError> for CliError {
    fn from(e: BoardCliError) -> Self {
        match e {
            BoardCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            BoardCliError::Board(e) => {
                let (code, hint) = match &e {
                    BoardError::InvalidDate(_) => ("INVALID_DATE", "Dates must be YYYY-MM-DD"),
                    BoardError::EmptyInput(_) => ("EMPTY_INPUT", "Provide at least one sample"),
                    BoardError::ParseError(_) | BoardError::JsonError(_) => {
                        ("PARSE_ERROR", "Samples look like {\"date\": \"2024-06-01\", \"count\": 3}")
                    }
                    BoardError::ConfigError(_) => {
                        ("CONFIG_ERROR", "Run 'studyboard config' to see the expected layout")
                    }
                    BoardError::MissingCredentials | BoardError::UnknownRoute(_) => {
                        ("BOARD_ERROR", "Check the command arguments")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            BoardCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            BoardCliError::NoSamples => CliError {
                code: "NO_SAMPLES".to_string(),
                message: "No samples found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            BoardCliError::InvalidWindow(start, end) => CliError {
                code: "INVALID_WINDOW".to_string(),
                message: format!("start {} is after end {}", start, end),
                hint: Some("Swap --start and --end".to_string()),
            },
        }
    }
}
