//! CLI supporting `run`, `schema`, `show`, and `validate`.
//!
//! Examples:
//! ```bash
//! datamap-bench run -n 1000000               # time one million iterations
//! datamap-bench run --fill random --progress # random source bytes, progress bar
//! datamap-bench schema foo                   # print the Foo schema
//! datamap-bench show --pretty                # JSON of the records one iteration builds
//! datamap-bench validate data.json --strict  # check a JSON document against Foo
//! ```

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use datamap_bench::{
    Bar, BenchState, FillPattern, Foo, HarnessConfig, RecordTemplate, ValidationOptions,
    harness::{render_records, run_loop, validate_foo_json},
    constants::MAX_BUFFER_SIZE,
    progress::RunProgressTracker,
};

/// Write one line to stdout; a closed pipe (`| head`) ends the process quietly.
fn print_line(line: impl fmt::Display) -> Result<()> {
    let mut out = io::stdout().lock();
    match writeln!(out, "{line}") {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => std::process::exit(0),
        written => Ok(written?),
    }
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity: -v = Info, -vv = Debug",
    )]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum RecordName {
    Foo,
    Bar,
}

#[derive(Subcommand)]
enum Command {
    /// Time the copy + record construction loop.
    Run {
        /// Number of iterations (default from DATAMAP_BENCH_ITERATIONS, else i32::MAX).
        #[arg(short = 'n', long = "iterations")]
        iterations: Option<u64>,

        /// Size in bytes of the source and target buffers.
        #[arg(short = 's', long = "size")]
        buffer_size: Option<usize>,

        /// Value written into Bar.int.
        #[arg(long = "value", allow_hyphen_values = true)]
        int_value: Option<i32>,

        /// Source buffer contents.
        #[arg(long = "fill", value_enum, ignore_case = true)]
        fill: Option<FillPattern>,

        /// Iterations between progress updates (0 disables).
        #[arg(long = "report-every")]
        report_every: Option<u64>,

        /// Draw a progress bar.
        #[arg(short = 'p', long = "progress", action)]
        progress: bool,
    },
    /// Print the schema of a record as JSON.
    Schema {
        #[arg(value_enum, ignore_case = true, default_value_t = RecordName::Foo)]
        record: RecordName,
    },
    /// Build the records of one iteration and print them as JSON.
    Show {
        #[arg(long = "value", allow_hyphen_values = true)]
        int_value: Option<i32>,

        #[arg(long, action)]
        pretty: bool,
    },
    /// Validate a JSON document as a Foo record.
    Validate {
        /// Path to the JSON file.
        file: PathBuf,

        /// Report fields the schema does not define.
        #[arg(long, action)]
        strict: bool,
    },
}

/// Main CLI function
fn main() -> Result<()> {
    // Loads any variables from .env file that are not already set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbosity
    let filter = match cli.verbose {
        0 => "warn",        // no -v: WARN level
        1 => "info",        // -v: INFO level
        _ => "debug",       // -vv or more: DEBUG level
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match cli.cmd {
        Command::Run { iterations, buffer_size, int_value, fill, report_every, progress } => {
            let mut config = HarnessConfig::from_environment();
            if let Some(n) = iterations { config = config.with_iterations(n); }
            if let Some(s) = buffer_size { config = config.with_buffer_size(s); }
            if let Some(v) = int_value { config = config.with_int_value(v); }
            if let Some(f) = fill { config = config.with_fill(f); }
            if let Some(r) = report_every { config = config.with_report_every(r); }
            run_cmd(&config, progress)?;
        }

        Command::Schema { record } => {
            let json = match record {
                RecordName::Foo => Foo::schema().to_json(),
                RecordName::Bar => Bar::schema().to_json(),
            };
            let text = serde_json::to_string_pretty(&json).context("rendering schema")?;
            print_line(&text)?;
        }

        Command::Show { int_value, pretty } => {
            let value = int_value.unwrap_or(HarnessConfig::from_environment().int_value);
            let text = render_records(value, pretty)?;
            print_line(&text)?;
        }

        Command::Validate { file, strict } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let options = if strict { ValidationOptions::strict() } else { ValidationOptions::default() };
            let result = validate_foo_json(&text, &options)
                .with_context(|| format!("decoding {}", file.display()))?;

            if result.is_valid() {
                print_line(format_args!("{}: valid", file.display()))?;
            } else {
                for message in result.messages() {
                    warn!("{}: {}", file.display(), message);
                    print_line(message)?;
                }
                bail!("{}: {} validation error(s)", file.display(), result.messages().len());
            }
        }
    }

    Ok(())
}

fn run_cmd(config: &HarnessConfig, progress: bool) -> Result<()> {
    if config.buffer_size > MAX_BUFFER_SIZE {
        bail!("buffer size {} exceeds the {} byte limit", config.buffer_size, MAX_BUFFER_SIZE);
    }
    info!(
        "running {} iterations over {} byte buffers (fill: {:?})",
        config.iterations, config.buffer_size, config.fill
    );
    let mut state = BenchState::from_config(config);

    let tracker = if progress {
        RunProgressTracker::new("run", config.iterations)
    } else {
        RunProgressTracker::hidden(config.iterations)
    };

    let summary = run_loop(&mut state, config, |done| tracker.update(done))
        .context("benchmark iteration failed")?;

    tracker.finish("run", &summary);
    print_line(&summary)?;
    Ok(())
}
