//! tfmv CLI entrypoint.
//!
//! Reads a JSON plan, infers state moves and prints one command per line on
//! stdout. Logs and the optional summary go to stderr.

use std::io::Write;
use std::process::ExitCode;

use tfmv::cli::{Cli, OutputFormatter};
use tfmv::config::{ConfigParser, MoveConfig, find_config_file};
use tfmv::error::{Result, TfmvError};
use tfmv::plan::PlanReader;
use tfmv::reconciler::Reconciler;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    // `.env` goes first so that clap sees `TFMV_CONFIG` from it.
    let dotenv = load_dotenv();
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose, cli.log_json);

    if let Err(e) = dotenv {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_fatal_collision() {
                error!("Aborting: the matching heuristic produced an implausible move");
            }
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs one inference pass.
fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    debug!("Effective configuration: {config:?}");

    let changes = PlanReader::new().load_file(&config.plan_file)?;
    let report = Reconciler::new(&config).reconcile(&changes)?;

    let formatter = OutputFormatter::new(cli.output).with_quote(config.quote);
    let output = formatter
        .format_statements(&report)
        .map_err(|e| TfmvError::internal(format!("Failed to serialize report: {e}")))?;

    if cli.summary {
        eprint!("{}", formatter.format_summary(&report));
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads `.env` from the working directory.
fn load_dotenv() -> Result<()> {
    ConfigParser::new()
        .with_base_path(std::env::current_dir()?)
        .load_dotenv()
}

/// Layers defaults, config file, environment and flags.
fn resolve_config(cli: &Cli) -> Result<MoveConfig> {
    let parser = ConfigParser::new();

    let mut config = match &cli.config {
        Some(path) => parser.load_file(path)?,
        None => match find_config_file(std::env::current_dir()?) {
            Some(path) => parser.load_file(path)?,
            None => {
                debug!("No configuration file found, using defaults");
                MoveConfig::default()
            }
        },
    };

    parser.apply_env_overrides(&mut config)?;
    cli.apply_overrides(&mut config);

    Ok(config)
}
