//! vlist - Entry Point

use clap::{Parser, Subcommand};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use vlist::config::{EngineConfig, ResolvedConfig};
use vlist::model::AppError;
use vlist::trace::{read_trace, Replayer};
use vlist::view::constants::DEFAULT_DEMO_ITEMS;
use vlist::view::DemoOptions;

/// vlist - list virtualization engine driver
#[derive(Parser, Debug)]
#[command(name = "vlist")]
#[command(version)]
#[command(about = "Replay scroll traces or explore a virtualized list in the terminal")]
pub struct Args {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Replay a JSONL event trace and print observable outputs as JSON lines
    Replay {
        /// Path to the trace file
        trace: PathBuf,

        /// Items rendered beyond each viewport edge
        #[arg(long)]
        overscan: Option<usize>,

        /// Quiet period before scrolling is considered finished (must be positive)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        settle_delay_ms: Option<u64>,
    },

    /// Interactive terminal list of synthetic image files
    Demo {
        /// Number of items in the list
        #[arg(long, default_value_t = DEFAULT_DEMO_ITEMS)]
        items: usize,

        /// Items rendered beyond each viewport edge
        #[arg(long)]
        overscan: Option<usize>,

        /// Disable colors
        #[arg(long)]
        no_color: bool,
    },
}

impl Command {
    fn overrides(&self) -> (Option<usize>, Option<u64>) {
        match self {
            Self::Replay {
                overscan,
                settle_delay_ms,
                ..
            } => (*overscan, *settle_delay_ms),
            Self::Demo { overscan, .. } => (*overscan, None),
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = vlist::config::load_config_with_precedence(args.config.clone())?;
        let merged = vlist::config::merge_config(config_file);
        let with_env = vlist::config::apply_env_overrides(merged);
        let (overscan, settle_delay_ms) = args.command.overrides();
        vlist::config::apply_cli_overrides(with_env, overscan, settle_delay_ms)
    };

    vlist::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    match args.command {
        Command::Replay { trace, .. } => replay(&trace, &config),
        Command::Demo {
            items, no_color, ..
        } => {
            let options = DemoOptions {
                item_count: items,
                engine: EngineConfig::from(&config),
                frame_interval: Duration::from_millis(config.frame_interval_ms),
                no_color,
            };
            vlist::view::run_demo(&options)
        }
    }
}

/// Replay `path`, writing one JSON line per output to stdout.
///
/// Malformed trace lines are reported on stderr and skipped.
fn replay(path: &Path, config: &ResolvedConfig) -> Result<(), AppError> {
    let (records, errors) = read_trace(path)?;
    for error in &errors {
        warn!(%error, "Skipping malformed trace line");
        eprintln!("{error}");
    }

    let mut replayer = Replayer::new(EngineConfig::from(config));
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for record in &records {
        for output in replayer.apply(record) {
            serde_json::to_writer(&mut out, &output).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    info!(
        events = records.len(),
        malformed = errors.len(),
        "Replay finished"
    );
    Ok(())
}
