// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use keyspace_explorer::config::{
    ExplorerConfig, DEFAULT_CANVAS_WIDTH, DEFAULT_MATCH_LOG, DEFAULT_TARGET,
};
use keyspace_explorer::keyspace::{ExactRange, DEFAULT_HIGH_HEX, DEFAULT_LOW_HEX};
use keyspace_explorer::matchlog::FileMatchLog;
use keyspace_explorer::oracle::{ArtifactOracle, HexOracle, Sha256Oracle};
use keyspace_explorer::scanner::{pixel_seeds, BatchScanner};
use keyspace_explorer::session::{parse_script, EventResponse, ExplorerSession, TickOutcome};
use keyspace_explorer::session::DEFAULT_SWEEP_CHUNK;
use keyspace_explorer::{keyspace, telemetry, MatchRecord, SearchDriver};
use std::error::Error;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::warn;

type DynError = Box<dyn Error>;

type Result<T> = std::result::Result<T, DynError>;

type DynOracle = Box<dyn ArtifactOracle + Send + Sync>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Explore a large integer keyspace and sweep candidate scalars against a target artifact"
)]
struct Cli {
    /// Artifact a candidate must produce to count as a match
    #[arg(long, global = true, env = "KEYSPACE_TARGET", default_value = DEFAULT_TARGET)]
    target: String,

    /// Append-only file receiving one line per match
    #[arg(long, global = true, env = "KEYSPACE_MATCH_LOG", default_value = DEFAULT_MATCH_LOG, value_hint = ValueHint::FilePath)]
    match_log: PathBuf,

    /// Oracle used to turn a candidate scalar into an artifact
    #[arg(long, global = true, value_enum, default_value_t = OracleKind::Hex)]
    oracle: OracleKind,

    /// Canvas width in pixels
    #[arg(long, global = true, default_value_t = DEFAULT_CANVAS_WIDTH)]
    canvas_width: u32,

    /// Lowest value of the keyspace, in hex
    #[arg(long, global = true, default_value = DEFAULT_LOW_HEX)]
    low: String,

    /// Highest value of the keyspace, in hex
    #[arg(long, global = true, default_value = DEFAULT_HIGH_HEX)]
    high: String,

    /// Candidates evaluated per session tick
    #[arg(long, global = true, default_value_t = DEFAULT_SWEEP_CHUNK)]
    sweep_chunk: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OracleKind {
    /// Lowercase hex of the scalar
    Hex,
    /// SHA-256 of the scalar's big-endian bytes
    Sha256,
}

#[derive(Subcommand)]
enum Command {
    /// Sweep the candidates of a single seed
    Search(SearchArgs),

    /// Replay pointer, wheel and drag events against a session
    Explore(ExploreArgs),

    /// Sweep the seed under every pixel of the full viewport
    Scan(ScanArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Seed in hex
    #[arg(long)]
    seed: String,
}

#[derive(Args)]
struct ExploreArgs {
    /// Event script; read from STDIN when omitted
    #[arg(long, value_hint = ValueHint::FilePath)]
    events: Option<PathBuf>,
}

#[derive(Args)]
struct ScanArgs {
    /// Print scale markers before scanning (5 when no count is given)
    #[arg(long, num_args = 0..=1, default_missing_value = "5")]
    markers: Option<u32>,
}

impl Cli {
    fn config(&self) -> Result<ExplorerConfig> {
        Ok(ExplorerConfig {
            range: ExactRange::from_hex(&self.low, &self.high)?,
            canvas_width: self.canvas_width,
            target: self.target.clone(),
            match_log: self.match_log.clone(),
            sweep_chunk: self.sweep_chunk,
        })
    }

    fn oracle(&self) -> DynOracle {
        match self.oracle {
            OracleKind::Hex => Box::new(HexOracle),
            OracleKind::Sha256 => Box::new(Sha256Oracle),
        }
    }
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = telemetry::init_tracing() {
        eprintln!("warning: {err}");
    }

    let config = cli.config()?;
    let driver = SearchDriver::new(
        cli.oracle(),
        config.target.clone(),
        FileMatchLog::new(config.match_log.clone()),
    );

    match &cli.command {
        Command::Search(args) => run_search(&driver, args),
        Command::Explore(args) => run_explore(&config, driver, args),
        Command::Scan(args) => run_scan(&config, &driver, args),
    }
}

fn print_match(record: &MatchRecord) {
    println!("match: {record}");
}

fn run_search(driver: &SearchDriver<DynOracle, FileMatchLog>, args: &SearchArgs) -> Result<()> {
    let seed = keyspace::parse_hex(&args.seed)?;
    match driver.search(&seed)? {
        Some(record) => print_match(&record),
        None => println!("no match for seed {seed:#x}"),
    }
    Ok(())
}

fn run_explore(
    config: &ExplorerConfig,
    driver: SearchDriver<DynOracle, FileMatchLog>,
    args: &ExploreArgs,
) -> Result<()> {
    let script = match &args.events {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    let events = parse_script(&script)?;

    let mut session =
        ExplorerSession::new(config.viewport()?, driver).with_sweep_chunk(config.sweep_chunk);
    println!("{}", session.zoom_info());

    // One tick per event, as an idle event loop would between inputs.
    for event in events {
        match session.apply(event) {
            EventResponse::Moved { pixel, seed } => println!("pixel {pixel} -> seed {seed:#x}"),
            EventResponse::ViewChanged(info) | EventResponse::Info(info) => println!("{info}"),
            EventResponse::Ignored => {}
        }
        report_tick(session.tick()?);
    }
    if let Some(record) = session.run_pending()? {
        print_match(&record);
    }
    Ok(())
}

fn report_tick(outcome: TickOutcome) {
    match outcome {
        TickOutcome::Matched(record) => print_match(&record),
        TickOutcome::Exhausted { seed, statistics } => {
            println!("seed {seed:#x} exhausted: {statistics}")
        }
        TickOutcome::Cancelled { seed, .. } => warn!(seed = %format!("{seed:#x}"), "sweep cancelled"),
        TickOutcome::Idle | TickOutcome::Pending { .. } => {}
    }
}

fn run_scan(
    config: &ExplorerConfig,
    driver: &SearchDriver<DynOracle, FileMatchLog>,
    args: &ScanArgs,
) -> Result<()> {
    let viewport = config.viewport()?;
    if let Some(count) = args.markers {
        for marker in viewport.scale_markers(count) {
            println!("{:>6} {}", marker.pixel, marker.label());
        }
    }

    let seeds = pixel_seeds(&viewport);
    let report = BatchScanner::new(driver).scan(&seeds);
    for record in &report.matches {
        print_match(record);
    }
    for (seed, err) in &report.failures {
        eprintln!("seed {seed:#x}: {err}");
    }
    println!(
        "scanned {} seeds, {} matches: {}",
        report.seeds_scanned,
        report.matches.len(),
        report.statistics
    );
    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(format!("{} seeds failed to record their match", report.failures.len()).into())
    }
}
