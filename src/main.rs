use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tally::config::EngineConfig;
use tally::mapreduce::{
    Coordinator, EmptyTokenPolicy, FileSource, InMemorySource, LockStrategy, ReportFormat,
    WriterSink,
};
use tracing::{debug, error, trace};

/// Count words across text records with a threaded map/reduce engine
#[derive(Parser)]
#[command(name = "tally", version)]
#[command(about = "Count words with a parallel in-memory map/reduce", long_about = None)]
struct Cli {
    /// Input files, one record per line ("-" reads stdin). Without files the built-in sample sentences are counted
    files: Vec<PathBuf>,

    /// Number of map workers (defaults to the available hardware parallelism)
    #[arg(short = 'j', long)]
    parallelism: Option<usize>,

    /// Fail instead of using one worker when the parallelism resolves to 0
    #[arg(long)]
    strict_parallelism: bool,

    /// Count punctuation-only tokens as the empty word instead of dropping them
    #[arg(long)]
    keep_empty_tokens: bool,

    /// Spread the intermediate aggregate over N independently locked shards
    #[arg(long, value_name = "N")]
    shards: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_thread_names(cli.verbose >= 2)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("tally started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(cli) {
        error!("Fatal error: {:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(&cli)?;
    debug!("Effective configuration: {:?}", config);

    let mut coordinator = Coordinator::new(config);
    let mut sink = WriterSink::stdout(cli.format);

    if cli.files.is_empty() {
        coordinator.run_with(&mut InMemorySource::sample(), &mut sink)?;
    } else {
        coordinator.run_with(&mut FileSource::new(cli.files), &mut sink)?;
    }

    Ok(())
}

fn build_config(cli: &Cli) -> anyhow::Result<EngineConfig> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.merge_env_vars()?;

    if let Some(parallelism) = cli.parallelism {
        config.parallelism = Some(parallelism);
    }
    if cli.strict_parallelism {
        config.coerce_zero_parallelism = false;
    }
    if cli.keep_empty_tokens {
        config.empty_tokens = EmptyTokenPolicy::Keep;
    }
    if let Some(shards) = cli.shards {
        config.lock_strategy = LockStrategy::Sharded { shards };
    }

    Ok(config)
}
