//! Warehouse slot layout tool.

mod config;
mod error;
mod export;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use rackmap_core::{compare, sample_positions, summarize, Position, SourceFormat, StageCounts};
use rackmap_loader::{Loader, SourceRef};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{load_config, resolve_source, Config};
use crate::export::{export, OutputFormat};

#[derive(Parser)]
#[command(name = "rk")]
#[command(about = "Lay out warehouse slots from location exports", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/rackmap/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format: text, json or yaml
    #[arg(long, global = true, default_value = "text")]
    output: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "out", global = true)]
    out: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load one export and print its positions
    Show {
        /// File path or http(s) URL of the export
        source: Option<SourceRef>,

        /// Export format: auto, codes or materials
        #[arg(long)]
        format: Option<SourceFormat>,

        /// Keep level 00 rows
        #[arg(long)]
        include_height_zero: bool,

        /// Print pipeline stage counts to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Compare a baseline export against a target export
    Compare {
        baseline: SourceRef,
        target: SourceRef,

        /// Show the target's floors for slots present in both
        #[arg(long)]
        show_target: bool,

        /// Export format: auto, codes or materials
        #[arg(long)]
        format: Option<SourceFormat>,

        /// Keep level 00 rows
        #[arg(long)]
        include_height_zero: bool,
    },

    /// Print the built-in sample dataset
    Sample,
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(config.log_level());

    let positions = match cli.command {
        Command::Show {
            source,
            format,
            include_height_zero,
            stats,
        } => {
            let counts = Arc::new(StageCounts::new());
            let loader = Loader::new(
                config.parse_options(format, include_height_zero),
                config.layout,
            )
            .with_diagnostics(counts.clone());

            let positions = match resolve_source(source, &config) {
                Some(source) => loader.load_or_sample(&source).await,
                None => {
                    info!("No source configured, using sample data");
                    loader.sample()
                }
            };

            if stats {
                for (stage, count) in counts.snapshot() {
                    eprintln!("{}: {}", stage, count);
                }
            }
            positions
        }
        Command::Compare {
            baseline,
            target,
            show_target,
            format,
            include_height_zero,
        } => {
            let loader = Loader::new(
                config.parse_options(format, include_height_zero),
                config.layout,
            );
            let (base, next) = loader.load_pair(&baseline, &target).await?;

            let summary = summarize(&base, &next);
            eprintln!(
                "added {}, removed {}, changed {}, unchanged {}",
                summary.added, summary.removed, summary.changed, summary.unchanged
            );
            compare(&base, &next, show_target, &config.layout)
        }
        Command::Sample => sample_positions(&config.layout),
    };

    write_output(&positions, &config, cli.output, cli.out.as_deref())
}

fn write_output(
    positions: &[Position],
    config: &Config,
    format: OutputFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let content = export(positions, &config.layout, format)?;

    match out {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }

    Ok(())
}
