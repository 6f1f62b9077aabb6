//! Vibration Feature Pipeline - Main Entry Point

use anyhow::Context;
use clap::{Parser, Subcommand};
use condition_label::LabelPolicy;
use pipeline::{run_convert, run_extract, run_select, run_split, PipelineConfig};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "vib-pipeline", version, about = "Feature extraction and selection for vibration recordings")]
struct Cli {
    /// Optional settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the full descriptor battery for every recording
    Extract {
        /// Recording file or directory tree
        input: PathBuf,
        /// Results root (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Rank descriptors and write the reduced and curated outputs
    Select {
        /// Recording file or directory tree
        input: PathBuf,
        /// Results root (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Number of descriptors to keep
        #[arg(long)]
        top_k: Option<usize>,
        /// Match the healthy-state "h" code on token boundaries instead of
        /// anywhere in the name
        #[arg(long)]
        token_labels: bool,
        /// Skip the primary ranker and use the ANOVA F fallback directly
        #[arg(long)]
        fallback_only: bool,
    },
    /// Split raw logs into a fixed number of contiguous chunks
    Split {
        /// Log file or directory tree
        input: PathBuf,
        /// Results root (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Number of chunks per log
        #[arg(long)]
        segments: usize,
    },
    /// Mirror a tree of .txt logs into .csv files
    Convert {
        /// Directory tree of .txt logs
        input: PathBuf,
        /// Destination root (defaults to the configured one)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Initialize logging
fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config =
        PipelineConfig::load(cli.config.as_deref()).context("failed to load settings")?;

    info!("=== Vibration Feature Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Extract { input, out } => {
            let mut request = config.request(input);
            if let Some(out) = out {
                request.results_root = out;
            }
            let summary = run_extract(&request).context("extraction run failed")?;
            info!(
                processed = summary.files_processed,
                skipped = summary.files_skipped,
                records = summary.records,
                conditions = summary.conditions,
                "extraction complete"
            );
        }
        Command::Select {
            input,
            out,
            top_k,
            token_labels,
            fallback_only,
        } => {
            let mut request = config.request(input);
            if let Some(out) = out {
                request.results_root = out;
            }
            if let Some(top_k) = top_k {
                request.top_k = top_k;
            }
            if token_labels {
                request.label_policy = LabelPolicy::TokenBoundary;
            }
            if fallback_only {
                request.fallback_only = true;
            }
            let summary = run_select(&request).context("selection run failed")?;
            info!(
                processed = summary.files_processed,
                skipped = summary.files_skipped,
                records = summary.records,
                used_fallback = summary.used_fallback.unwrap_or(false),
                "selection complete"
            );
        }
        Command::Split {
            input,
            out,
            segments,
        } => {
            let results_root = out.unwrap_or_else(|| config.results_root.clone());
            let outcome = run_split(&input, &results_root, segments).context("split run failed")?;
            info!(
                split = outcome.files_split,
                failed = outcome.files_failed,
                segments = outcome.segments_written,
                "split complete"
            );
        }
        Command::Convert { input, out } => {
            let dest = out.unwrap_or_else(|| config.results_root.clone());
            let outcome = run_convert(&input, &dest).context("conversion run failed")?;
            info!(converted = outcome.files_converted, "conversion complete");
        }
    }

    Ok(())
}
