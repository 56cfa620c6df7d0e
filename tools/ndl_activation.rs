// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compute NDL activations for an event file.
//!
//! Reads a JSON weight matrix and a `cues<TAB>outcomes` event file (plain or
//! `.gz`), runs the activation engine and writes a tab-separated table with
//! one row per event.

use std::collections::HashMap;
use std::env;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use ndarray::NdFloat;
use serde::de::DeserializeOwned;
use tracing::info;

use ndl::activation::{ActivationEngine, ActivationMatrix};
use ndl::config::{load_config, load_config_or_default, NdlConfig};
use ndl::observability::{debug_flags_help, init_logging, parse_debug_flags};
use ndl::io::{read_weights_file, write_activations, write_activations_file};
use ndl::{event_reader_from_config, options_from_config};

/// NDL activation calculator
#[derive(Parser, Debug)]
#[command(
    name = "ndl_activation",
    version,
    author,
    long_about = None,
    after_help = debug_flags_help()
)]
struct Args {
    /// Weight matrix (JSON: cues, outcomes, values)
    #[arg(short, long)]
    weights: PathBuf,

    /// Event file (`cues<TAB>outcomes` per line, optionally gzip-compressed)
    #[arg(short, long)]
    events: PathBuf,

    /// Output table; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of workers (0 = all available cores)
    #[arg(long)]
    workers: Option<usize>,

    /// Collapse repeated cues within an event instead of failing
    #[arg(long, default_value_t = false)]
    remove_duplicates: bool,

    /// Separator between labels inside the cue and outcome fields
    #[arg(long)]
    cue_separator: Option<String>,

    /// Event file has no `cues<TAB>outcomes` header line
    #[arg(long, default_value_t = false)]
    no_header: bool,

    /// Compute in single precision (f32)
    #[arg(long, default_value_t = false)]
    single_precision: bool,

    /// Configuration file (default: search for ndl_configuration.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Args {
    /// Explicit command-line values, as config overrides
    fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(workers) = self.workers {
            overrides.insert("worker_count".to_string(), workers.to_string());
        }
        if self.remove_duplicates {
            overrides.insert("remove_duplicates".to_string(), "true".to_string());
        }
        if let Some(separator) = &self.cue_separator {
            overrides.insert("cue_separator".to_string(), separator.clone());
        }
        if self.no_header {
            overrides.insert("has_header".to_string(), "false".to_string());
        }
        if let Some(level) = &self.log_level {
            overrides.insert("log_level".to_string(), level.clone());
        }
        if let Some(format) = &self.log_format {
            overrides.insert("log_format".to_string(), format.clone());
        }
        overrides
    }
}

fn main() -> Result<()> {
    // --debug-* flags are handled by the observability crate, not clap
    let debug_flags = parse_debug_flags();
    let args = Args::parse_from(env::args().filter(|arg| !arg.starts_with("--debug-")));

    let overrides = args.config_overrides();
    let config = match &args.config {
        Some(path) => load_config(Some(path.as_path()), Some(&overrides)),
        None => load_config_or_default(Some(&overrides)),
    }
    .context("Failed to load configuration")?;

    init_logging(&config.logging, &debug_flags)?;

    if args.single_precision {
        run::<f32>(&args, &config)
    } else {
        run::<f64>(&args, &config)
    }
}

fn run<F>(args: &Args, config: &NdlConfig) -> Result<()>
where
    F: NdFloat + DeserializeOwned,
{
    let weights = read_weights_file::<F, _>(&args.weights)
        .with_context(|| format!("Failed to load weights from {}", args.weights.display()))?;
    info!(
        "Weights: {} cues x {} outcomes",
        weights.n_cues(),
        weights.n_outcomes()
    );

    let events = event_reader_from_config(&config.io)
        .read_path(&args.events)
        .with_context(|| format!("Failed to read events from {}", args.events.display()))?;
    info!("Events: {}", events.len());

    let engine = ActivationEngine::new(&weights, options_from_config(&config.activation))?;
    let (activations, profile) = engine
        .compute_with_profile(&events)
        .context("Activation failed")?;
    info!(
        "Computed {} x {} activations with {} workers in {:.2}ms",
        profile.events,
        profile.outcomes,
        profile.workers,
        profile.total_ms
    );

    match &args.output {
        Some(path) => write_output(&activations, path)?,
        None => {
            let mut stdout = BufWriter::new(std::io::stdout().lock());
            write_activations(&activations, &mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn write_output<F: NdFloat>(activations: &ActivationMatrix<F>, path: &Path) -> Result<()> {
    write_activations_file(activations, path)
        .with_context(|| format!("Failed to write activations to {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
