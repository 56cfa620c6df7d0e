// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Installs one console layer (text or JSON) behind an `EnvFilter` built from
//! the configured level and the per-crate debug flags.

use anyhow::{Context, Result};
use ndl_config::{LogFormat, LoggingConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Merge config-listed debug crates into the CLI/env flags
pub fn effective_flags(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> CrateDebugFlags {
    let mut flags = debug_flags.clone();
    for crate_name in &config.debug_crates {
        flags.enable(crate_name);
    }
    flags
}

/// Build the filter for a logging configuration and debug flags
pub fn build_filter(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    let directives = effective_flags(config, debug_flags).to_filter_string(&config.level);
    EnvFilter::try_new(&directives).with_context(|| format!("Invalid log filter: {}", directives))
}

/// Initialize the global tracing subscriber
///
/// # Errors
/// Fails if the filter is invalid or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<()> {
    let env_filter = build_filter(config, debug_flags)?;
    let directives = env_filter.to_string();

    let console_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed(),
    };

    Registry::default()
        .with(console_layer)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    tracing::debug!("Logging initialized: format={:?}, filter={}", config.format, directives);
    Ok(())
}
