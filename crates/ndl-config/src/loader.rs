// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, LogFormat, NdlConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "ndl_configuration.toml";

/// Find the NDL configuration file
///
/// Search order:
/// 1. `NDL_CONFIG_PATH` environment variable
/// 2. Current working directory: `./ndl_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("NDL_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by NDL_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "NDL configuration file '{}' not found in any of these locations:\n{}\n\nSet NDL_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(config_path: Option<&Path>, cli_args: Option<&HashMap<String, String>>) -> ConfigResult<NdlConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let config: NdlConfig = toml::from_str(&content)?;

    finish(config, cli_args)
}

/// Like [`load_config`] with discovery, but falls back to built-in defaults
/// when no configuration file exists. Overrides still apply.
pub fn load_config_or_default(cli_args: Option<&HashMap<String, String>>) -> ConfigResult<NdlConfig> {
    match find_config_file() {
        Ok(path) => load_config(Some(&path), cli_args),
        Err(ConfigError::FileNotFound(_)) => finish(NdlConfig::default(), cli_args),
        Err(e) => Err(e),
    }
}

fn finish(mut config: NdlConfig, cli_args: Option<&HashMap<String, String>>) -> ConfigResult<NdlConfig> {
    apply_environment_overrides(&mut config)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }
    validate_config(&config)?;
    Ok(config)
}

fn invalid(source: &str, value: &str, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue(format!("{}='{}': {}", source, value, reason))
}

fn parse_bool(source: &str, value: &str) -> ConfigResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(source, value, "expected true/false, 1/0 or yes/no")),
    }
}

fn parse_worker_count(source: &str, value: &str) -> ConfigResult<usize> {
    value.trim().parse::<usize>().map_err(|e| invalid(source, value, e))
}

fn parse_log_format(source: &str, value: &str) -> ConfigResult<LogFormat> {
    value.parse::<LogFormat>().map_err(|e| invalid(source, value, e))
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `NDL_WORKER_COUNT` -> `activation.worker_count`
/// - `NDL_REMOVE_DUPLICATES` -> `activation.remove_duplicates`
/// - `NDL_LOG_LEVEL` -> `logging.level`
/// - `NDL_LOG_FORMAT` -> `logging.format`
/// - `NDL_CUE_SEPARATOR` -> `io.cue_separator`
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming the variable when a set value
/// cannot be parsed.
pub fn apply_environment_overrides(config: &mut NdlConfig) -> ConfigResult<()> {
    if let Ok(value) = env::var("NDL_WORKER_COUNT") {
        config.activation.worker_count = parse_worker_count("NDL_WORKER_COUNT", &value)?;
    }
    if let Ok(value) = env::var("NDL_REMOVE_DUPLICATES") {
        config.activation.remove_duplicates = parse_bool("NDL_REMOVE_DUPLICATES", &value)?;
    }

    if let Ok(value) = env::var("NDL_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("NDL_LOG_FORMAT") {
        config.logging.format = parse_log_format("NDL_LOG_FORMAT", &value)?;
    }

    if let Ok(value) = env::var("NDL_CUE_SEPARATOR") {
        config.io.cue_separator = value;
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"worker_count": "8", "remove_duplicates": "true"}`)
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` naming the key when a value cannot be
/// parsed.
pub fn apply_cli_overrides(config: &mut NdlConfig, cli_args: &HashMap<String, String>) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("worker_count") {
        config.activation.worker_count = parse_worker_count("worker_count", value)?;
    }
    if let Some(value) = cli_args.get("remove_duplicates") {
        config.activation.remove_duplicates = parse_bool("remove_duplicates", value)?;
    }

    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("log_format") {
        config.logging.format = parse_log_format("log_format", value)?;
    }

    if let Some(value) = cli_args.get("cue_separator") {
        config.io.cue_separator = value.clone();
    }
    if let Some(value) = cli_args.get("has_header") {
        config.io.has_header = parse_bool("has_header", value)?;
    }
    Ok(())
}
