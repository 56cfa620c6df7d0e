// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `ndl_configuration.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NdlConfig {
    pub activation: ActivationConfig,
    pub logging: LoggingConfig,
    pub io: IoConfig,
}

/// Activation engine settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Worker count; 0 = one worker per available core
    pub worker_count: usize,
    /// Collapse repeated cues instead of failing the run
    pub remove_duplicates: bool,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            worker_count: 1,
            remove_duplicates: false,
        }
    }
}

impl ActivationConfig {
    /// Worker count with `0` resolved to the available parallelism
    pub fn resolved_worker_count(&self) -> usize {
        if self.worker_count == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.worker_count
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected 'text' or 'json')", other)),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
    /// Crates logged at debug regardless of `level`
    pub debug_crates: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            debug_crates: Vec::new(),
        }
    }
}

/// Event-file reading settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IoConfig {
    /// Separator between labels inside the cue or outcome field
    pub cue_separator: String,
    /// First line of the event file is a `cues\toutcomes` header
    pub has_header: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            cue_separator: "_".to_string(),
            has_header: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: NdlConfig = toml::from_str("[activation]\nworker_count = 4\n").unwrap();
        assert_eq!(config.activation.worker_count, 4);
        assert!(!config.activation.remove_duplicates);
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.io.cue_separator, "_");
    }

    #[test]
    fn test_log_format_parsing() {
        let config: NdlConfig = toml::from_str("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_auto_worker_count() {
        let config = ActivationConfig {
            worker_count: 0,
            remove_duplicates: false,
        };
        assert!(config.resolved_worker_count() >= 1);
        assert_eq!(ActivationConfig::default().resolved_worker_count(), 1);
    }
}
