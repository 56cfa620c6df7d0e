// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that configuration values are within valid ranges. All problems are
//! collected and reported together.

use crate::{ConfigError, ConfigResult, NdlConfig};

/// Upper bound on explicit worker counts
pub const MAX_WORKER_COUNT: usize = 4096;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &NdlConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_activation(config, &mut errors);
    validate_logging(config, &mut errors);
    validate_io(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_activation(config: &NdlConfig, errors: &mut Vec<ConfigValidationError>) {
    // 0 means auto-detect
    if config.activation.worker_count > MAX_WORKER_COUNT {
        errors.push(ConfigValidationError::InvalidValue {
            field: "activation.worker_count".to_string(),
            reason: format!("must be between 0 (auto) and {}", MAX_WORKER_COUNT),
        });
    }
}

fn validate_logging(config: &NdlConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
}

fn validate_io(config: &NdlConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.io.cue_separator.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "io.cue_separator".to_string(),
        });
    } else if config.io.cue_separator.contains('\t') || config.io.cue_separator.contains('\n') {
        errors.push(ConfigValidationError::InvalidValue {
            field: "io.cue_separator".to_string(),
            reason: "must not contain tab or newline (field delimiters)".to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NdlConfig::default();
        let result = validate_config(&config);
        if let Err(e) = &result {
            eprintln!("Validation error: {}", e);
        }
        assert!(result.is_ok());
    }

    #[test]
    fn test_worker_count_bounds() {
        let mut config = NdlConfig::default();
        config.activation.worker_count = 0;
        assert!(validate_config(&config).is_ok());

        config.activation.worker_count = MAX_WORKER_COUNT + 1;
        let result = validate_config(&config);
        match result {
            Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("activation.worker_count")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = NdlConfig::default();
        config.logging.level = "WARN".to_string();
        assert!(validate_config(&config).is_ok());

        config.logging.level = "verbose".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_all_errors_reported_together() {
        let mut config = NdlConfig::default();
        config.logging.level = "verbose".to_string();
        config.io.cue_separator = String::new();

        match validate_config(&config) {
            Err(ConfigError::ValidationError(msg)) => {
                assert!(msg.contains("logging.level"));
                assert!(msg.contains("io.cue_separator"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_tab_separator_rejected() {
        let mut config = NdlConfig::default();
        config.io.cue_separator = "\t".to_string();
        assert!(validate_config(&config).is_err());
    }
}
