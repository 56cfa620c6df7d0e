// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use ndl_activation::ActivationError;
use thiserror::Error;

/// Errors raised while reading or writing NDL files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid weight matrix: {0}")]
    Weights(#[from] ActivationError),
}

pub type IoResult<T> = std::result::Result<T, IoError>;

impl IoError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        IoError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}
