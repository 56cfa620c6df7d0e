// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # NDL I/O
//!
//! File formats around the activation engine:
//! - event files (`cues<TAB>outcomes`, plain or gzip)
//! - weight matrices as JSON
//! - activation tables as tab-separated text
//!
//! ## Usage
//! ```ignore
//! use ndl_activation::{activation, ActivationOptions, WeightMatrix};
//! use ndl_io::{read_events_file, read_weights_file, write_activations_file};
//!
//! let weights: WeightMatrix<f64> = read_weights_file("weights.json")?;
//! let events = read_events_file("events.tab.gz", "_", true)?;
//! let activations = activation(&events, &weights, ActivationOptions::default())?;
//! write_activations_file(&activations, "activations.tsv")?;
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod error;
pub mod events;
pub mod output;
pub mod weights;

pub use error::{IoError, IoResult};
pub use events::{read_events_file, EventReader, EVENT_HEADER};
pub use output::{write_activations, write_activations_file};
pub use weights::{read_weights, read_weights_file, write_weights, write_weights_file, WeightFile};
