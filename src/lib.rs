//! # NDL - Naive Discriminative Learning activations
//!
//! Computes, for a corpus of events, how strongly each outcome is activated by
//! the cues present in the event, given a trained cue-by-outcome weight
//! matrix. Work is split into contiguous chunks and run in parallel; results
//! are identical for every worker count.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! ndl = "0.1"  # Default: engine + io + config + observability
//! ```
//!
//! ## Feature Flags
//!
//! - **`io`** (default): event files, weight JSON, activation tables
//! - **`config`** (default): `ndl_configuration.toml` loader
//! - **`observability`** (default): logging initialization
//!
//! The engine itself is always available.
//!
//! ## Usage
//!
//! ```rust
//! use ndl::prelude::*;
//!
//! let weights = WeightMatrix::from_rows(
//!     vec!["c1".into(), "c2".into()],
//!     vec!["o1".into()],
//!     vec![vec![0.5], vec![0.25]],
//! )?;
//! let events = vec![vec!["c1", "c2"], vec!["c2"]];
//!
//! let activations = activation(&events, &weights, ActivationOptions::default().with_worker_count(2))?;
//! assert_eq!(activations.to_rows(), vec![vec![0.75], vec![0.25]]);
//! # Ok::<(), ndl::activation::ActivationError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: ndl-config, ndl-observability              │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  Engine: ndl-activation                                 │
//! │  (CueIndex, EventValidator, aggregation, partitioning)  │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  I/O: ndl-io                                            │
//! │  (event files, weight JSON, activation tables)          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## License
//!
//! Apache-2.0

// Re-export engine
pub use ndl_activation as activation;

pub use ndarray;

#[cfg(feature = "io")]
pub use ndl_io as io;

#[cfg(feature = "config")]
pub use ndl_config as config;

#[cfg(feature = "observability")]
pub use ndl_observability as observability;

/// Engine options from the `[activation]` configuration section
///
/// A configured worker count of 0 resolves to the available parallelism.
#[cfg(feature = "config")]
pub fn options_from_config(config: &ndl_config::ActivationConfig) -> ndl_activation::ActivationOptions {
    ndl_activation::ActivationOptions::default()
        .with_worker_count(config.resolved_worker_count())
        .with_remove_duplicates(config.remove_duplicates)
}

/// Event reader from the `[io]` configuration section
#[cfg(all(feature = "config", feature = "io"))]
pub fn event_reader_from_config(config: &ndl_config::IoConfig) -> ndl_io::EventReader {
    ndl_io::EventReader::new(config.cue_separator.clone(), config.has_header)
}

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::activation::{
        activation, ActivationEngine, ActivationError, ActivationMatrix, ActivationOptions, ActivationResult,
        CueIndex, Event, EventValidator, WeightMatrix, WorkPartitioner,
    };

    #[cfg(feature = "io")]
    pub use crate::io::{read_events_file, read_weights_file, write_activations_file, EventReader, IoError};

    #[cfg(feature = "config")]
    pub use crate::config::{load_config, load_config_or_default, NdlConfig};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_facade_imports() {
        use crate::prelude::*;
        let options = ActivationOptions::default();
        assert_eq!(options.worker_count, 1);
        assert!(!options.remove_duplicates);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_options_from_config() {
        let config = crate::config::ActivationConfig {
            worker_count: 3,
            remove_duplicates: true,
        };
        let options = crate::options_from_config(&config);
        assert_eq!(options.worker_count, 3);
        assert!(options.remove_duplicates);

        let auto = crate::config::ActivationConfig {
            worker_count: 0,
            remove_duplicates: false,
        };
        assert!(crate::options_from_config(&auto).worker_count >= 1);
    }
}
