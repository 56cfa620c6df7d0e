// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # NDL Activation Engine
//!
//! Computes, for every event of a corpus, the activation of each outcome: the
//! elementwise sum of the weight-matrix rows of the event's distinct cues.
//!
//! ## Components
//! - **CueIndex**: cue label ↔ weight-matrix row
//! - **EventValidator**: duplicate-cue policy
//! - **Aggregation**: row selection and sum
//! - **WorkPartitioner**: contiguous near-equal chunks, one per worker
//! - **ActivationEngine**: rayon fan-out over chunks and ordered assembly
//!
//! ## Example
//! ```
//! use ndarray::array;
//! use ndl_activation::{activation, ActivationOptions, WeightMatrix};
//!
//! let weights = WeightMatrix::new(
//!     vec!["c1".into(), "c2".into(), "c3".into()],
//!     vec!["o1".into(), "o2".into()],
//!     array![[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
//! )
//! .unwrap();
//!
//! let events = vec![vec!["c1", "c2"], vec![], vec!["c3", "c1", "c1"]];
//! let options = ActivationOptions { worker_count: 2, remove_duplicates: true };
//! let activations = activation(&events, &weights, options).unwrap();
//!
//! assert_eq!(activations.to_rows(), vec![vec![1.0, 1.0], vec![0.0, 0.0], vec![0.0, 1.0]]);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod aggregation;
pub mod cue_index;
pub mod engine;
pub mod error;
pub mod event;
pub mod partition;
pub mod weights;

pub use aggregation::{accumulate_rows, aggregate_rows};
pub use cue_index::CueIndex;
pub use engine::{activation, ActivationEngine, ActivationMatrix, ActivationOptions, ActivationProfile};
pub use error::{ActivationError, ActivationResult, CueNotFound, LabelAxis};
pub use event::{Event, EventValidator};
pub use partition::{partition, WorkPartitioner};
pub use weights::WeightMatrix;
