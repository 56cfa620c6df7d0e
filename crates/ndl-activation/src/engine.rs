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

//! # Activation Engine
//!
//! Computes the events × outcomes activation matrix for a corpus.
//!
//! ## Pipeline
//! 1. **Partition**: split the events into `worker_count` contiguous chunks
//!    (capped at one chunk per event)
//! 2. **Compute** (one rayon task per chunk): for each event validate the
//!    duplicate-cue policy, resolve cues to rows, sum the rows into the
//!    chunk's own output block
//! 3. **Assemble**: join all chunks, then concatenate the blocks in chunk order
//!
//! Workers only read the shared weight matrix and cue index. The join in
//! step 3 is the only synchronization point.
//!
//! ## Determinism
//! Each event is summed by exactly one worker, rows in first-appearance order
//! of its cues, so results are bit-identical for every `worker_count`. When
//! several events are invalid the reported error is the one with the lowest
//! event index, again independent of `worker_count`.

use crate::aggregation::accumulate_rows;
use crate::error::{ActivationError, ActivationResult};
use crate::event::EventValidator;
use crate::partition::WorkPartitioner;
use crate::weights::WeightMatrix;
use ahash::AHashSet;
use core::ops::Range;
use ndarray::{Array2, ArrayView1, ArrayView2, Axis, NdFloat};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

/// Per-call options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationOptions {
    /// Number of workers (contiguous chunks). Must be ≥ 1.
    pub worker_count: usize,
    /// Collapse repeated cues instead of rejecting the event
    pub remove_duplicates: bool,
}

impl Default for ActivationOptions {
    fn default() -> Self {
        Self {
            worker_count: 1,
            remove_duplicates: false,
        }
    }
}

impl ActivationOptions {
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_remove_duplicates(mut self, remove_duplicates: bool) -> Self {
        self.remove_duplicates = remove_duplicates;
        self
    }
}

/// Activation rows, one per input event in input order, with outcome labels
/// for the columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationMatrix<F> {
    values: Array2<F>,
    outcomes: Vec<String>,
}

impl<F: NdFloat> ActivationMatrix<F> {
    pub fn values(&self) -> ArrayView2<'_, F> {
        self.values.view()
    }

    pub fn into_values(self) -> Array2<F> {
        self.values
    }

    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    pub fn n_events(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_outcomes(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    /// Activation row of one event
    pub fn row(&self, event: usize) -> Option<ArrayView1<'_, F>> {
        (event < self.values.nrows()).then(|| self.values.row(event))
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, F>> + '_ {
        self.values.rows().into_iter()
    }

    /// Activation of `outcome` for `event`, addressed by label
    pub fn get(&self, event: usize, outcome: &str) -> Option<F> {
        let column = self.outcomes.iter().position(|o| o == outcome)?;
        self.values.get((event, column)).copied()
    }

    pub fn to_rows(&self) -> Vec<Vec<F>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

/// Timing and sizing of the last engine call.
#[derive(Clone, Debug)]
pub struct ActivationProfile {
    pub events: usize,
    pub outcomes: usize,
    pub workers: usize,
    pub largest_chunk: usize,
    pub compute_ms: f64,
    pub assemble_ms: f64,
    pub total_ms: f64,
    pub rayon_threads: usize,
}

/// Activation engine bound to one weight matrix.
///
/// The cue index lives in the weight matrix and is shared read-only by all
/// workers; preparing an engine once and calling [`Self::compute`] repeatedly
/// avoids re-validating options per corpus.
pub struct ActivationEngine<'w, F> {
    weights: &'w WeightMatrix<F>,
    partitioner: WorkPartitioner,
    validator: EventValidator,
}

impl<'w, F: NdFloat> ActivationEngine<'w, F> {
    /// Fails with [`ActivationError::InvalidWorkerCount`] before touching any event
    pub fn new(weights: &'w WeightMatrix<F>, options: ActivationOptions) -> ActivationResult<Self> {
        let partitioner = WorkPartitioner::new(options.worker_count)?;
        let rayon_threads = rayon::current_num_threads();
        if options.worker_count > rayon_threads {
            warn!(
                "worker_count {} exceeds rayon pool size {}; chunks will share threads",
                options.worker_count,
                rayon_threads
            );
        }
        Ok(Self {
            weights,
            partitioner,
            validator: EventValidator::new(options.remove_duplicates),
        })
    }

    pub fn weights(&self) -> &WeightMatrix<F> {
        self.weights
    }

    pub fn options(&self) -> ActivationOptions {
        ActivationOptions {
            worker_count: self.partitioner.worker_count(),
            remove_duplicates: self.validator.remove_duplicates(),
        }
    }

    /// Compute the activation matrix for `events`.
    ///
    /// Each event is anything that exposes a slice of cue labels: `Event`,
    /// `Vec<String>`, `Vec<&str>`, ...
    pub fn compute<E, S>(&self, events: &[E]) -> ActivationResult<ActivationMatrix<F>>
    where
        E: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        self.compute_with_profile(events).map(|(matrix, _)| matrix)
    }

    /// [`Self::compute`] plus a timing profile of the call
    pub fn compute_with_profile<E, S>(&self, events: &[E]) -> ActivationResult<(ActivationMatrix<F>, ActivationProfile)>
    where
        E: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        let total_start = std::time::Instant::now();
        // At most one chunk per event, whatever worker_count asks for
        let chunks = self.partitioner.partition_non_empty(events.len());
        let largest_chunk = chunks.iter().map(|c| c.len()).max().unwrap_or(0);

        debug!(
            "computing activations: events={} cues={} outcomes={} workers={} chunks={} largest_chunk={} remove_duplicates={}",
            events.len(),
            self.weights.n_cues(),
            self.weights.n_outcomes(),
            self.partitioner.worker_count(),
            chunks.len(),
            largest_chunk,
            self.validator.remove_duplicates()
        );

        // PHASE 1: COMPUTE - one block per chunk. A single chunk runs inline (serial path).
        let compute_start = std::time::Instant::now();
        let blocks: Vec<ActivationResult<Array2<F>>> = if chunks.len() == 1 {
            chunks.into_iter().map(|range| self.compute_chunk(events, range)).collect()
        } else {
            chunks
                .into_par_iter()
                .map(|range| self.compute_chunk(events, range))
                .collect()
        };
        let compute_ms = compute_start.elapsed().as_secs_f64() * 1000.0;

        // Chunks are in event order and each stops at its first bad event,
        // so the first error found here has the lowest event index overall.
        let blocks = blocks.into_iter().collect::<ActivationResult<Vec<_>>>()?;

        // PHASE 2: ASSEMBLE - concatenate blocks in chunk order
        let assemble_start = std::time::Instant::now();
        let views: Vec<ArrayView2<'_, F>> = blocks.iter().map(|b| b.view()).collect();
        let values = ndarray::concatenate(Axis(0), &views).map_err(|e| ActivationError::Assembly(e.to_string()))?;
        let assemble_ms = assemble_start.elapsed().as_secs_f64() * 1000.0;

        let profile = ActivationProfile {
            events: values.nrows(),
            outcomes: values.ncols(),
            workers: self.partitioner.worker_count(),
            largest_chunk,
            compute_ms,
            assemble_ms,
            total_ms: total_start.elapsed().as_secs_f64() * 1000.0,
            rayon_threads: rayon::current_num_threads(),
        };
        debug!(
            "activations ready: compute={:.3}ms assemble={:.3}ms total={:.3}ms",
            profile.compute_ms,
            profile.assemble_ms,
            profile.total_ms
        );

        Ok((
            ActivationMatrix {
                values,
                outcomes: self.weights.outcomes().to_vec(),
            },
            profile,
        ))
    }

    /// Worker body: activations for `events[range]`, written into a block the
    /// worker owns. Fails fast on the first invalid event in the chunk.
    fn compute_chunk<E, S>(&self, events: &[E], range: Range<usize>) -> ActivationResult<Array2<F>>
    where
        E: AsRef<[S]>,
        S: AsRef<str>,
    {
        let chunk_start = std::time::Instant::now();
        let weights = self.weights.values();
        let cue_index = self.weights.cue_index();
        let mut block = Array2::zeros((range.len(), weights.ncols()));

        // Scratch reused across the chunk
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut distinct: Vec<&str> = Vec::new();
        let mut rows: Vec<usize> = Vec::new();

        for (offset, event) in events[range.clone()].iter().enumerate() {
            let event_idx = range.start + offset;
            self.validator
                .distinct_cues_into(event_idx, event.as_ref(), &mut seen, &mut distinct)?;

            rows.clear();
            for cue in &distinct {
                rows.push(cue_index.resolve(cue).map_err(|e| e.in_event(event_idx))?);
            }

            accumulate_rows(weights, &rows, block.row_mut(offset));
        }

        trace!(
            "chunk {:?} done in {:.3}ms",
            range,
            chunk_start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(block)
    }
}

/// One-shot activation computation.
///
/// Validates `options.worker_count` first, then computes every event's
/// activation row. Fails as a whole on the first (lowest-index) invalid
/// event; no partial matrix is returned.
pub fn activation<F, E, S>(
    events: &[E],
    weights: &WeightMatrix<F>,
    options: ActivationOptions,
) -> ActivationResult<ActivationMatrix<F>>
where
    F: NdFloat,
    E: AsRef<[S]> + Sync,
    S: AsRef<str> + Sync,
{
    ActivationEngine::new(weights, options)?.compute(events)
}
