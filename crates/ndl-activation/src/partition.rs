// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Work Partitioning
//!
//! Splits a sequence of `len` events into one contiguous range per worker.
//! The ranges are non-overlapping, concatenate in order to `0..len`, and
//! differ in size by at most one (the first `len % workers` ranges carry the
//! extra event). With more workers than events the trailing ranges are empty;
//! `partition_non_empty` leaves them out.
//!
//! The partitioner knows nothing about the execution primitive; the engine
//! hands each range to a rayon task.

use crate::error::{ActivationError, ActivationResult};
use core::ops::Range;

/// Near-equal contiguous split of an event sequence across workers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPartitioner {
    worker_count: usize,
}

impl WorkPartitioner {
    /// Fails with [`ActivationError::InvalidWorkerCount`] when `worker_count < 1`
    pub fn new(worker_count: usize) -> ActivationResult<Self> {
        if worker_count == 0 {
            return Err(ActivationError::InvalidWorkerCount(worker_count));
        }
        Ok(Self { worker_count })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Chunk ranges for `len` events, exactly `worker_count` of them
    pub fn partition(&self, len: usize) -> Vec<Range<usize>> {
        split(len, self.worker_count)
    }

    /// Like [`Self::partition`] but never more chunks than events (and at
    /// least one). The ranges are the non-empty ranges `partition` returns;
    /// only the trailing empty ones are left out.
    pub fn partition_non_empty(&self, len: usize) -> Vec<Range<usize>> {
        split(len, self.worker_count.min(len).max(1))
    }
}

fn split(len: usize, chunk_count: usize) -> Vec<Range<usize>> {
    let base = len / chunk_count;
    let remainder = len % chunk_count;

    let mut chunks = Vec::with_capacity(chunk_count);
    let mut start = 0;
    for chunk in 0..chunk_count {
        let size = base + usize::from(chunk < remainder);
        chunks.push(start..start + size);
        start += size;
    }
    debug_assert_eq!(start, len);
    chunks
}

/// One-shot helper: validate `worker_count` and split `len` events
pub fn partition(len: usize, worker_count: usize) -> ActivationResult<Vec<Range<usize>>> {
    Ok(WorkPartitioner::new(worker_count)?.partition(len))
}
