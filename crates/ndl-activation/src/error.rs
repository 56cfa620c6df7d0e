// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for activation computation

use core::fmt;

/// Which label axis of a weight matrix a label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelAxis {
    Cues,
    Outcomes,
}

impl fmt::Display for LabelAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelAxis::Cues => write!(f, "cue"),
            LabelAxis::Outcomes => write!(f, "outcome"),
        }
    }
}

/// Result type for activation operations
pub type ActivationResult<T> = Result<T, ActivationError>;

/// Errors that can occur while preparing or running an activation computation.
///
/// Every variant is a caller-input error (or, for `Assembly`, an internal
/// invariant break). None of them are transient, so nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivationError {
    #[error("ambiguous event {event}: duplicate cue '{cue}' (set remove_duplicates to collapse repeated cues)")]
    DuplicateCue { event: usize, cue: String },

    #[error("invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    #[error("duplicate {axis} label '{label}' in weight matrix")]
    DuplicateLabel { axis: LabelAxis, label: String },

    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("event {event}: unknown cue '{cue}' (not present in the weight matrix)")]
    UnknownCue { event: usize, cue: String },

    #[error("failed to assemble activation matrix: {0}")]
    Assembly(String),
}

impl ActivationError {
    /// True for the invalid-input class (duplicates, bad worker count, malformed matrix)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ActivationError::DuplicateCue { .. }
                | ActivationError::InvalidWorkerCount(_)
                | ActivationError::DuplicateLabel { .. }
                | ActivationError::ShapeMismatch { .. }
        )
    }

    /// True when an event referenced a cue the weight matrix does not know
    pub fn is_unknown_cue(&self) -> bool {
        matches!(self, ActivationError::UnknownCue { .. })
    }

    /// Index of the offending event, if the error is tied to one
    pub fn event_index(&self) -> Option<usize> {
        match self {
            ActivationError::DuplicateCue { event, .. } | ActivationError::UnknownCue { event, .. } => {
                Some(*event)
            }
            _ => None,
        }
    }
}

/// Lookup failure from [`crate::CueIndex::resolve`].
///
/// Carries no event context; the engine attaches the event index with
/// [`CueNotFound::in_event`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cue not found: '{0}'")]
pub struct CueNotFound(pub String);

impl CueNotFound {
    pub fn in_event(self, event: usize) -> ActivationError {
        ActivationError::UnknownCue { event, cue: self.0 }
    }
}
