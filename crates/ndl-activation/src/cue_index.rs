// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Cue Index
//!
//! Bidirectional mapping between cue labels and weight-matrix row indices.
//! Row order of the weight matrix defines the index assignment.

use crate::error::{ActivationError, ActivationResult, CueNotFound, LabelAxis};
use ahash::AHashMap;

/// Cue label → row index lookup, plus the reverse row → label table
#[derive(Debug, Clone, Default)]
pub struct CueIndex {
    /// Pre-built index: cue label → row
    index: AHashMap<String, usize>,
    /// Row → cue label (weight matrix row order)
    labels: Vec<String>,
}

impl CueIndex {
    /// Build the index from the cue axis of a weight matrix.
    ///
    /// Fails with [`ActivationError::DuplicateLabel`] if a label repeats.
    pub fn new(labels: Vec<String>) -> ActivationResult<Self> {
        let mut index = AHashMap::with_capacity(labels.len());
        for (row, label) in labels.iter().enumerate() {
            if index.insert(label.clone(), row).is_some() {
                return Err(ActivationError::DuplicateLabel {
                    axis: LabelAxis::Cues,
                    label: label.clone(),
                });
            }
        }
        Ok(Self { index, labels })
    }

    /// Resolve a cue label to its row index
    #[inline]
    pub fn resolve(&self, cue: &str) -> Result<usize, CueNotFound> {
        self.index
            .get(cue)
            .copied()
            .ok_or_else(|| CueNotFound(cue.to_string()))
    }

    #[inline]
    pub fn get(&self, cue: &str) -> Option<usize> {
        self.index.get(cue).copied()
    }

    pub fn contains(&self, cue: &str) -> bool {
        self.index.contains_key(cue)
    }

    /// Reverse lookup: row index → cue label
    pub fn label(&self, row: usize) -> Option<&str> {
        self.labels.get(row).map(String::as_str)
    }

    /// Cue labels in row order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolve_follows_row_order() {
        let index = CueIndex::new(labels(&["c1", "c2", "c3"])).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.resolve("c1"), Ok(0));
        assert_eq!(index.resolve("c2"), Ok(1));
        assert_eq!(index.resolve("c3"), Ok(2));
        assert_eq!(index.label(1), Some("c2"));
        assert_eq!(index.label(3), None);
    }

    #[test]
    fn test_unknown_cue() {
        let index = CueIndex::new(labels(&["c1"])).unwrap();
        assert_eq!(index.resolve("c4"), Err(CueNotFound("c4".to_string())));
        assert!(index.get("c4").is_none());
        assert!(!index.contains("c4"));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = CueIndex::new(labels(&["c1", "c2", "c1"])).unwrap_err();
        assert_eq!(
            err,
            ActivationError::DuplicateLabel {
                axis: LabelAxis::Cues,
                label: "c1".to_string()
            }
        );
    }

    #[test]
    fn test_empty_index() {
        let index = CueIndex::new(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert!(index.resolve("").is_err());
    }
}
