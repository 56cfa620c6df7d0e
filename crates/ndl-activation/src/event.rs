// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Events and Duplicate-Cue Policy
//!
//! An event is an ordered list of cue labels observed together. Corpora also
//! record the outcomes seen with each event; the activation engine only looks
//! at the cues.
//!
//! Duplicate cues are a per-call policy: with `remove_duplicates = false` a
//! repeated cue is rejected (it would otherwise double-count a weight row),
//! with `remove_duplicates = true` the event collapses to its distinct cues.

use crate::error::{ActivationError, ActivationResult};
use ahash::AHashSet;

/// One learning event: the cues present and the outcomes observed with them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    pub cues: Vec<String>,
    pub outcomes: Vec<String>,
}

impl Event {
    pub fn new(cues: Vec<String>, outcomes: Vec<String>) -> Self {
        Self { cues, outcomes }
    }

    /// Event with cues only
    pub fn from_cues<I, S>(cues: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cues: cues.into_iter().map(Into::into).collect(),
            outcomes: Vec::new(),
        }
    }

    pub fn cues(&self) -> &[String] {
        &self.cues
    }

    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

impl AsRef<[String]> for Event {
    fn as_ref(&self) -> &[String] {
        &self.cues
    }
}

/// Applies the duplicate-cue policy to one event at a time.
///
/// Scratch buffers are owned by the caller so a worker can reuse them across
/// its whole chunk without reallocating.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventValidator {
    remove_duplicates: bool,
}

impl EventValidator {
    pub fn new(remove_duplicates: bool) -> Self {
        Self { remove_duplicates }
    }

    pub fn remove_duplicates(&self) -> bool {
        self.remove_duplicates
    }

    /// Write the distinct cues of `cues` into `distinct`, in order of first
    /// appearance.
    ///
    /// `seen` and `distinct` are cleared first. Fails with
    /// [`ActivationError::DuplicateCue`] when a cue repeats and duplicates are
    /// not being removed.
    pub fn distinct_cues_into<'a, S: AsRef<str>>(
        &self,
        event: usize,
        cues: &'a [S],
        seen: &mut AHashSet<&'a str>,
        distinct: &mut Vec<&'a str>,
    ) -> ActivationResult<()> {
        seen.clear();
        distinct.clear();

        for cue in cues {
            let cue = cue.as_ref();
            if seen.insert(cue) {
                distinct.push(cue);
            } else if !self.remove_duplicates {
                return Err(ActivationError::DuplicateCue {
                    event,
                    cue: cue.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Allocating convenience around [`Self::distinct_cues_into`]
    pub fn distinct_cues<'a, S: AsRef<str>>(&self, event: usize, cues: &'a [S]) -> ActivationResult<Vec<&'a str>> {
        let mut seen = AHashSet::with_capacity(cues.len());
        let mut distinct = Vec::with_capacity(cues.len());
        self.distinct_cues_into(event, cues, &mut seen, &mut distinct)?;
        Ok(distinct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_rejected_by_default() {
        let validator = EventValidator::default();
        let err = validator.distinct_cues(4, &["c1", "c2", "c1"]).unwrap_err();
        assert_eq!(
            err,
            ActivationError::DuplicateCue {
                event: 4,
                cue: "c1".to_string()
            }
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_duplicates_removed_in_first_appearance_order() {
        let validator = EventValidator::new(true);
        let distinct = validator.distinct_cues(0, &["c3", "c1", "c3", "c2", "c1"]).unwrap();
        assert_eq!(distinct, vec!["c3", "c1", "c2"]);
    }

    #[test]
    fn test_distinct_event_passes_either_policy() {
        for remove in [false, true] {
            let validator = EventValidator::new(remove);
            assert_eq!(validator.distinct_cues(0, &["a", "b"]).unwrap(), vec!["a", "b"]);
        }
    }

    #[test]
    fn test_empty_event_is_valid() {
        let empty: [&str; 0] = [];
        assert!(EventValidator::new(false).distinct_cues(0, &empty).unwrap().is_empty());
    }

    #[test]
    fn test_scratch_buffers_are_reset() {
        let validator = EventValidator::new(true);
        let first = vec!["a".to_string(), "b".to_string()];
        let second = vec!["b".to_string()];
        let mut seen = AHashSet::new();
        let mut distinct = Vec::new();

        validator.distinct_cues_into(0, &first, &mut seen, &mut distinct).unwrap();
        assert_eq!(distinct, vec!["a", "b"]);
        validator.distinct_cues_into(1, &second, &mut seen, &mut distinct).unwrap();
        assert_eq!(distinct, vec!["b"]);
    }

    #[test]
    fn test_event_cues_ignore_outcomes() {
        let event = Event::new(vec!["c1".into()], vec!["o1".into(), "o2".into()]);
        let cues: &[String] = event.as_ref();
        assert_eq!(cues, event.cues());
        assert_eq!(cues.len(), 1);
        assert_eq!(event.outcomes().len(), 2);
        assert!(Event::from_cues(Vec::<String>::new()).is_empty());
    }
}
