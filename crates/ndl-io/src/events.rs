// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Event-file reader
//!
//! One event per line: `cue_cue_cue<TAB>outcome_outcome`. An optional header
//! line (`cues\toutcomes`) comes first. Files ending in `.gz` are decompressed
//! on the fly.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use ndl_activation::Event;
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Header line written by the usual event-file producers
pub const EVENT_HEADER: &str = "cues\toutcomes";

/// Parses event files into [`Event`]s
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventReader {
    separator: String,
    has_header: bool,
}

impl Default for EventReader {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            has_header: true,
        }
    }
}

impl EventReader {
    pub fn new(separator: impl Into<String>, has_header: bool) -> Self {
        Self {
            separator: separator.into(),
            has_header,
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Read every event from `reader`
    ///
    /// Blank lines are skipped; a line holding only the tab is an event with
    /// no cues and no outcomes. Line numbers in errors are 1-based and count
    /// the header.
    pub fn read<R: BufRead>(&self, reader: R) -> IoResult<Vec<Event>> {
        let mut events = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = idx + 1;

            if idx == 0 && self.has_header {
                if line != EVENT_HEADER {
                    debug!("Skipping non-standard header line: {:?}", line);
                }
                continue;
            }
            if !line.contains('\t') && line.trim().is_empty() {
                continue;
            }

            events.push(self.parse_line(line_no, &line)?);
        }

        debug!("Read {} events", events.len());
        Ok(events)
    }

    /// Open and read an event file, decompressing `*.gz`
    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> IoResult<Vec<Event>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!("Reading events from {}", path.display());

        if path.extension().is_some_and(|ext| ext == "gz") {
            self.read(BufReader::new(GzDecoder::new(file)))
        } else {
            self.read(BufReader::new(file))
        }
    }

    fn parse_line(&self, line_no: usize, line: &str) -> IoResult<Event> {
        let (cue_field, outcome_field) = line
            .split_once('\t')
            .ok_or_else(|| IoError::malformed(line_no, "missing tab between cues and outcomes"))?;

        let cues = self.split_labels(line_no, cue_field, "cue")?;
        let outcomes = self.split_labels(line_no, outcome_field, "outcome")?;
        Ok(Event::new(cues, outcomes))
    }

    fn split_labels(&self, line_no: usize, field: &str, kind: &str) -> IoResult<Vec<String>> {
        if field.is_empty() {
            return Ok(Vec::new());
        }

        field
            .split(self.separator.as_str())
            .map(|label| {
                if label.is_empty() {
                    Err(IoError::malformed(line_no, format!("empty {} label in '{}'", kind, field)))
                } else {
                    Ok(label.to_string())
                }
            })
            .collect()
    }
}

/// Read an event file with the given separator and header setting
pub fn read_events_file<P: AsRef<Path>>(path: P, separator: &str, has_header: bool) -> IoResult<Vec<Event>> {
    EventReader::new(separator, has_header).read_path(path)
}
