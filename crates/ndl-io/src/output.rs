// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Activation table writer (tab-separated, one row per event)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::NdFloat;
use ndl_activation::ActivationMatrix;
use tracing::debug;

use crate::error::IoResult;

/// Write `event<TAB>outcome...` followed by one row per event
pub fn write_activations<F, W>(activations: &ActivationMatrix<F>, mut writer: W) -> IoResult<()>
where
    F: NdFloat,
    W: Write,
{
    write!(writer, "event")?;
    for outcome in activations.outcomes() {
        write!(writer, "\t{}", outcome)?;
    }
    writeln!(writer)?;

    for (event, row) in activations.rows().enumerate() {
        write!(writer, "{}", event)?;
        for value in row.iter() {
            write!(writer, "\t{}", value)?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

pub fn write_activations_file<F, P>(activations: &ActivationMatrix<F>, path: P) -> IoResult<()>
where
    F: NdFloat,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_activations(activations, &mut writer)?;
    writer.flush()?;
    debug!(
        "Wrote {} activation rows to {}",
        activations.n_events(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndl_activation::{activation, ActivationOptions, WeightMatrix};

    fn activations() -> ActivationMatrix<f64> {
        let weights = WeightMatrix::from_rows(
            vec!["c1".into(), "c2".into()],
            vec!["o1".into(), "o2".into()],
            vec![vec![0.5, 1.0], vec![0.25, -2.0]],
        )
        .unwrap();
        let events = vec![vec!["c1", "c2"], vec![], vec!["c2"]];
        activation(&events, &weights, ActivationOptions::default()).unwrap()
    }

    #[test]
    fn test_table_layout() {
        let mut buffer = Vec::new();
        write_activations(&activations(), &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, ["event\to1\to2", "0\t0.75\t-1", "1\t0\t0", "2\t0.25\t-2"]);
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("activations.tsv");
        write_activations_file(&activations(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("event\to1\to2\n"));
    }
}
