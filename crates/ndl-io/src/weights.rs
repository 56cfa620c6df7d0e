// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Weight-matrix JSON format
//!
//! ```json
//! { "cues": ["c1", "c2"], "outcomes": ["o1"], "values": [[0.5], [-1.0]] }
//! ```
//!
//! `values` is row-major, one row per cue. JSON has no NaN or infinity, so
//! non-finite weights are written as the strings `"NaN"`, `"inf"` and
//! `"-inf"`; `null` reads back as NaN.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::NdFloat;
use ndl_activation::WeightMatrix;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::IoResult;

/// On-disk representation of a weight matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "F: NdFloat + Serialize",
    deserialize = "F: NdFloat + Deserialize<'de>"
))]
pub struct WeightFile<F> {
    pub cues: Vec<String>,
    pub outcomes: Vec<String>,
    #[serde(with = "float_rows")]
    pub values: Vec<Vec<F>>,
}

/// One weight as stored in JSON
struct JsonFloat<F>(F);

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonFloatRepr<F> {
    Number(F),
    Text(String),
    Null,
}

impl<F: NdFloat + Serialize> Serialize for JsonFloat<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if value > F::zero() { "inf" } else { "-inf" })
        } else {
            value.serialize(serializer)
        }
    }
}

impl<'de, F: NdFloat + Deserialize<'de>> Deserialize<'de> for JsonFloat<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonFloatRepr::<F>::deserialize(deserializer)? {
            JsonFloatRepr::Number(value) => Ok(JsonFloat(value)),
            JsonFloatRepr::Null => Ok(JsonFloat(F::nan())),
            JsonFloatRepr::Text(text) => match text.to_ascii_lowercase().as_str() {
                "nan" => Ok(JsonFloat(F::nan())),
                "inf" | "+inf" | "infinity" | "+infinity" => Ok(JsonFloat(F::infinity())),
                "-inf" | "-infinity" => Ok(JsonFloat(F::neg_infinity())),
                _ => Err(D::Error::custom(format!("invalid weight value '{}'", text))),
            },
        }
    }
}

mod float_rows {
    use super::*;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<F, S>(rows: &Vec<Vec<F>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        F: NdFloat + Serialize,
        S: Serializer,
    {
        serializer.collect_seq(
            rows.iter()
                .map(|row| row.iter().map(|&value| JsonFloat(value)).collect::<Vec<_>>()),
        )
    }

    pub fn deserialize<'de, F, D>(deserializer: D) -> Result<Vec<Vec<F>>, D::Error>
    where
        F: NdFloat + Deserialize<'de>,
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<JsonFloat<F>>>::deserialize(deserializer)?;
        Ok(rows
            .into_iter()
            .map(|row| row.into_iter().map(|value| value.0).collect())
            .collect())
    }
}

impl<F: NdFloat> WeightFile<F> {
    pub fn from_matrix(weights: &WeightMatrix<F>) -> Self {
        Self {
            cues: weights.cues().to_vec(),
            outcomes: weights.outcomes().to_vec(),
            values: weights.values().outer_iter().map(|row| row.to_vec()).collect(),
        }
    }

    /// Validate labels and shape and build the matrix
    pub fn into_matrix(self) -> IoResult<WeightMatrix<F>> {
        Ok(WeightMatrix::from_rows(self.cues, self.outcomes, self.values)?)
    }
}

pub fn read_weights<F, R>(reader: R) -> IoResult<WeightMatrix<F>>
where
    F: NdFloat + DeserializeOwned,
    R: Read,
{
    let file: WeightFile<F> = serde_json::from_reader(reader)?;
    let weights = file.into_matrix()?;
    debug!(
        "Loaded weight matrix: {} cues x {} outcomes",
        weights.n_cues(),
        weights.n_outcomes()
    );
    Ok(weights)
}

pub fn read_weights_file<F, P>(path: P) -> IoResult<WeightMatrix<F>>
where
    F: NdFloat + DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    read_weights(BufReader::new(file))
}

pub fn write_weights<F, W>(weights: &WeightMatrix<F>, writer: W) -> IoResult<()>
where
    F: NdFloat + Serialize,
    W: Write,
{
    serde_json::to_writer(writer, &WeightFile::from_matrix(weights))?;
    Ok(())
}

pub fn write_weights_file<F, P>(weights: &WeightMatrix<F>, path: P) -> IoResult<()>
where
    F: NdFloat + Serialize,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_weights(weights, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IoError;
    use ndl_activation::{ActivationError, LabelAxis};

    const JSON: &str = r#"{
        "cues": ["c1", "c2", "c3"],
        "outcomes": ["o1", "o2"],
        "values": [[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]]
    }"#;

    #[test]
    fn test_read_weights() {
        let weights: WeightMatrix<f64> = read_weights(JSON.as_bytes()).unwrap();
        assert_eq!(weights.cues(), ["c1", "c2", "c3"]);
        assert_eq!(weights.outcomes(), ["o1", "o2"]);
        assert_eq!(weights.cue_row("c1").unwrap().to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_file_round_trip_f32() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");

        let weights = WeightMatrix::<f32>::from_rows(
            vec!["c1".into(), "c2".into(), "c3".into()],
            vec!["o1".into(), "o2".into()],
            vec![
                vec![0.0, 1.5],
                vec![-0.25, 1.0e-3],
                vec![f32::NAN, f32::NEG_INFINITY],
            ],
        )
        .unwrap();
        write_weights_file(&weights, &path).unwrap();
        let reloaded: WeightMatrix<f32> = read_weights_file(&path).unwrap();

        assert_eq!(reloaded.cues(), weights.cues());
        assert_eq!(reloaded.outcomes(), weights.outcomes());
        assert_eq!(reloaded.cue_row("c1").unwrap().to_vec(), vec![0.0, 1.5]);
        assert_eq!(reloaded.cue_row("c2").unwrap().to_vec(), vec![-0.25, 1.0e-3]);
        let last = reloaded.cue_row("c3").unwrap();
        assert!(last[0].is_nan());
        assert_eq!(last[1], f32::NEG_INFINITY);
    }

    #[test]
    fn test_non_finite_values_written_as_strings() {
        let weights = WeightMatrix::<f64>::from_rows(
            vec!["c1".into()],
            vec!["o1".into(), "o2".into(), "o3".into()],
            vec![vec![f64::NAN, f64::INFINITY, 2.0]],
        )
        .unwrap();
        let mut buffer = Vec::new();
        write_weights(&weights, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains(r#"[["NaN","inf",2.0]]"#), "{}", text);
    }

    #[test]
    fn test_null_reads_as_nan() {
        let json = r#"{"cues": ["c1"], "outcomes": ["o1", "o2"], "values": [[null, "-Infinity"]]}"#;
        let weights = read_weights::<f64, _>(json.as_bytes()).unwrap();
        let row = weights.cue_row("c1").unwrap();
        assert!(row[0].is_nan());
        assert_eq!(row[1], f64::NEG_INFINITY);
    }

    #[test]
    fn test_unknown_weight_string_rejected() {
        let json = r#"{"cues": ["c1"], "outcomes": ["o1"], "values": [["lots"]]}"#;
        let err = read_weights::<f64, _>(json.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Json(_)));
        assert!(err.to_string().contains("invalid weight value 'lots'"));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let json = r#"{"cues": ["a", "b"], "outcomes": ["x", "y"], "values": [[1.0, 2.0], [3.0]]}"#;
        let err = read_weights::<f64, _>(json.as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Weights(ActivationError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_duplicate_cue_label_rejected() {
        let json = r#"{"cues": ["a", "a"], "outcomes": ["x"], "values": [[1.0], [2.0]]}"#;
        let err = read_weights::<f64, _>(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IoError::Weights(ActivationError::DuplicateLabel { axis: LabelAxis::Cues, .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let err = read_weights::<f64, _>("{\"cues\": [".as_bytes()).unwrap_err();
        assert!(matches!(err, IoError::Json(_)));
    }
}
