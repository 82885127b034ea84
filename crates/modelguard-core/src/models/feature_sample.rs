//! Feature batches: the reference and current samples compared per analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::InputError;

/// An ordered batch of fixed-width numeric feature vectors with feature names.
///
/// Construction checks that every row has exactly one value per name, including
/// when deserialized. Non-finite values are allowed here; the statistical tests
/// exclude and count them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureSample")]
pub struct FeatureSample {
    feature_names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Wire shape of a [`FeatureSample`] before validation.
#[derive(Deserialize)]
struct RawFeatureSample {
    feature_names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TryFrom<RawFeatureSample> for FeatureSample {
    type Error = InputError;

    fn try_from(raw: RawFeatureSample) -> Result<Self, Self::Error> {
        Self::new(raw.feature_names, raw.rows)
    }
}

impl FeatureSample {
    /// Build a sample, rejecting empty batches and ragged rows.
    pub fn new(feature_names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, InputError> {
        if feature_names.is_empty() || rows.is_empty() {
            return Err(InputError::EmptyBatch {
                batch: "sample".to_string(),
            });
        }
        let width = feature_names.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                if row == 0 {
                    return Err(InputError::NameWidthMismatch {
                        names: width,
                        width: values.len(),
                    });
                }
                return Err(InputError::RaggedBatch {
                    row,
                    expected: width,
                    actual: values.len(),
                });
            }
        }
        Ok(Self {
            feature_names,
            rows,
        })
    }

    /// Build a sample from named columns of equal length.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self, InputError> {
        let len = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut rows = vec![Vec::with_capacity(columns.len()); len];
        let mut names = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            if column.len() != len {
                return Err(InputError::ColumnLengthMismatch {
                    column: name,
                    expected: len,
                    actual: column.len(),
                });
            }
            for (row, value) in rows.iter_mut().zip(column) {
                row.push(value);
            }
            names.push(name);
        }
        Self::new(names, rows)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of features per row.
    pub fn width(&self) -> usize {
        self.feature_names.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy out one feature column.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|r| r[index]).collect()
    }

    /// Position of a named feature.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|n| n == name)
    }

    /// Replace the rows, keeping the feature names. Used after patch application.
    pub fn with_rows(&self, rows: Vec<Vec<f64>>) -> Result<Self, InputError> {
        Self::new(self.feature_names.clone(), rows)
    }

    /// Check that `other` has the same features in the same order.
    pub fn ensure_compatible(&self, other: &FeatureSample) -> Result<(), InputError> {
        if self.width() != other.width() {
            return Err(InputError::FeatureCountMismatch {
                reference: self.width(),
                current: other.width(),
            });
        }
        for (index, (a, b)) in self
            .feature_names
            .iter()
            .zip(other.feature_names.iter())
            .enumerate()
        {
            if a != b {
                return Err(InputError::FeatureNameMismatch {
                    index,
                    reference: a.clone(),
                    current: b.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Class counts of the target/output for the reference and current windows.
/// Supplying one enables prior-drift classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelDistribution {
    pub reference: BTreeMap<u32, usize>,
    pub current: BTreeMap<u32, usize>,
}

impl LabelDistribution {
    /// Count labels from two slices.
    pub fn from_labels(reference: &[u32], current: &[u32]) -> Self {
        let mut dist = Self::default();
        for label in reference {
            *dist.reference.entry(*label).or_insert(0) += 1;
        }
        for label in current {
            *dist.current.entry(*label).or_insert(0) += 1;
        }
        dist
    }
}
