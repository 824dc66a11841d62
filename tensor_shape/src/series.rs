//! Typed series payloads and the canonical `[batch, sequence, features]` tensor

use crate::profile::ShapeProfile;
use crate::{Result, ShapeError};
use serde::{Deserialize, Serialize};

/// A validated time series payload of rank 1, 2 or 3.
///
/// Constructors reject empty axes, ragged rows and non-finite leaves, so a
/// `SeriesInput` always has a well-defined [`ShapeProfile`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesInput {
    /// A flat list of observations
    Rank1(Vec<f64>),
    /// A list of rows
    Rank2(Vec<Vec<f64>>),
    /// A list of matrices
    Rank3(Vec<Vec<Vec<f64>>>),
}

impl SeriesInput {
    /// Build a rank-1 payload
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        check_finite(&values, |i| format!("[{}]", i))?;
        if values.is_empty() {
            return Err(ShapeError::EmptyInput("series has no values".to_string()));
        }
        Ok(SeriesInput::Rank1(values))
    }

    /// Build a rank-2 payload; every row must have the same non-zero length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        check_rectangular(&rows, "")?;
        Ok(SeriesInput::Rank2(rows))
    }

    /// Build a rank-3 payload; every matrix must share one rectangular shape
    pub fn from_matrices(matrices: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        check_cube(&matrices)?;
        Ok(SeriesInput::Rank3(matrices))
    }

    /// Nesting depth of the payload
    pub fn rank(&self) -> usize {
        match self {
            SeriesInput::Rank1(_) => 1,
            SeriesInput::Rank2(_) => 2,
            SeriesInput::Rank3(_) => 3,
        }
    }

    /// Axis lengths of the payload
    pub fn shape(&self) -> ShapeProfile {
        match self {
            SeriesInput::Rank1(values) => ShapeProfile::new(vec![values.len()]),
            SeriesInput::Rank2(rows) => {
                ShapeProfile::new(vec![rows.len(), rows.first().map_or(0, Vec::len)])
            }
            SeriesInput::Rank3(matrices) => ShapeProfile::new(cube_dims(matrices).to_vec()),
        }
    }

    /// True when the outermost axis has no elements
    pub fn is_empty(&self) -> bool {
        match self {
            SeriesInput::Rank1(values) => values.is_empty(),
            SeriesInput::Rank2(rows) => rows.is_empty(),
            SeriesInput::Rank3(matrices) => matrices.is_empty(),
        }
    }
}

/// Rank-3 tensor laid out as `[batch, sequence, features]`.
///
/// Every leaf is finite and all rows share one length. The engine always
/// produces a batch of one from rank-1 and rank-2 payloads; rank-3 payloads
/// keep whatever batch axis they arrived with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Vec<f64>>>", into = "Vec<Vec<Vec<f64>>>")]
pub struct CanonicalTensor {
    data: Vec<Vec<Vec<f64>>>,
}

impl CanonicalTensor {
    /// Wrap nested data after checking it is rectangular and finite
    pub fn new(data: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        check_cube(&data)?;
        Ok(Self { data })
    }

    /// `[1, n, 1]` tensor holding one univariate series
    pub fn from_univariate(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ShapeError::EmptyInput("series has no values".to_string()));
        }
        Self::new(vec![values.iter().map(|&v| vec![v]).collect()])
    }

    /// `[1, sequence, features]` tensor from rows of co-observed variables
    pub fn from_multivariate(rows: &[Vec<f64>]) -> Result<Self> {
        Self::new(vec![rows.to_vec()])
    }

    /// Axis lengths, always of rank 3
    pub fn shape(&self) -> ShapeProfile {
        ShapeProfile::new(cube_dims(&self.data).to_vec())
    }

    /// Length of the batch axis
    pub fn batch_size(&self) -> usize {
        self.data.len()
    }

    /// Length of the sequence axis
    pub fn sequence_len(&self) -> usize {
        cube_dims(&self.data)[1]
    }

    /// Length of the feature axis
    pub fn num_features(&self) -> usize {
        cube_dims(&self.data)[2]
    }

    /// Borrow the nested data
    pub fn as_nested(&self) -> &[Vec<Vec<f64>>] {
        &self.data
    }

    /// Take ownership of the nested data
    pub fn into_inner(self) -> Vec<Vec<Vec<f64>>> {
        self.data
    }

    /// Leaves in row-major order
    pub fn flatten(&self) -> Vec<f64> {
        self.data.iter().flatten().flatten().copied().collect()
    }
}

impl TryFrom<Vec<Vec<Vec<f64>>>> for CanonicalTensor {
    type Error = ShapeError;

    fn try_from(data: Vec<Vec<Vec<f64>>>) -> Result<Self> {
        Self::new(data)
    }
}

impl From<CanonicalTensor> for Vec<Vec<Vec<f64>>> {
    fn from(tensor: CanonicalTensor) -> Self {
        tensor.data
    }
}

fn cube_dims(data: &[Vec<Vec<f64>>]) -> [usize; 3] {
    let sequence = data.first().map_or(0, Vec::len);
    let features = data
        .first()
        .and_then(|matrix| matrix.first())
        .map_or(0, Vec::len);
    [data.len(), sequence, features]
}

fn check_finite(values: &[f64], path: impl Fn(usize) -> String) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(ShapeError::NonFinite(path(i))),
        None => Ok(()),
    }
}

fn check_rectangular(rows: &[Vec<f64>], prefix: &str) -> Result<()> {
    let width = match rows.first() {
        Some(first) => first.len(),
        None => {
            return Err(ShapeError::EmptyInput(format!("{}: no rows", display_prefix(prefix))));
        }
    };
    if width == 0 {
        return Err(ShapeError::EmptyInput(format!("{}[0] is empty", prefix)));
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ShapeError::Ragged(format!(
                "{}[{}] has length {}, expected {}",
                prefix,
                i,
                row.len(),
                width
            )));
        }
        check_finite(row, |j| format!("{}[{}][{}]", prefix, i, j))?;
    }

    Ok(())
}

fn check_cube(matrices: &[Vec<Vec<f64>>]) -> Result<()> {
    let [_, sequence, features] = cube_dims(matrices);
    if matrices.is_empty() {
        return Err(ShapeError::EmptyInput("tensor has no batches".to_string()));
    }

    for (b, matrix) in matrices.iter().enumerate() {
        let prefix = format!("[{}]", b);
        check_rectangular(matrix, &prefix)?;
        if matrix.len() != sequence || matrix[0].len() != features {
            return Err(ShapeError::Ragged(format!(
                "{} has shape [{}, {}], expected [{}, {}]",
                prefix,
                matrix.len(),
                matrix[0].len(),
                sequence,
                features
            )));
        }
    }

    Ok(())
}

fn display_prefix(prefix: &str) -> &str {
    if prefix.is_empty() {
        "matrix"
    } else {
        prefix
    }
}
