//! Forecasting model catalogue and output types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantile levels returned by models that ignore caller-supplied quantiles
pub const FIXED_QUANTILE_LADDER: [f64; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Forecasting models the downstream service can run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// Chronos-2, accepts multivariate input
    #[default]
    Chronos2,
    /// TiRex, univariate only
    Tirex,
}

impl ModelKind {
    /// All recognized models, in wire-name order
    pub const ALL: [ModelKind; 2] = [ModelKind::Chronos2, ModelKind::Tirex];

    /// Wire identifier of the model
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Chronos2 => "chronos2",
            ModelKind::Tirex => "tirex",
        }
    }

    /// Look up a model by its wire identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.as_str() == name)
    }

    /// Whether rank-2 input may be read as `[sequence, features]`
    pub fn supports_multivariate(&self) -> bool {
        matches!(self, ModelKind::Chronos2)
    }

    /// Quantile levels the model always returns, ignoring caller quantiles.
    ///
    /// Informational only; requests carrying custom quantiles are not rejected.
    pub fn fixed_quantile_ladder(&self) -> Option<&'static [f64]> {
        match self {
            ModelKind::Chronos2 => None,
            ModelKind::Tirex => Some(&FIXED_QUANTILE_LADDER[..]),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of forecast the caller wants back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// A single value per step
    #[default]
    Point,
    /// Values at each requested quantile level
    Quantiles,
}

impl OutputType {
    pub const ALL: [OutputType; 2] = [OutputType::Point, OutputType::Quantiles];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Point => "point",
            OutputType::Quantiles => "quantiles",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|output| output.as_str() == name)
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
