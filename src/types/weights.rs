use crate::error::{RadarError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const AXIS_COUNT: usize = 5;

pub const DEFAULT_WEIGHTS: [f64; AXIS_COUNT] = [0.6, 0.5, 0.4, 0.3, 0.2];

/// The five fixed preference dimensions, in ring order (axis 0 points up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Stage,
    FunctionFit,
    IntegrationEffort,
    BudgetSensitivity,
    ComplianceNeed,
}

impl Axis {
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::Stage,
        Axis::FunctionFit,
        Axis::IntegrationEffort,
        Axis::BudgetSensitivity,
        Axis::ComplianceNeed,
    ];

    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stage => "Startup Stage",
            Self::FunctionFit => "Function / Use Case",
            Self::IntegrationEffort => "Integration Effort",
            Self::BudgetSensitivity => "Budget Sensitivity",
            Self::ComplianceNeed => "Data & Compliance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector([f64; AXIS_COUNT]);

impl Default for WeightVector {
    fn default() -> Self {
        Self(DEFAULT_WEIGHTS)
    }
}

impl WeightVector {
    pub fn new(values: [f64; AXIS_COUNT]) -> Self {
        let mut weights = Self([0.0; AXIS_COUNT]);
        for axis in Axis::ALL {
            weights.set(axis, values[axis.index()]);
        }
        weights
    }

    pub fn get(&self, axis: Axis) -> f64 {
        self.0[axis.index()]
    }

    pub fn set(&mut self, axis: Axis, value: f64) {
        self.0[axis.index()] = clamp_unit(value);
    }

    pub fn values(&self) -> &[f64; AXIS_COUNT] {
        &self.0
    }

    pub fn stage(&self) -> f64 {
        self.get(Axis::Stage)
    }
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = RadarError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        let array: [f64; AXIS_COUNT] = values.try_into().map_err(|values: Vec<f64>| {
            RadarError::Validation(format!(
                "weight vector needs exactly {AXIS_COUNT} values (found {})",
                values.len()
            ))
        })?;
        Ok(Self::new(array))
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.0.to_vec()
    }
}

impl FromStr for WeightVector {
    type Err = RadarError;

    fn from_str(input: &str) -> Result<Self> {
        let values = input
            .split(',')
            .map(|part| {
                part.trim().parse::<f64>().map_err(|_| {
                    RadarError::Validation(format!("invalid weight value: '{}'", part.trim()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::try_from(values)
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|value| format!("{value}"))
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&rendered)
    }
}
