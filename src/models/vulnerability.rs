use crate::error::ProcGapError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorType {
    Human,
    Machine,
    Environmental,
}

/// A single identified failure factor in one Swiss-cheese layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub id: String,
    pub factor_type: FactorType,
    pub probability: f64,
    pub severity: f64,
    pub description: String,
    pub location: (f64, f64),
}

impl Vulnerability {
    /// Rejects probability or severity outside [0,1] rather than clamping,
    /// so bad upstream sensor values surface immediately.
    pub fn new(
        id: impl Into<String>,
        factor_type: FactorType,
        probability: f64,
        severity: f64,
        description: impl Into<String>,
    ) -> Result<Self, ProcGapError> {
        validate_unit_interval("probability", probability)?;
        validate_unit_interval("severity", severity)?;

        Ok(Self {
            id: id.into(),
            factor_type,
            probability,
            severity,
            description: description.into(),
            location: (0.0, 0.0),
        })
    }

    /// Presentation-only position; must be finite.
    pub fn with_location(mut self, x: f64, y: f64) -> Result<Self, ProcGapError> {
        if !x.is_finite() {
            return Err(ProcGapError::InvalidVulnerabilityData {
                field: "location.x",
                value: x,
            });
        }
        if !y.is_finite() {
            return Err(ProcGapError::InvalidVulnerabilityData {
                field: "location.y",
                value: y,
            });
        }
        self.location = (x, y);
        Ok(self)
    }

    /// Ranking key used by the report generator.
    pub fn risk_weight(&self) -> f64 {
        self.probability * self.severity
    }
}

fn validate_unit_interval(field: &'static str, value: f64) -> Result<(), ProcGapError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ProcGapError::InvalidVulnerabilityData { field, value });
    }
    Ok(())
}

impl FactorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorType::Human => "human",
            FactorType::Machine => "machine",
            FactorType::Environmental => "environmental",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" => Some(FactorType::Human),
            "machine" => Some(FactorType::Machine),
            "environmental" => Some(FactorType::Environmental),
            _ => None,
        }
    }
}
