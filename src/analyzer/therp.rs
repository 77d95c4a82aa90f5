use crate::analyzer::Analyzer;
use crate::error::ProcGapError;
use crate::models::{FactorType, SensorData, Vulnerability};
use rand::Rng;
use std::collections::BTreeMap;

/// Base human error probability applied to tasks missing from the THERP table.
const FALLBACK_ERROR_RATE: f64 = 0.001;

/// Severity assigned to human-error vulnerabilities; THERP estimates
/// likelihood only, impact is assessed separately.
const HUMAN_ERROR_SEVERITY: f64 = 0.7;

/// Human-reliability analyzer using the THERP method: each task's base error
/// probability is scaled up by the operator's measured fatigue.
pub struct TherpAnalyzer {
    error_rates: BTreeMap<String, f64>,
    fallback_rate: f64,
}

impl TherpAnalyzer {
    pub fn new(error_rates: BTreeMap<String, f64>) -> Self {
        Self {
            error_rates,
            fallback_rate: FALLBACK_ERROR_RATE,
        }
    }

    /// Reference table with base error rates for common control-room tasks.
    pub fn with_default_database() -> Self {
        let mut error_rates = BTreeMap::new();
        error_rates.insert("control_panel_operation".to_string(), 0.001);
        error_rates.insert("emergency_response".to_string(), 0.003);
        error_rates.insert("routine_maintenance".to_string(), 0.002);
        Self::new(error_rates)
    }

    pub fn with_fallback_rate(mut self, rate: f64) -> Self {
        self.fallback_rate = rate;
        self
    }

    fn base_rate(&self, task: &str) -> f64 {
        self.error_rates
            .get(task)
            .copied()
            .unwrap_or(self.fallback_rate)
    }
}

impl Analyzer for TherpAnalyzer {
    fn name(&self) -> &str {
        "therp"
    }

    fn produce(&self, sensor_data: &SensorData) -> Result<Vec<Vulnerability>, ProcGapError> {
        let mut rng = rand::thread_rng();
        let mut vulnerabilities = Vec::new();

        for (task, readings) in sensor_data.tasks() {
            let Some(fatigue) = readings.get("operator_fatigue").copied() else {
                continue;
            };
            if !(0.0..=1.0).contains(&fatigue) {
                return Err(ProcGapError::AnalyzerFailed {
                    analyzer: self.name().to_string(),
                    reason: format!("operator_fatigue for '{task}' out of range: {fatigue}"),
                });
            }

            // A derived estimate, not a sensor reading: cap at 1.0 instead
            // of rejecting.
            let adjusted = (self.base_rate(task) * (1.0 + fatigue)).min(1.0);

            let vulnerability = Vulnerability::new(
                format!("HRA_{task}"),
                FactorType::Human,
                adjusted,
                HUMAN_ERROR_SEVERITY,
                format!("Human error in {task}"),
            )?
            .with_location(rng.gen::<f64>(), rng.gen::<f64>())?;

            vulnerabilities.push(vulnerability);
        }

        Ok(vulnerabilities)
    }
}
