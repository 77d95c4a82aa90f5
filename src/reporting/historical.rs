use crate::error::ProcGapError;
use crate::models::Vulnerability;
use crate::store::FailureTree;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct HistoryRecord {
    #[serde(rename = "errorRate")]
    error_rate: f64,
}

/// Static table of historical error rates keyed by vulnerability id. Used to
/// floor analyzer-estimated probabilities at what the record shows actually
/// happened. The table is read-only; it is never updated from live data.
#[derive(Debug, Clone, Default)]
pub struct HistoricalData {
    error_rates: BTreeMap<String, f64>,
}

impl HistoricalData {
    pub fn from_rates(error_rates: BTreeMap<String, f64>) -> Self {
        let error_rates = error_rates
            .into_iter()
            .filter(|(id, rate)| {
                let valid = rate.is_finite() && (0.0..=1.0).contains(rate);
                if !valid {
                    warn!(id = %id, rate = *rate, "discarding historical rate outside [0,1]");
                }
                valid
            })
            .collect();
        Self { error_rates }
    }

    /// Loads a JSON document of the form `{"<id>": {"errorRate": 0.2}, ...}`.
    pub fn load(path: &Path) -> Result<Self, ProcGapError> {
        let raw = fs::read_to_string(path)?;
        let records: BTreeMap<String, HistoryRecord> = serde_json::from_str(&raw)?;

        Ok(Self::from_rates(
            records
                .into_iter()
                .map(|(id, record)| (id, record.error_rate))
                .collect(),
        ))
    }

    /// Builds the table from a failure tree's node `errorRate` fields.
    pub fn from_failure_tree(tree: &FailureTree) -> Self {
        let rates = tree
            .nodes
            .iter()
            .filter_map(|node| {
                node.fields
                    .get("errorRate")
                    .and_then(|value| value.as_f64())
                    .map(|rate| (node.id.clone(), rate))
            })
            .collect();
        Self::from_rates(rates)
    }

    pub fn is_empty(&self) -> bool {
        self.error_rates.is_empty()
    }

    pub fn rate_for(&self, id: &str) -> Option<f64> {
        self.error_rates.get(id).copied()
    }

    /// Raises each vulnerability's probability to its historical error rate
    /// when the record is worse than the estimate. Never lowers anything.
    pub fn refine(&self, vulnerabilities: &mut [Vulnerability]) {
        for vulnerability in vulnerabilities {
            if let Some(rate) = self.rate_for(&vulnerability.id) {
                vulnerability.probability = vulnerability.probability.max(rate);
            }
        }
    }
}
