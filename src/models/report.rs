use crate::models::Vulnerability;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of the current risk picture: the highest-weighted vulnerabilities
/// and one recommendation per entry, in matching order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub timestamp: DateTime<Utc>,
    pub top_vulnerabilities: Vec<Vulnerability>,
    pub recommendations: Vec<String>,
    pub active_vulnerability_count: usize,
    pub risk_score: Option<f64>,
}

impl RiskReport {
    pub fn is_empty(&self) -> bool {
        self.top_vulnerabilities.is_empty()
    }

    pub fn with_risk_score(mut self, risk_score: f64) -> Self {
        self.risk_score = Some(risk_score);
        self
    }
}
