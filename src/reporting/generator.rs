use crate::models::{FactorType, RiskReport, Vulnerability};
use crate::risk::SystemState;
use chrono::Utc;
use std::cmp::Ordering;

/// How many vulnerabilities a report ranks and recommends against.
pub const TOP_VULNERABILITY_COUNT: usize = 5;

/// Ranks vulnerabilities by `probability x severity` and emits one textual
/// recommendation per top entry.
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Pure with respect to the input apart from capturing the current time:
    /// the same vulnerability list always yields the same ranking and
    /// recommendations. Ties keep input order (stable sort).
    pub fn generate_report(&self, vulnerabilities: &[Vulnerability]) -> RiskReport {
        let mut ranked = vulnerabilities.to_vec();
        ranked.sort_by(|a, b| {
            b.risk_weight()
                .partial_cmp(&a.risk_weight())
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(TOP_VULNERABILITY_COUNT);

        let recommendations = ranked.iter().map(Self::recommendation_for).collect();

        RiskReport {
            timestamp: Utc::now(),
            top_vulnerabilities: ranked,
            recommendations,
            active_vulnerability_count: vulnerabilities.len(),
            risk_score: None,
        }
    }

    /// Report over the state's active vulnerability set, carrying the
    /// recorded risk score.
    pub fn generate_system_report(&self, state: &SystemState) -> RiskReport {
        self.generate_report(state.active_vulnerabilities())
            .with_risk_score(state.current_risk_score())
    }

    fn recommendation_for(vulnerability: &Vulnerability) -> String {
        match vulnerability.factor_type {
            FactorType::Human => format!("Increase training on {}", vulnerability.description),
            FactorType::Machine | FactorType::Environmental => {
                format!("Check system reliability for {}", vulnerability.description)
            }
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
