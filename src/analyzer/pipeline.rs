use crate::analyzer::Analyzer;
use crate::error::ProcGapError;
use crate::models::{SensorData, Vulnerability};
use crate::reporting::HistoricalData;
use crate::risk::{PropagationPath, RiskModel, SystemState};
use tracing::{debug, warn};

/// Result of one successful analysis cycle.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub vulnerabilities: Vec<Vulnerability>,
    pub propagation_paths: Vec<PropagationPath>,
    pub risk_score: f64,
    pub analyzers_run: usize,
    pub analyzers_skipped: usize,
}

/// Orchestrates one update cycle: analyzers -> optional historical
/// refinement -> risk model -> system state. Analyzers run in registration
/// order and their outputs are concatenated in that order.
pub struct AnalysisPipeline {
    analyzers: Vec<Box<dyn Analyzer>>,
    risk_model: RiskModel,
    historical: Option<HistoricalData>,
}

impl AnalysisPipeline {
    pub fn new(risk_model: RiskModel) -> Self {
        Self {
            analyzers: Vec::new(),
            risk_model,
            historical: None,
        }
    }

    pub fn with_analyzer(mut self, analyzer: Box<dyn Analyzer>) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn with_historical_data(mut self, historical: HistoricalData) -> Self {
        self.historical = Some(historical);
        self
    }

    pub fn analyzer_count(&self) -> usize {
        self.analyzers.len()
    }

    /// Runs one cycle against `state`. A failing analyzer is logged and
    /// skipped; the cycle continues with the remaining analyzers' output.
    /// Only when every analyzer fails does the cycle abort - and then
    /// `state` is left exactly as it was (no partial snapshot).
    pub fn run(
        &self,
        state: &mut SystemState,
        sensor_data: SensorData,
    ) -> Result<AnalysisOutcome, ProcGapError> {
        let mut vulnerabilities = Vec::new();
        let mut skipped = 0;

        for analyzer in &self.analyzers {
            match analyzer.produce(&sensor_data) {
                Ok(mut produced) => {
                    debug!(
                        analyzer = analyzer.name(),
                        count = produced.len(),
                        "analyzer produced vulnerabilities"
                    );
                    vulnerabilities.append(&mut produced);
                }
                Err(error) => {
                    warn!(
                        analyzer = analyzer.name(),
                        %error,
                        "analyzer failed, skipping its contribution"
                    );
                    skipped += 1;
                }
            }
        }

        if !self.analyzers.is_empty() && skipped == self.analyzers.len() {
            return Err(ProcGapError::AllAnalyzersFailed);
        }

        if let Some(historical) = &self.historical {
            historical.refine(&mut vulnerabilities);
        }

        let propagation_paths = self.risk_model.analyze_propagation(&vulnerabilities);
        let risk_score = self.risk_model.calculate_risk_score(&propagation_paths);

        // The cycle succeeded; apply the new snapshot in full.
        state.update(sensor_data);
        state.record_analysis(vulnerabilities.clone(), risk_score);

        debug!(
            vulnerabilities = vulnerabilities.len(),
            paths = propagation_paths.len(),
            risk_score,
            "analysis cycle complete"
        );

        Ok(AnalysisOutcome {
            vulnerabilities,
            propagation_paths,
            risk_score,
            analyzers_run: self.analyzers.len() - skipped,
            analyzers_skipped: skipped,
        })
    }
}
