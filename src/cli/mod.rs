pub mod args;
pub mod reporter;

pub use args::{Cli, OutputFormat};
pub use reporter::ReportFormatter;

use crate::analyzer::{AnalysisPipeline, ErgonomicAnalyzer, TherpAnalyzer};
use crate::error::ProcGapError;
use crate::models::SensorData;
use crate::reporting::{HistoricalData, ReportGenerator};
use crate::risk::{RiskModel, SystemState};
use crate::store::FailureTreeStore;
use crate::telemetry;
use std::io::{self, Read};
use tracing::{debug, info};

pub struct CliHandler {
    cli: Cli,
}

impl CliHandler {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn run(&self) -> Result<i32, ProcGapError> {
        let sensor_data = self.acquire_sensor_data()?;
        debug!(tasks = sensor_data.len(), "sensor data acquired");

        let pipeline = self.build_pipeline()?;

        let mut state = SystemState::new();
        let outcome = pipeline.run(&mut state, sensor_data)?;

        info!(
            vulnerabilities = outcome.vulnerabilities.len(),
            paths = outcome.propagation_paths.len(),
            risk_score = outcome.risk_score,
            analyzers_skipped = outcome.analyzers_skipped,
            "analysis cycle finished"
        );

        let report = ReportGenerator::new().generate_system_report(&state);

        match self.cli.output_format()? {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                let formatter = ReportFormatter::new(&self.cli);
                println!("{}", formatter.format_risk_report(&report));
            }
        }

        Ok(0)
    }

    fn acquire_sensor_data(&self) -> Result<SensorData, ProcGapError> {
        if self.cli.live {
            let feed = telemetry::generate_live_feed();
            info!(
                shift = %feed.system_states.shift,
                risk_level = feed.current_risk.level,
                status = feed.current_risk.status.as_str(),
                "generated live telemetry sample"
            );
            return Ok(feed.to_sensor_data());
        }

        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;

        if buffer.trim().is_empty() {
            return Err(ProcGapError::NoInput);
        }

        SensorData::from_json(&buffer)
    }

    fn build_pipeline(&self) -> Result<AnalysisPipeline, ProcGapError> {
        let risk_model = RiskModel::new().with_threshold(self.cli.threshold);

        let mut pipeline = AnalysisPipeline::new(risk_model)
            .with_analyzer(Box::new(TherpAnalyzer::with_default_database()))
            .with_analyzer(Box::new(ErgonomicAnalyzer::new()));

        if let Some(path) = &self.cli.data_file {
            let store = FailureTreeStore::open(path)?;
            let historical = HistoricalData::from_failure_tree(store.tree());
            if historical.is_empty() {
                debug!(path = %path.display(), "failure tree carries no historical error rates");
            }
            pipeline = pipeline.with_historical_data(historical);
        }

        Ok(pipeline)
    }
}
