pub mod ergonomic;
pub mod pipeline;
pub mod therp;

pub use ergonomic::ErgonomicAnalyzer;
pub use pipeline::{AnalysisOutcome, AnalysisPipeline};
pub use therp::TherpAnalyzer;

use crate::error::ProcGapError;
use crate::models::{SensorData, Vulnerability};

/// One capability per analysis role: turn raw sensor readings into a list of
/// vulnerabilities. Variants are interchangeable behind this trait and are
/// selected at pipeline-setup time; the pipeline never branches on the
/// concrete analyzer.
pub trait Analyzer {
    fn name(&self) -> &str;

    fn produce(&self, sensor_data: &SensorData) -> Result<Vec<Vulnerability>, ProcGapError>;
}
