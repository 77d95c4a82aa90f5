pub mod analyzer;
pub mod cli;
pub mod error;
pub mod models;
pub mod reporting;
pub mod risk;
pub mod store;
pub mod telemetry;

pub use error::ProcGapError;

// Re-export commonly used types
pub use analyzer::{AnalysisOutcome, AnalysisPipeline, Analyzer, ErgonomicAnalyzer, TherpAnalyzer};
pub use models::{FactorType, Layer, RiskReport, SensorData, Vulnerability};
pub use reporting::{HistoricalData, ReportGenerator};
pub use risk::{PropagationPath, RiskModel, SystemState};
pub use store::{FailureTree, FailureTreeStore};

pub use cli::CliHandler;
