use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcGapError {
    #[error("Invalid vulnerability data: {field} = {value} (expected a finite value in [0,1])")]
    InvalidVulnerabilityData { field: &'static str, value: f64 },

    #[error("Invalid layer weight: {0} (expected a finite value >= 0)")]
    InvalidLayerWeight(f64),

    #[error("Analyzer '{analyzer}' failed: {reason}")]
    AnalyzerFailed { analyzer: String, reason: String },

    #[error("All analyzers failed - analysis cycle aborted")]
    AllAnalyzersFailed,

    #[error("No input provided - empty stdin")]
    NoInput,

    #[error("Invalid sensor data: {0}")]
    InvalidSensorData(String),

    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Edge not found: {id}")]
    EdgeNotFound { id: String },

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
