pub mod generator;
pub mod historical;

pub use generator::{ReportGenerator, TOP_VULNERABILITY_COUNT};
pub use historical::HistoricalData;
