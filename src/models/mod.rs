pub mod layer;
pub mod report;
pub mod sensor;
pub mod vulnerability;

pub use layer::Layer;
pub use report::RiskReport;
pub use sensor::{SensorData, SensorReadings};
pub use vulnerability::{FactorType, Vulnerability};
