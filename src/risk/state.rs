use crate::models::{SensorData, Vulnerability};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutable snapshot of the running system: latest sensor data, the currently
/// active vulnerability set and the derived risk score. One instance per
/// process; all mutation goes through `&mut self`, so callers get
/// exclusive-writer discipline for free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemState {
    timestamp: DateTime<Utc>,
    sensor_data: SensorData,
    active_vulnerabilities: Vec<Vulnerability>,
    current_risk_score: f64,
}

impl SystemState {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            sensor_data: SensorData::new(),
            active_vulnerabilities: Vec::new(),
            current_risk_score: 0.0,
        }
    }

    /// Merges incoming readings into the retained sensor data (task keys
    /// overwritten, others kept) and refreshes the timestamp. Does not run
    /// any analysis; that is orchestrated by the pipeline.
    pub fn update(&mut self, sensor_data: SensorData) {
        self.timestamp = Utc::now();
        self.sensor_data.merge(sensor_data);
    }

    /// Replaces the active vulnerability set wholesale and records the score
    /// computed for it. Callers invoke this only after a cycle fully
    /// succeeds, so a failed cycle leaves the previous snapshot intact.
    pub fn record_analysis(&mut self, vulnerabilities: Vec<Vulnerability>, risk_score: f64) {
        self.active_vulnerabilities = vulnerabilities;
        self.current_risk_score = risk_score;
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn sensor_data(&self) -> &SensorData {
        &self.sensor_data
    }

    pub fn active_vulnerabilities(&self) -> &[Vulnerability] {
        &self.active_vulnerabilities
    }

    pub fn current_risk_score(&self) -> f64 {
        self.current_risk_score
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new()
    }
}
