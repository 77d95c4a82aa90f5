use crate::error::ProcGapError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named readings for one sensor or task, e.g. `operator_fatigue -> 0.3`.
pub type SensorReadings = BTreeMap<String, f64>;

/// Snapshot of raw sensor data keyed by task name. Ordered map so analyzer
/// output order is deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorData(BTreeMap<String, SensorReadings>);

impl SensorData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(input: &str) -> Result<Self, ProcGapError> {
        serde_json::from_str(input).map_err(|e| ProcGapError::InvalidSensorData(e.to_string()))
    }

    pub fn insert(&mut self, task: impl Into<String>, readings: SensorReadings) {
        self.0.insert(task.into(), readings);
    }

    pub fn with_reading(mut self, task: &str, name: &str, value: f64) -> Self {
        self.0
            .entry(task.to_string())
            .or_default()
            .insert(name.to_string(), value);
        self
    }

    /// Merge semantics: incoming task keys overwrite, all others are retained.
    pub fn merge(&mut self, incoming: SensorData) {
        for (task, readings) in incoming.0 {
            self.0.insert(task, readings);
        }
    }

    pub fn get(&self, task: &str) -> Option<&SensorReadings> {
        self.0.get(task)
    }

    pub fn reading(&self, task: &str, name: &str) -> Option<f64> {
        self.0.get(task).and_then(|r| r.get(name)).copied()
    }

    pub fn tasks(&self) -> impl Iterator<Item = (&String, &SensorReadings)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_retains_other_tasks() {
        let mut data = SensorData::new().with_reading("a", "value", 1.0);
        data.merge(SensorData::new().with_reading("b", "value", 2.0));

        assert_eq!(data.len(), 2);
        assert_eq!(data.reading("a", "value"), Some(1.0));
        assert_eq!(data.reading("b", "value"), Some(2.0));
    }

    #[test]
    fn test_merge_overwrites_matching_task() {
        let mut data = SensorData::new()
            .with_reading("pump", "pressure", 1.0)
            .with_reading("pump", "flow", 0.5);

        data.merge(SensorData::new().with_reading("pump", "pressure", 3.0));

        // The whole readings map for the task is replaced, not merged per key.
        assert_eq!(data.reading("pump", "pressure"), Some(3.0));
        assert_eq!(data.reading("pump", "flow"), None);
    }

    #[test]
    fn test_from_json() {
        let data =
            SensorData::from_json(r#"{"control_panel": {"operator_fatigue": 0.3, "noise_level": 65.0}}"#)
                .unwrap();

        assert_eq!(data.reading("control_panel", "operator_fatigue"), Some(0.3));
        assert_eq!(data.reading("control_panel", "noise_level"), Some(65.0));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = SensorData::from_json(r#"{"task": "not a map"}"#);
        assert!(matches!(result, Err(ProcGapError::InvalidSensorData(_))));
    }

    #[test]
    fn test_task_iteration_is_ordered() {
        let data = SensorData::new()
            .with_reading("zeta", "x", 1.0)
            .with_reading("alpha", "x", 1.0);

        let names: Vec<&String> = data.tasks().map(|(name, _)| name).collect();
        assert_eq!(names, ["alpha", "zeta"]);
    }
}
