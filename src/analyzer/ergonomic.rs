use crate::analyzer::Analyzer;
use crate::error::ProcGapError;
use crate::models::{FactorType, SensorData, Vulnerability};
use rand::Rng;

/// Ergonomic and system-load analyzer: flat threshold checks over workplace
/// and machine readings, one vulnerability per exceeded limit.
pub struct ErgonomicAnalyzer {
    noise_limit_db: f64,
    comfort_range_celsius: (f64, f64),
    workload_limit: f64,
    utilization_limit_percent: f64,
}

impl ErgonomicAnalyzer {
    pub fn new() -> Self {
        Self {
            noise_limit_db: 70.0,
            comfort_range_celsius: (18.0, 27.0),
            workload_limit: 0.8,
            utilization_limit_percent: 85.0,
        }
    }

    pub fn with_noise_limit(mut self, db: f64) -> Self {
        self.noise_limit_db = db;
        self
    }

    pub fn with_workload_limit(mut self, limit: f64) -> Self {
        self.workload_limit = limit;
        self
    }

    /// Maps an exceedance above a limit onto [0,1], saturating at `span`
    /// units past the limit.
    fn scaled_excess(value: f64, limit: f64, span: f64) -> f64 {
        ((value - limit) / span).clamp(0.0, 1.0)
    }
}

impl Default for ErgonomicAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for ErgonomicAnalyzer {
    fn name(&self) -> &str {
        "ergonomic"
    }

    fn produce(&self, sensor_data: &SensorData) -> Result<Vec<Vulnerability>, ProcGapError> {
        let mut rng = rand::thread_rng();
        let mut vulnerabilities = Vec::new();

        for (task, readings) in sensor_data.tasks() {
            if let Some(noise) = readings.get("noise_level").copied() {
                if noise > self.noise_limit_db {
                    vulnerabilities.push(
                        Vulnerability::new(
                            format!("ERG_{task}_noise"),
                            FactorType::Environmental,
                            Self::scaled_excess(noise, self.noise_limit_db, 50.0),
                            0.5,
                            format!("Excessive noise during {task}"),
                        )?
                        .with_location(rng.gen::<f64>(), rng.gen::<f64>())?,
                    );
                }
            }

            if let Some(temperature) = readings.get("temperature").copied() {
                let (low, high) = self.comfort_range_celsius;
                if temperature < low || temperature > high {
                    let deviation = if temperature < low {
                        low - temperature
                    } else {
                        temperature - high
                    };
                    vulnerabilities.push(
                        Vulnerability::new(
                            format!("ERG_{task}_temperature"),
                            FactorType::Environmental,
                            (deviation / 15.0).clamp(0.0, 1.0),
                            0.4,
                            format!("Temperature out of comfort range during {task}"),
                        )?
                        .with_location(rng.gen::<f64>(), rng.gen::<f64>())?,
                    );
                }
            }

            if let Some(workload) = readings.get("workload").copied() {
                if workload > self.workload_limit {
                    vulnerabilities.push(
                        Vulnerability::new(
                            format!("ERG_{task}_workload"),
                            FactorType::Human,
                            workload.clamp(0.0, 1.0),
                            0.6,
                            format!("Operator overload during {task}"),
                        )?
                        .with_location(rng.gen::<f64>(), rng.gen::<f64>())?,
                    );
                }
            }

            for (reading, label) in [
                ("cpu_utilization", "CPU"),
                ("memory_utilization", "memory"),
            ] {
                if let Some(utilization) = readings.get(reading).copied() {
                    if utilization > self.utilization_limit_percent {
                        vulnerabilities.push(
                            Vulnerability::new(
                                format!("SYS_{task}_{reading}"),
                                FactorType::Machine,
                                (utilization / 100.0).clamp(0.0, 1.0),
                                0.5,
                                format!("High {label} utilization for {task}"),
                            )?
                            .with_location(rng.gen::<f64>(), rng.gen::<f64>())?,
                        );
                    }
                }
            }
        }

        Ok(vulnerabilities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_comfortable_workspace_is_clean() {
        let analyzer = ErgonomicAnalyzer::new();
        let data = SensorData::new()
            .with_reading("ward", "noise_level", 55.0)
            .with_reading("ward", "temperature", 22.0)
            .with_reading("ward", "workload", 0.4);

        assert!(analyzer.produce(&data).unwrap().is_empty());
    }

    #[test]
    fn test_excessive_noise_is_environmental() {
        let analyzer = ErgonomicAnalyzer::new();
        let data = SensorData::new().with_reading("ward", "noise_level", 95.0);

        let vulns = analyzer.produce(&data).unwrap();

        assert_eq!(vulns.len(), 1);
        assert_eq!(vulns[0].id, "ERG_ward_noise");
        assert_eq!(vulns[0].factor_type, FactorType::Environmental);
        assert!((vulns[0].probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cold_workspace_flags_temperature() {
        let analyzer = ErgonomicAnalyzer::new();
        let data = SensorData::new().with_reading("ward", "temperature", 10.5);

        let vulns = analyzer.produce(&data).unwrap();

        assert_eq!(vulns.len(), 1);
        assert_eq!(vulns[0].id, "ERG_ward_temperature");
        assert!((vulns[0].probability - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_overload_is_a_human_factor() {
        let analyzer = ErgonomicAnalyzer::new();
        let data = SensorData::new().with_reading("triage", "workload", 0.9);

        let vulns = analyzer.produce(&data).unwrap();

        assert_eq!(vulns.len(), 1);
        assert_eq!(vulns[0].factor_type, FactorType::Human);
        assert_eq!(vulns[0].probability, 0.9);
    }

    #[test]
    fn test_high_utilization_is_a_machine_factor() {
        let analyzer = ErgonomicAnalyzer::new();
        let data = SensorData::new()
            .with_reading("server", "cpu_utilization", 92.0)
            .with_reading("server", "memory_utilization", 40.0);

        let vulns = analyzer.produce(&data).unwrap();

        assert_eq!(vulns.len(), 1);
        assert_eq!(vulns[0].id, "SYS_server_cpu_utilization");
        assert_eq!(vulns[0].factor_type, FactorType::Machine);
        assert!((vulns[0].probability - 0.92).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_saturate_at_one() {
        let analyzer = ErgonomicAnalyzer::new();
        let data = SensorData::new()
            .with_reading("ward", "noise_level", 500.0)
            .with_reading("ward", "temperature", -60.0);

        let vulns = analyzer.produce(&data).unwrap();

        assert_eq!(vulns.len(), 2);
        assert!(vulns.iter().all(|v| v.probability == 1.0));
    }
}
