use crate::models::{SensorData, SensorReadings};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

impl RiskBand {
    /// Bands a [0,1] risk ratio: High above 0.75, Moderate above 0.5.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > 0.75 {
            RiskBand::High
        } else if ratio > 0.5 {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Moderate => "Moderate",
            RiskBand::High => "High",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftInfo {
    pub time: DateTime<Utc>,
    pub shift: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiometricData {
    pub heart_rate: u32,
    pub fatigue: f64,
    pub stress: f64,
    pub workload: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelInfo {
    pub nurse_to_patient_ratio: f64,
    pub waiting_room_occupancy: u32,
    pub beds_occupied: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftwareLoad {
    pub cpu_utilization: u32,
    pub memory_utilization: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareLoad {
    pub disk_io: f64,
    pub network_bandwidth: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskStatus {
    pub level: f64,
    pub status: RiskBand,
}

/// One randomly generated sample of "live" ward telemetry, for driving the
/// pipeline without a real sensor feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveFeed {
    pub system_states: ShiftInfo,
    pub biometric_data: BiometricData,
    pub personnel_info: PersonnelInfo,
    pub software_values: SoftwareLoad,
    pub hardware_load: HardwareLoad,
    pub current_risk: RiskStatus,
}

pub fn generate_live_feed() -> LiveFeed {
    let mut rng = rand::thread_rng();

    let shifts = ["First Shift", "Second Shift", "Third Shift"];
    let shift = shifts[rng.gen_range(0..shifts.len())].to_string();

    let biometric_data = BiometricData {
        heart_rate: rng.gen_range(60..=100),
        fatigue: rng.gen_range(0.0..=1.0),
        stress: rng.gen_range(0.0..=1.0),
        workload: rng.gen_range(0.0..=1.0),
    };

    let consolidated = biometric_data
        .fatigue
        .max(biometric_data.stress)
        .max(biometric_data.workload);

    LiveFeed {
        system_states: ShiftInfo {
            time: Utc::now(),
            shift,
        },
        personnel_info: PersonnelInfo {
            nurse_to_patient_ratio: (rng.gen_range(1.5..=4.0_f64) * 10.0).round() / 10.0,
            waiting_room_occupancy: rng.gen_range(0..=100),
            beds_occupied: rng.gen_range(0..=100),
        },
        software_values: SoftwareLoad {
            cpu_utilization: rng.gen_range(10..=90),
            memory_utilization: rng.gen_range(10..=90),
        },
        hardware_load: HardwareLoad {
            disk_io: (rng.gen_range(10.0..=90.0_f64) * 10.0).round() / 10.0,
            network_bandwidth: (rng.gen_range(10.0..=90.0_f64) * 10.0).round() / 10.0,
        },
        current_risk: RiskStatus {
            level: (consolidated * 1000.0).round() / 10.0,
            status: RiskBand::from_ratio(consolidated),
        },
        biometric_data,
    }
}

impl LiveFeed {
    /// Flattens the feed into pipeline input: biometrics become operator
    /// readings, machine figures become system-load readings.
    pub fn to_sensor_data(&self) -> SensorData {
        let mut data = SensorData::new();

        let mut biometrics = SensorReadings::new();
        biometrics.insert("heart_rate".to_string(), self.biometric_data.heart_rate as f64);
        biometrics.insert("operator_fatigue".to_string(), self.biometric_data.fatigue);
        biometrics.insert("stress".to_string(), self.biometric_data.stress);
        biometrics.insert("workload".to_string(), self.biometric_data.workload);
        data.insert("ward_operations", biometrics);

        let mut system_load = SensorReadings::new();
        system_load.insert(
            "cpu_utilization".to_string(),
            self.software_values.cpu_utilization as f64,
        );
        system_load.insert(
            "memory_utilization".to_string(),
            self.software_values.memory_utilization as f64,
        );
        system_load.insert("disk_io".to_string(), self.hardware_load.disk_io);
        system_load.insert(
            "network_bandwidth".to_string(),
            self.hardware_load.network_bandwidth,
        );
        data.insert("system_load", system_load);

        let mut personnel = SensorReadings::new();
        personnel.insert(
            "nurse_to_patient_ratio".to_string(),
            self.personnel_info.nurse_to_patient_ratio,
        );
        personnel.insert(
            "waiting_room_occupancy".to_string(),
            self.personnel_info.waiting_room_occupancy as f64,
        );
        personnel.insert(
            "beds_occupied".to_string(),
            self.personnel_info.beds_occupied as f64,
        );
        data.insert("personnel", personnel);

        data
    }
}
