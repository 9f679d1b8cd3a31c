use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub inflow_rate: f32,
    pub time_scale: f32,
    pub truck_ratio: f32,
    pub is_paused: bool,
    pub road_length: f32,
    pub politeness: f32,
    pub safe_time_gap: f32,
    pub max_accel: f32,
    pub acceleration_noise: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            inflow_rate: 1000.0,
            time_scale: 1.0,
            truck_ratio: 0.1,
            is_paused: false,
            road_length: 5000.0,
            politeness: 0.2,
            safe_time_gap: 1.5,
            max_accel: 1.5,
            acceleration_noise: 0.0,
        }
    }
}

impl SimulationConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SimulationConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        if !(500.0..=3000.0).contains(&self.inflow_rate) {
            return Err(anyhow!(
                "inflow_rate must be within 500-3000 veh/h, got {}",
                self.inflow_rate
            ));
        }
        if !(0.1..=5.0).contains(&self.time_scale) {
            return Err(anyhow!(
                "time_scale must be within 0.1-5.0, got {}",
                self.time_scale
            ));
        }
        if !(0.0..=0.4).contains(&self.truck_ratio) {
            return Err(anyhow!(
                "truck_ratio must be within 0.0-0.4, got {}",
                self.truck_ratio
            ));
        }
        if self.road_length <= 0.0 {
            return Err(anyhow!(
                "road_length must be positive, got {}",
                self.road_length
            ));
        }
        if !(0.0..=1.0).contains(&self.politeness) {
            return Err(anyhow!(
                "politeness must be within 0.0-1.0, got {}",
                self.politeness
            ));
        }
        if !(0.5..=3.0).contains(&self.safe_time_gap) {
            return Err(anyhow!(
                "safe_time_gap must be within 0.5-3.0s, got {}",
                self.safe_time_gap
            ));
        }
        if self.max_accel <= 0.0 {
            return Err(anyhow!(
                "max_accel must be positive, got {}",
                self.max_accel
            ));
        }
        if !(0.0..=1.0).contains(&self.acceleration_noise) {
            return Err(anyhow!(
                "acceleration_noise must be within 0.0-1.0, got {}",
                self.acceleration_noise
            ));
        }
        Ok(())
    }
}
