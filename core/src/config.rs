use crate::{
    error::{DeskError, DeskResult},
    schedule::ShiftType,
    throughput::{ThroughputModel, DEFAULT_LAST_HOUR_FLOOR},
    types::ProviderId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CONFIG_FILE: &str = "desk_config.json";

/// A provider preloaded into every roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseProviderConfig {
    pub id: ProviderId,
    pub name: String,
    pub patients_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Patients credited for a provider's final hour, whatever their rate.
    #[serde(default = "default_floor")]
    pub last_hour_floor: f64,
    #[serde(default)]
    pub default_shift_type: ShiftType,
    /// House roster, in display order.
    #[serde(default)]
    pub house_providers: Vec<HouseProviderConfig>,
}

fn default_floor() -> f64 {
    DEFAULT_LAST_HOUR_FLOOR
}

impl Default for DeskConfig {
    /// Baseline deployment: floor 2.0 and the standing house roster.
    fn default() -> Self {
        let house = [
            (1, "Ryan", 2.0),
            (2, "Kristy", 1.8),
            (3, "Mikaela", 2.0),
            (4, "Dan", 1.8),
            (5, "Johny", 1.9),
            (6, "Nicole", 2.2),
            (7, "Lauren", 2.0),
        ];
        Self {
            last_hour_floor: DEFAULT_LAST_HOUR_FLOOR,
            default_shift_type: ShiftType::Standard,
            house_providers: house
                .into_iter()
                .map(|(id, name, rate)| HouseProviderConfig {
                    id,
                    name: name.into(),
                    patients_per_hour: rate,
                })
                .collect(),
        }
    }
}

impl DeskConfig {
    /// Load from `{data_dir}/desk_config.json`.
    /// In tests, use DeskConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: DeskConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        log::info!(
            "config: loaded {path} (floor={}, {} house providers)",
            config.last_hour_floor,
            config.house_providers.len()
        );
        Ok(config)
    }

    /// Like load(), but a missing file falls back to the baseline.
    pub fn load_or_default(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/{CONFIG_FILE}");
        if std::path::Path::new(&path).exists() {
            Self::load(data_dir)
        } else {
            log::warn!("config: {path} not found, using baseline config");
            Ok(Self::default())
        }
    }

    /// Config with hardcoded defaults for use in unit tests.
    pub fn default_test() -> Self {
        Self {
            last_hour_floor: DEFAULT_LAST_HOUR_FLOOR,
            default_shift_type: ShiftType::Standard,
            house_providers: vec![
                HouseProviderConfig { id: 1, name: "Avery".into(), patients_per_hour: 2.0 },
                HouseProviderConfig { id: 2, name: "Blake".into(), patients_per_hour: 1.8 },
            ],
        }
    }

    pub fn validate(&self) -> DeskResult<()> {
        if !self.last_hour_floor.is_finite() || self.last_hour_floor < 0.0 {
            return Err(DeskError::InvalidConfig(format!(
                "last_hour_floor must be a non-negative number, got {}",
                self.last_hour_floor
            )));
        }
        let mut ids = HashSet::new();
        for house in &self.house_providers {
            if !ids.insert(house.id) {
                return Err(DeskError::InvalidConfig(format!(
                    "duplicate house provider id {}",
                    house.id
                )));
            }
            if house.name.trim().is_empty() {
                return Err(DeskError::InvalidConfig(format!(
                    "house provider {} has an empty name",
                    house.id
                )));
            }
            // house providers load locked, so they must be lockable
            if !house.patients_per_hour.is_finite() || house.patients_per_hour <= 0.0 {
                return Err(DeskError::InvalidConfig(format!(
                    "house provider '{}' has invalid rate {}",
                    house.name, house.patients_per_hour
                )));
            }
        }
        Ok(())
    }

    pub fn throughput_model(&self) -> ThroughputModel {
        ThroughputModel::new(self.last_hour_floor)
    }
}
