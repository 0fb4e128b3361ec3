//! Provider throughput — remaining hours to remaining patients.
//!
//! The closing hour is never billed at the provider's rate. A provider always
//! has room for exactly `last_hour_floor` patients in their final hour, and a
//! fractional final hour still earns the whole floor.

use crate::types::DecimalHours;
use serde::{Deserialize, Serialize};

/// Baseline last-hour floor.
pub const DEFAULT_LAST_HOUR_FLOOR: f64 = 2.0;

/// Floor observed in one deployment. Pending product confirmation.
pub const ALTERNATE_LAST_HOUR_FLOOR: f64 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputModel {
    pub last_hour_floor: f64,
}

impl Default for ThroughputModel {
    fn default() -> Self {
        Self { last_hour_floor: DEFAULT_LAST_HOUR_FLOOR }
    }
}

impl ThroughputModel {
    pub fn new(last_hour_floor: f64) -> Self {
        Self { last_hour_floor }
    }

    /// Patients a provider at `patients_per_hour` can still see with
    /// `remaining_hours` left.
    pub fn remaining_patients(&self, patients_per_hour: f64, remaining_hours: DecimalHours) -> f64 {
        if remaining_hours <= 0.0 {
            return 0.0;
        }
        if remaining_hours < 1.0 {
            return self.last_hour_floor;
        }
        let hours_before_last = remaining_hours - 1.0;
        hours_before_last * patients_per_hour + self.last_hour_floor
    }
}
