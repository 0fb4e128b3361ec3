//! Capacity projection — the heart of the front desk.
//!
//! PIPELINE (fixed order):
//!   1. Closed check against the active shift type's latest close.
//!   2. Resolve each active slot's ids against the roster (stale ids dropped).
//!   3. Per provider: remaining hours → remaining patients, summed un-floored.
//!   4. No resolvable provider anywhere → NoProvidersAssigned.
//!   5. floor(total) - lobby → Computed(value, tier).
//!
//! RULES:
//!   - project() is a pure function of its arguments. It never reads the
//!     clock and never mutates the roster or assignments.
//!   - Breakdown lines show floor(remaining_patients); the total sums the
//!     un-floored values. The two do not always agree and must not be
//!     reconciled.
//!   - The caller never invokes project() without a time reading.

use crate::{
    assignment::ShiftAssignments,
    clock::TimeOfDay,
    hours::remaining_hours,
    roster::Roster,
    schedule::{ShiftSlot, ShiftType},
    throughput::ThroughputModel,
    types::{DecimalHours, LobbyCount, ProviderId},
};
use serde::{Deserialize, Serialize};

/// Everything a projection reads. Borrowed, never owned.
#[derive(Debug, Clone, Copy)]
pub struct CapacityInput<'a> {
    pub now:               TimeOfDay,
    pub shift_type:        ShiftType,
    pub roster:            &'a Roster,
    pub assignments:       &'a ShiftAssignments,
    pub patients_in_lobby: LobbyCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityTier {
    /// Already over capacity.
    Negative,
    /// 0 or 1 more patients.
    Critical,
    /// 2 to 4 more patients.
    Warning,
    /// 5 or more.
    Healthy,
}

impl CapacityTier {
    pub fn classify(value: i64) -> Self {
        match value {
            v if v < 0 => Self::Negative,
            0..=1      => Self::Critical,
            2..=4      => Self::Warning,
            _          => Self::Healthy,
        }
    }

    /// Style hook for renderers.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Negative => "capacity-negative",
            Self::Critical => "capacity-red",
            Self::Warning  => "capacity-yellow",
            Self::Healthy  => "capacity-green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CapacityState {
    Closed {
        latest_close: DecimalHours,
    },
    NoProvidersAssigned {
        value: i64,
    },
    Computed {
        value: i64,
        tier:  CapacityTier,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub provider_id:        ProviderId,
    pub provider_name:      String,
    pub slot:               ShiftSlot,
    pub shift_label:        String,
    pub remaining_hours:    DecimalHours,
    /// floor() of the provider's projected patients. Display only.
    pub remaining_patients: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    pub state:          CapacityState,
    pub breakdown:      Vec<BreakdownEntry>,
    /// Un-floored sum over every assigned provider. 0 when Closed or empty.
    pub total_capacity: f64,
}

impl CapacityResult {
    fn closed(latest_close: DecimalHours) -> Self {
        Self {
            state: CapacityState::Closed { latest_close },
            breakdown: Vec::new(),
            total_capacity: 0.0,
        }
    }

    /// The accept/pause number, if the clinic is open.
    pub fn value(&self) -> Option<i64> {
        match self.state {
            CapacityState::Closed { .. } => None,
            CapacityState::NoProvidersAssigned { value } => Some(value),
            CapacityState::Computed { value, .. } => Some(value),
        }
    }

    pub fn tier(&self) -> Option<CapacityTier> {
        match self.state {
            CapacityState::Computed { tier, .. } => Some(tier),
            _ => None,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, CapacityState::Closed { .. })
    }

    /// The lobby already holds more patients than the desk can absorb.
    pub fn is_over_capacity(&self) -> bool {
        self.value().is_some_and(|v| v < 0)
    }

    /// Providers are assigned but none has time left.
    pub fn all_shifts_completed(&self) -> bool {
        matches!(self.state, CapacityState::Computed { .. }) && self.breakdown.is_empty()
    }
}

/// Project remaining capacity for the current request.
pub fn project(input: &CapacityInput<'_>, model: &ThroughputModel) -> CapacityResult {
    let now = input.now.decimal_hours();
    let latest_close = input.shift_type.latest_close();

    if now >= latest_close {
        log::debug!("capacity: closed at {} (latest close {latest_close})", input.now);
        return CapacityResult::closed(latest_close);
    }

    let mut has_any_providers = false;
    let mut total_capacity = 0.0;
    let mut breakdown = Vec::new();

    for &slot in input.shift_type.slots() {
        let window = slot.window();
        let assigned = input
            .assignments
            .in_slot(slot)
            .iter()
            .filter_map(|&id| input.roster.get(id));

        for provider in assigned {
            has_any_providers = true;

            let hours = remaining_hours(input.now, window);
            let patients = model.remaining_patients(provider.patients_per_hour, hours);
            total_capacity += patients;

            if patients > 0.0 {
                breakdown.push(BreakdownEntry {
                    provider_id:        provider.id,
                    provider_name:      provider.display_name().to_string(),
                    slot,
                    shift_label:        slot.label().to_string(),
                    remaining_hours:    hours,
                    remaining_patients: patients.floor() as i64,
                });
            }
        }
    }

    let lobby = i64::from(input.patients_in_lobby);

    if !has_any_providers {
        log::debug!("capacity: no providers assigned, lobby={lobby}");
        return CapacityResult {
            state: CapacityState::NoProvidersAssigned { value: -lobby },
            breakdown: Vec::new(),
            total_capacity: 0.0,
        };
    }

    let rounded = total_capacity.floor() as i64;
    let value = rounded - lobby;
    let tier = CapacityTier::classify(value);

    log::debug!(
        "capacity: now={} type={} total={total_capacity:.2} rounded={rounded} lobby={lobby} value={value} tier={tier:?}",
        input.now,
        input.shift_type,
    );

    CapacityResult {
        state: CapacityState::Computed { value, tier },
        breakdown,
        total_capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(CapacityTier::classify(-1), CapacityTier::Negative);
        assert_eq!(CapacityTier::classify(0), CapacityTier::Critical);
        assert_eq!(CapacityTier::classify(1), CapacityTier::Critical);
        assert_eq!(CapacityTier::classify(2), CapacityTier::Warning);
        assert_eq!(CapacityTier::classify(4), CapacityTier::Warning);
        assert_eq!(CapacityTier::classify(5), CapacityTier::Healthy);
        assert_eq!(CapacityTier::classify(i64::MIN), CapacityTier::Negative);
    }

    #[test]
    fn state_serializes_with_tag() {
        let state = CapacityState::Computed { value: 3, tier: CapacityTier::Warning };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json["state"], "computed");
        assert_eq!(json["value"], 3);
        assert_eq!(json["tier"], "warning");
    }
}
