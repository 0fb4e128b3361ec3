//! Desk events — what each command actually changed.
//!
//! The engine returns these from apply() so renderers and logs can react
//! without diffing state.

use crate::{
    capacity::CapacityState,
    clock::TimeOfDay,
    schedule::{ShiftSlot, ShiftType},
    types::{LobbyCount, ProviderId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeskEvent {
    // ── Roster events ──────────────────────────────
    ProviderAdded {
        provider_id: ProviderId,
    },
    ProviderRenamed {
        provider_id: ProviderId,
        name:        String,
    },
    ProviderRateChanged {
        provider_id:       ProviderId,
        patients_per_hour: f64,
    },
    ProviderLocked {
        provider_id: ProviderId,
    },
    ProviderUnlocked {
        provider_id: ProviderId,
    },
    ProviderDeleted {
        provider_id: ProviderId,
        purged_from: Vec<ShiftSlot>,
    },

    // ── Assignment events ──────────────────────────
    ProviderAssigned {
        slot:         ShiftSlot,
        provider_id:  ProviderId,
        evicted_from: Vec<ShiftSlot>,
    },
    ProviderUnassigned {
        slot:        ShiftSlot,
        provider_id: ProviderId,
    },
    ShiftsCleared,

    // ── Desk input events ──────────────────────────
    TimeSet {
        time: TimeOfDay,
    },
    TimeCleared,
    LobbyUpdated {
        count: LobbyCount,
    },
    ShiftTypeChanged {
        shift_type: ShiftType,
    },

    // ── Projection ─────────────────────────────────
    /// Emitted after every command while a time is set.
    CapacityRecomputed {
        value: Option<i64>,
        state: CapacityState,
    },
}

impl DeskEvent {
    /// Stable name, used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ProviderAdded { .. }       => "provider_added",
            Self::ProviderRenamed { .. }     => "provider_renamed",
            Self::ProviderRateChanged { .. } => "provider_rate_changed",
            Self::ProviderLocked { .. }      => "provider_locked",
            Self::ProviderUnlocked { .. }    => "provider_unlocked",
            Self::ProviderDeleted { .. }     => "provider_deleted",
            Self::ProviderAssigned { .. }    => "provider_assigned",
            Self::ProviderUnassigned { .. }  => "provider_unassigned",
            Self::ShiftsCleared              => "shifts_cleared",
            Self::TimeSet { .. }             => "time_set",
            Self::TimeCleared                => "time_cleared",
            Self::LobbyUpdated { .. }        => "lobby_updated",
            Self::ShiftTypeChanged { .. }    => "shift_type_changed",
            Self::CapacityRecomputed { .. }  => "capacity_recomputed",
        }
    }
}
