use crate::{
    schedule::{ShiftSlot, ShiftType},
    types::{LobbyCount, ProviderId},
};
use serde::{Deserialize, Serialize};

/// All staff-issued commands.
/// Every command is a mutation; the engine recomputes capacity after each one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DeskCommand {
    // ── Roster ────────────────────────────────────
    AddProvider,
    RenameProvider {
        provider_id: ProviderId,
        name:        String,
    },
    SetProviderRate {
        provider_id:       ProviderId,
        patients_per_hour: f64,
    },
    LockProvider { provider_id: ProviderId },
    UnlockProvider { provider_id: ProviderId },
    DeleteProvider { provider_id: ProviderId },

    // ── Assignments ───────────────────────────────
    AssignProvider {
        slot:        ShiftSlot,
        provider_id: ProviderId,
    },
    UnassignProvider {
        slot:        ShiftSlot,
        provider_id: ProviderId,
    },
    ClearAllShifts,

    // ── Desk inputs ───────────────────────────────
    /// `time` is "HH:MM" on a 24-hour clock.
    SetTime { time: String },
    SetTimeNow,
    ClearTime,
    SetLobby { count: LobbyCount },
    SetShiftType { shift_type: ShiftType },
}

impl DeskCommand {
    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddProvider           => "add_provider",
            Self::RenameProvider { .. } => "rename_provider",
            Self::SetProviderRate { .. }=> "set_provider_rate",
            Self::LockProvider { .. }   => "lock_provider",
            Self::UnlockProvider { .. } => "unlock_provider",
            Self::DeleteProvider { .. } => "delete_provider",
            Self::AssignProvider { .. } => "assign_provider",
            Self::UnassignProvider { .. } => "unassign_provider",
            Self::ClearAllShifts        => "clear_all_shifts",
            Self::SetTime { .. }        => "set_time",
            Self::SetTimeNow            => "set_time_now",
            Self::ClearTime             => "clear_time",
            Self::SetLobby { .. }       => "set_lobby",
            Self::SetShiftType { .. }   => "set_shift_type",
        }
    }
}
