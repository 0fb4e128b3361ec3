//! Snapshot serialization — full desk state to/from JSON.
//!
//! A snapshot captures everything needed to rebuild the desk: roster edits,
//! ad-hoc providers, assignments and the desk inputs. Where it is stored is
//! the caller's business.

use crate::{
    assignment::ShiftAssignments,
    clock::TimeOfDay,
    error::DeskResult,
    roster::Provider,
    schedule::ShiftType,
    types::LobbyCount,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeskSnapshot {
    #[serde(default)]
    pub shift_type:        ShiftType,
    #[serde(default)]
    pub providers:         Vec<Provider>,
    #[serde(default)]
    pub assignments:       ShiftAssignments,
    #[serde(default)]
    pub patients_in_lobby: LobbyCount,
    #[serde(default)]
    pub current_time:      Option<TimeOfDay>,
}

impl DeskSnapshot {
    pub fn to_json(&self) -> DeskResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DeskResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
