//! The desk engine — owns the mutable desk state and drives the projection.
//!
//! EXECUTION ORDER for every command (fixed):
//!   1. Apply the mutation (roster edit, assignment, desk input).
//!   2. Normalize: reassignment evicts from other slots, deletion purges
//!      the provider from every slot.
//!   3. Recompute the whole projection from scratch, if a time is set.
//!
//! RULES:
//!   - The projection is never incremental. Every command triggers a full
//!     recompute against the current state.
//!   - project() only borrows state. Mutation happens here and nowhere else.
//!   - With no time reading there is no projection. Callers must show
//!     nothing rather than a stale or zero value.

use crate::{
    assignment::ShiftAssignments,
    capacity::{project, CapacityInput, CapacityResult},
    clock::{FixedTimeSource, LocalTimeSource, TimeOfDay, TimeSource},
    command::DeskCommand,
    config::DeskConfig,
    error::{DeskError, DeskResult},
    event::DeskEvent,
    roster::Roster,
    schedule::ShiftType,
    snapshot::DeskSnapshot,
    throughput::ThroughputModel,
    types::LobbyCount,
};

pub struct DeskEngine {
    config:            DeskConfig,
    model:             ThroughputModel,
    roster:            Roster,
    assignments:       ShiftAssignments,
    shift_type:        ShiftType,
    current_time:      Option<TimeOfDay>,
    patients_in_lobby: LobbyCount,
    time_source:       Box<dyn TimeSource>,
}

impl DeskEngine {
    /// A fresh desk: house roster, no assignments, no time set, empty lobby.
    pub fn new(config: DeskConfig) -> Self {
        Self {
            model:             config.throughput_model(),
            roster:            Roster::new(&config.house_providers),
            assignments:       ShiftAssignments::new(),
            shift_type:        config.default_shift_type,
            current_time:      None,
            patients_in_lobby: 0,
            time_source:       Box::new(LocalTimeSource),
            config,
        }
    }

    /// Rebuild a desk from a saved snapshot layered over `config`'s house roster.
    pub fn from_snapshot(config: DeskConfig, snapshot: DeskSnapshot) -> Self {
        let mut engine = Self::new(config);
        engine.roster = Roster::restore(&engine.config.house_providers, snapshot.providers);
        engine.assignments = snapshot.assignments;
        engine.shift_type = snapshot.shift_type;
        engine.current_time = snapshot.current_time;
        engine.patients_in_lobby = snapshot.patients_in_lobby;
        engine
    }

    /// Test desk: DeskConfig::default_test() and a clock frozen at noon.
    pub fn build_test() -> DeskResult<Self> {
        let noon = TimeOfDay::new(12, 0)?;
        Ok(Self::new(DeskConfig::default_test()).with_time_source(Box::new(FixedTimeSource(noon))))
    }

    pub fn with_time_source(mut self, time_source: Box<dyn TimeSource>) -> Self {
        self.time_source = time_source;
        self
    }

    pub fn config(&self) -> &DeskConfig { &self.config }
    pub fn model(&self) -> &ThroughputModel { &self.model }
    pub fn roster(&self) -> &Roster { &self.roster }
    pub fn assignments(&self) -> &ShiftAssignments { &self.assignments }
    pub fn shift_type(&self) -> ShiftType { self.shift_type }
    pub fn current_time(&self) -> Option<TimeOfDay> { self.current_time }
    pub fn patients_in_lobby(&self) -> LobbyCount { self.patients_in_lobby }

    pub fn snapshot(&self) -> DeskSnapshot {
        DeskSnapshot {
            shift_type:        self.shift_type,
            providers:         self.roster.providers().to_vec(),
            assignments:       self.assignments.clone(),
            patients_in_lobby: self.patients_in_lobby,
            current_time:      self.current_time,
        }
    }

    /// The current projection, or None when no time is set.
    pub fn projection(&self) -> Option<CapacityResult> {
        let now = self.current_time?;
        let input = CapacityInput {
            now,
            shift_type:        self.shift_type,
            roster:            &self.roster,
            assignments:       &self.assignments,
            patients_in_lobby: self.patients_in_lobby,
        };
        Some(project(&input, &self.model))
    }

    /// Apply one command, then recompute.
    /// A rejected command leaves the state untouched and returns the error.
    pub fn apply(&mut self, command: DeskCommand) -> DeskResult<Vec<DeskEvent>> {
        let name = command.name();
        let mut events = match self.mutate(command) {
            Ok(events) => events,
            Err(e) => {
                log::warn!("command {name} rejected: {e}");
                return Err(e);
            }
        };

        if let Some(result) = self.projection() {
            events.push(DeskEvent::CapacityRecomputed {
                value: result.value(),
                state: result.state,
            });
        }

        log::debug!("command {name} applied: {} event(s)", events.len());
        Ok(events)
    }

    fn mutate(&mut self, command: DeskCommand) -> DeskResult<Vec<DeskEvent>> {
        let event = match command {
            DeskCommand::AddProvider => {
                let stamp = chrono::Utc::now().timestamp_millis();
                let provider_id = self.roster.add_ad_hoc(stamp)?;
                DeskEvent::ProviderAdded { provider_id }
            }
            DeskCommand::RenameProvider { provider_id, name } => {
                self.roster.rename(provider_id, &name)?;
                let name = self
                    .roster
                    .get(provider_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                DeskEvent::ProviderRenamed { provider_id, name }
            }
            DeskCommand::SetProviderRate { provider_id, patients_per_hour } => {
                self.roster.set_rate(provider_id, patients_per_hour)?;
                DeskEvent::ProviderRateChanged { provider_id, patients_per_hour }
            }
            DeskCommand::LockProvider { provider_id } => {
                self.roster.lock(provider_id)?;
                DeskEvent::ProviderLocked { provider_id }
            }
            DeskCommand::UnlockProvider { provider_id } => {
                self.roster.unlock(provider_id)?;
                DeskEvent::ProviderUnlocked { provider_id }
            }
            DeskCommand::DeleteProvider { provider_id } => {
                self.roster.remove(provider_id)?;
                let purged_from = self.assignments.purge(provider_id);
                DeskEvent::ProviderDeleted { provider_id, purged_from }
            }
            DeskCommand::AssignProvider { slot, provider_id } => {
                if !self.roster.contains(provider_id) {
                    return Err(DeskError::ProviderNotFound { id: provider_id });
                }
                let evicted_from = self.assignments.assign(slot, provider_id);
                log::info!("assignments: provider {provider_id} → {slot:?} (evicted from {evicted_from:?})");
                DeskEvent::ProviderAssigned { slot, provider_id, evicted_from }
            }
            DeskCommand::UnassignProvider { slot, provider_id } => {
                if !self.assignments.unassign(slot, provider_id) {
                    return Ok(vec![]);
                }
                DeskEvent::ProviderUnassigned { slot, provider_id }
            }
            DeskCommand::ClearAllShifts => {
                self.assignments.clear_all();
                log::info!("assignments: cleared all shifts");
                DeskEvent::ShiftsCleared
            }
            DeskCommand::SetTime { time } => {
                let time: TimeOfDay = time.parse()?;
                self.current_time = Some(time);
                DeskEvent::TimeSet { time }
            }
            DeskCommand::SetTimeNow => {
                let time = self.time_source.now();
                self.current_time = Some(time);
                DeskEvent::TimeSet { time }
            }
            DeskCommand::ClearTime => {
                self.current_time = None;
                DeskEvent::TimeCleared
            }
            DeskCommand::SetLobby { count } => {
                self.patients_in_lobby = count;
                DeskEvent::LobbyUpdated { count }
            }
            DeskCommand::SetShiftType { shift_type } => {
                self.shift_type = shift_type;
                DeskEvent::ShiftTypeChanged { shift_type }
            }
        };
        Ok(vec![event])
    }
}
