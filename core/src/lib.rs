//! Front desk capacity core.
//!
//! Projects how many more patients the clinic can absorb before closing,
//! from the clock, the active shift type, the provider roster, per-slot
//! assignments and the lobby count.
//!
//! ```text
//! schedule ─▶ hours ─▶ throughput ─▶ capacity ─▶ (renderer)
//!                                       ▲
//!                     roster + assignment (owned by engine)
//! ```

pub mod assignment;
pub mod capacity;
pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod hours;
pub mod roster;
pub mod schedule;
pub mod snapshot;
pub mod throughput;
pub mod types;

pub use assignment::ShiftAssignments;
pub use capacity::{project, BreakdownEntry, CapacityInput, CapacityResult, CapacityState, CapacityTier};
pub use clock::{FixedTimeSource, LocalTimeSource, TimeOfDay, TimeSource};
pub use command::DeskCommand;
pub use config::{DeskConfig, HouseProviderConfig};
pub use engine::DeskEngine;
pub use error::{DeskError, DeskResult};
pub use event::DeskEvent;
pub use roster::{Provider, ProviderOrigin, Roster};
pub use schedule::{ShiftSlot, ShiftType, ShiftWindow};
pub use snapshot::DeskSnapshot;
pub use throughput::ThroughputModel;
