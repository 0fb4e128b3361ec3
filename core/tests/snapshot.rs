//! Snapshot and wire-format tests.
//!
//! A desk saved to JSON and rebuilt must project exactly as before.
//! Commands and events keep their tagged JSON shape.

use frontdesk_core::{
    config::DeskConfig,
    schedule::{ShiftSlot, ShiftType},
    DeskCommand, DeskEngine, DeskEvent, DeskSnapshot,
};

fn build() -> DeskEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    DeskEngine::build_test().expect("build test engine")
}

/// Save, reload, and the projection is unchanged.
#[test]
fn snapshot_round_trip_preserves_projection() {
    let mut engine = build();
    let id = match engine.apply(DeskCommand::AddProvider).unwrap()[0] {
        DeskEvent::ProviderAdded { provider_id } => provider_id,
        ref other => panic!("unexpected {other:?}"),
    };
    for cmd in [
        DeskCommand::RenameProvider { provider_id: id, name: "Casey".into() },
        DeskCommand::SetProviderRate { provider_id: id, patients_per_hour: 2.2 },
        DeskCommand::AssignProvider { slot: ShiftSlot::Close, provider_id: id },
        DeskCommand::AssignProvider { slot: ShiftSlot::Opening, provider_id: 1 },
        DeskCommand::SetTime { time: "13:20".into() },
        DeskCommand::SetLobby { count: 6 },
    ] {
        engine.apply(cmd).unwrap();
    }

    let json = engine.snapshot().to_json().unwrap();
    let restored = DeskEngine::from_snapshot(
        DeskConfig::default_test(),
        DeskSnapshot::from_json(&json).unwrap(),
    );

    assert_eq!(restored.projection(), engine.projection());
    assert_eq!(restored.roster().get(id).unwrap().name, "Casey");
    assert_eq!(restored.patients_in_lobby(), 6);
}

/// Missing fields fall back to an empty desk.
#[test]
fn sparse_snapshot_uses_defaults() {
    let snapshot = DeskSnapshot::from_json("{}").unwrap();
    assert_eq!(snapshot.shift_type, ShiftType::Standard);
    assert!(snapshot.providers.is_empty());
    assert_eq!(snapshot.current_time, None);

    let engine = DeskEngine::from_snapshot(DeskConfig::default_test(), snapshot);
    assert_eq!(engine.roster().len(), 2, "house roster is always present");
}

/// Saved assignments repeating an id are normalized on load.
#[test]
fn duplicate_assignments_are_normalized_on_load() {
    let json = r#"{
        "assignments": { "opening": [1], "close": [1, 2] },
        "current_time": "12:00"
    }"#;
    let snapshot = DeskSnapshot::from_json(json).unwrap();

    assert_eq!(snapshot.assignments.in_slot(ShiftSlot::Opening), &[1]);
    assert_eq!(snapshot.assignments.in_slot(ShiftSlot::Close), &[2]);
}

/// Malformed snapshots surface as serialization errors.
#[test]
fn bad_snapshot_time_is_an_error() {
    assert!(DeskSnapshot::from_json(r#"{ "current_time": "7pm" }"#).is_err());
}

#[test]
fn command_wire_shape() {
    let cmd: DeskCommand =
        serde_json::from_str(r#"{"cmd":"assign_provider","slot":"track2","provider_id":7}"#).unwrap();
    assert_eq!(cmd, DeskCommand::AssignProvider { slot: ShiftSlot::Track2, provider_id: 7 });

    let cmd: DeskCommand =
        serde_json::from_str(r#"{"cmd":"set_shift_type","shift_type":"compressed_day"}"#).unwrap();
    assert_eq!(cmd.name(), "set_shift_type");
}

#[test]
fn event_wire_shape() {
    let json = serde_json::to_value(DeskEvent::ShiftsCleared).unwrap();
    assert_eq!(json["type"], "shifts_cleared");
    assert_eq!(DeskEvent::ShiftsCleared.event_type(), "shifts_cleared");
}
