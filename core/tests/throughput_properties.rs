//! Throughput and remaining-hours properties.
//!
//! Generative checks of the last-hour floor rule and the hours window,
//! plus closed-state precedence and no-provider value over random desks.

use frontdesk_core::{
    capacity::{project, CapacityInput, CapacityState},
    config::HouseProviderConfig,
    hours::remaining_hours,
    roster::Roster,
    schedule::{ShiftSlot, ShiftType},
    throughput::{ThroughputModel, ALTERNATE_LAST_HOUR_FLOOR, DEFAULT_LAST_HOUR_FLOOR},
    ShiftAssignments, TimeOfDay,
};
use proptest::prelude::*;

fn floor_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(DEFAULT_LAST_HOUR_FLOOR),
        Just(ALTERNATE_LAST_HOUR_FLOOR),
        0.0f64..5.0,
    ]
}

fn shift_type_strategy() -> impl Strategy<Value = ShiftType> {
    prop_oneof![Just(ShiftType::Standard), Just(ShiftType::CompressedDay)]
}

fn slot_strategy() -> impl Strategy<Value = ShiftSlot> {
    (0usize..ShiftSlot::ALL.len()).prop_map(|i| ShiftSlot::ALL[i])
}

proptest! {
    #[test]
    fn no_time_left_means_no_patients(
        hours in -24.0f64..=0.0,
        rate in 0.0f64..10.0,
        floor in floor_strategy(),
    ) {
        prop_assert_eq!(ThroughputModel::new(floor).remaining_patients(rate, hours), 0.0);
    }

    #[test]
    fn partial_final_hour_is_exactly_the_floor(
        hours in 0.0001f64..0.9999,
        rate in 0.0f64..10.0,
        floor in floor_strategy(),
    ) {
        prop_assert_eq!(ThroughputModel::new(floor).remaining_patients(rate, hours), floor);
    }

    #[test]
    fn full_hours_bill_at_rate_plus_floor(
        hours in 1.0f64..12.0,
        rate in 0.0f64..10.0,
        floor in floor_strategy(),
    ) {
        let got = ThroughputModel::new(floor).remaining_patients(rate, hours);
        let expected = (hours - 1.0) * rate + floor;
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn more_time_never_means_fewer_patients(
        a in -2.0f64..12.0,
        b in -2.0f64..12.0,
        rate in 0.0f64..10.0,
        floor in floor_strategy(),
    ) {
        let model = ThroughputModel::new(floor);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(model.remaining_patients(rate, lo) <= model.remaining_patients(rate, hi));
    }

    #[test]
    fn remaining_hours_stay_within_the_window(
        hour in 0u32..24,
        minute in 0u32..60,
        slot in slot_strategy(),
    ) {
        let window = slot.window();
        let hours = remaining_hours(TimeOfDay::new(hour, minute).unwrap(), window);
        prop_assert!(hours >= 0.0);
        prop_assert!(hours <= window.duration());
    }

    #[test]
    fn closed_takes_precedence_over_everything(
        shift_type in shift_type_strategy(),
        minutes_past_close in 0u32..240,
        lobby in 0u32..50,
        picks in proptest::collection::vec((slot_strategy(), 1i64..6), 0..10),
    ) {
        let close = shift_type.latest_close() as u32 * 60 + minutes_past_close;
        prop_assume!(close < 24 * 60);
        let now = TimeOfDay::new(close / 60, close % 60).unwrap();

        let roster = sample_roster();
        let mut assignments = ShiftAssignments::new();
        for (slot, id) in picks {
            assignments.assign(slot, id);
        }
        let input = CapacityInput { now, shift_type, roster: &roster, assignments: &assignments, patients_in_lobby: lobby };
        let result = project(&input, &ThroughputModel::default());

        prop_assert_eq!(result.state, CapacityState::Closed { latest_close: shift_type.latest_close() });
        prop_assert!(result.breakdown.is_empty());
    }

    #[test]
    fn empty_desk_reports_negative_lobby(
        shift_type in shift_type_strategy(),
        hour in 0u32..19,
        minute in 0u32..60,
        lobby in 0u32..100,
        stale in proptest::collection::vec((slot_strategy(), 100i64..200), 0..6),
    ) {
        let roster = sample_roster();
        let mut assignments = ShiftAssignments::new();
        for (slot, id) in stale {
            assignments.assign(slot, id);
        }
        let now = TimeOfDay::new(hour, minute).unwrap();
        let input = CapacityInput { now, shift_type, roster: &roster, assignments: &assignments, patients_in_lobby: lobby };
        let result = project(&input, &ThroughputModel::default());

        prop_assert_eq!(result.state, CapacityState::NoProvidersAssigned { value: -(lobby as i64) });
    }
}

fn sample_roster() -> Roster {
    let house: Vec<HouseProviderConfig> = (1..=5)
        .map(|id| HouseProviderConfig {
            id,
            name: format!("Provider {id}"),
            patients_per_hour: 1.5 + id as f64 * 0.1,
        })
        .collect();
    Roster::new(&house)
}
