//! Remaining working time for a provider inside one shift window.

use crate::{clock::TimeOfDay, schedule::ShiftWindow, types::DecimalHours};

/// Hours left in `window` as of `now`.
///
/// - before the window opens: the full window duration is credited, so
///   providers can be assigned ahead of time.
/// - at or after the window end: 0. The end boundary is closed.
/// - otherwise: `end - now`.
pub fn remaining_hours(now: TimeOfDay, window: ShiftWindow) -> DecimalHours {
    let t = now.decimal_hours();

    if t < window.start {
        return window.duration();
    }
    if t >= window.end {
        return 0.0;
    }
    (window.end - t).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    const OPENING: ShiftWindow = ShiftWindow::new(8.0, 18.0);

    #[test]
    fn before_start_credits_full_window() {
        assert_eq!(remaining_hours(at(7, 30), OPENING), 10.0);
        assert_eq!(remaining_hours(at(0, 0), OPENING), 10.0);
    }

    #[test]
    fn inside_window_counts_down_to_end() {
        assert_eq!(remaining_hours(at(8, 0), OPENING), 10.0);
        assert_eq!(remaining_hours(at(12, 0), OPENING), 6.0);
        assert_eq!(remaining_hours(at(17, 30), OPENING), 0.5);
    }

    #[test]
    fn end_boundary_is_closed() {
        assert_eq!(remaining_hours(at(18, 0), OPENING), 0.0);
        assert_eq!(remaining_hours(at(23, 59), OPENING), 0.0);
    }
}
