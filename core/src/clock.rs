//! Desk clock — the wall-clock reading the projection is computed against.
//!
//! RULE: the capacity core never reads the system clock itself.
//! Callers obtain a TimeOfDay (typed in, or from a TimeSource) and pass it in.

use crate::{
    error::{DeskError, DeskResult},
    types::DecimalHours,
};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A validated hour/minute reading on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour:   u32,
    minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> DeskResult<Self> {
        if hour > 23 || minute > 59 {
            return Err(DeskError::InvalidTime {
                input: format!("{hour}:{minute:02}"),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Read the local wall clock.
    pub fn now() -> Self {
        Self::from(chrono::Local::now().time())
    }

    pub fn hour(&self) -> u32 { self.hour }
    pub fn minute(&self) -> u32 { self.minute }

    /// `hour + minute / 60`.
    pub fn decimal_hours(&self) -> DecimalHours {
        self.hour as f64 + self.minute as f64 / 60.0
    }

    /// 12-hour rendering used in notices: `19:05` → `7:05 PM`, `0:30` → `12:30 AM`.
    pub fn display_12h(&self) -> String {
        let display_hour = match self.hour {
            0 => 12,
            h if h > 12 => h - 12,
            h => h,
        };
        let meridiem = if self.hour >= 12 { "PM" } else { "AM" };
        format!("{display_hour}:{:02} {meridiem}", self.minute)
    }

    /// 12-hour rendering of a decimal hour-of-day such as a shift end.
    pub fn display_decimal_12h(hours: DecimalHours) -> String {
        let whole = hours.floor().clamp(0.0, 23.0) as u32;
        let minute = ((hours - hours.floor()) * 60.0).round().min(59.0) as u32;
        Self { hour: whole, minute }.display_12h()
    }
}

impl From<NaiveTime> for TimeOfDay {
    fn from(t: NaiveTime) -> Self {
        Self { hour: t.hour(), minute: t.minute() }
    }
}

impl FromStr for TimeOfDay {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self::from)
            .map_err(|_| DeskError::InvalidTime { input: s.to_string() })
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = DeskError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Where "set time to now" reads the clock from.
pub trait TimeSource: Send {
    fn now(&self) -> TimeOfDay;
}

/// The local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTimeSource;

impl TimeSource for LocalTimeSource {
    fn now(&self) -> TimeOfDay { TimeOfDay::now() }
}

/// A frozen clock for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource(pub TimeOfDay);

impl TimeSource for FixedTimeSource {
    fn now(&self) -> TimeOfDay { self.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_zero_padded_times() {
        let t: TimeOfDay = "07:30".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (7, 30));
        assert_eq!(t.decimal_hours(), 7.5);

        let t: TimeOfDay = " 19:05 ".parse().unwrap();
        assert_eq!(t.to_string(), "19:05");
    }

    #[test]
    fn rejects_malformed_and_out_of_range() {
        for bad in ["", "24:00", "12:60", "noon", "12:30:15", "-1:00"] {
            assert!(
                bad.parse::<TimeOfDay>().is_err(),
                "expected '{bad}' to be rejected"
            );
        }
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(23, 60).is_err());
    }

    #[test]
    fn twelve_hour_display() {
        assert_eq!(TimeOfDay::new(0, 5).unwrap().display_12h(), "12:05 AM");
        assert_eq!(TimeOfDay::new(9, 0).unwrap().display_12h(), "9:00 AM");
        assert_eq!(TimeOfDay::new(12, 30).unwrap().display_12h(), "12:30 PM");
        assert_eq!(TimeOfDay::new(19, 0).unwrap().display_12h(), "7:00 PM");
        assert_eq!(TimeOfDay::display_decimal_12h(20.0), "8:00 PM");
    }

    #[test]
    fn serializes_as_clock_string() {
        let t = TimeOfDay::new(8, 15).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"08:15\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<TimeOfDay>("\"25:00\"").is_err());
    }

    #[test]
    fn fixed_source_returns_its_reading() {
        let t = TimeOfDay::new(14, 45).unwrap();
        assert_eq!(FixedTimeSource(t).now(), t);
    }
}
