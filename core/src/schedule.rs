//! Shift schedule — fixed business windows per shift type.
//!
//! These values are business constants. Do not derive them from anything.

use crate::types::DecimalHours;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftWindow {
    pub start: DecimalHours,
    pub end:   DecimalHours,
}

impl ShiftWindow {
    pub const fn new(start: DecimalHours, end: DecimalHours) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> DecimalHours {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    /// Staggered opening / mid / close windows.
    #[default]
    Standard,
    /// Short operating day: three parallel tracks on the same window.
    CompressedDay,
}

/// Every assignable slot. Each belongs to exactly one shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSlot {
    Opening,
    Mid,
    Close,
    Track1,
    Track2,
    Track3,
}

const STANDARD_SLOTS: [ShiftSlot; 3] = [ShiftSlot::Opening, ShiftSlot::Mid, ShiftSlot::Close];
const COMPRESSED_SLOTS: [ShiftSlot; 3] = [ShiftSlot::Track1, ShiftSlot::Track2, ShiftSlot::Track3];

impl ShiftType {
    pub const ALL: [ShiftType; 2] = [ShiftType::Standard, ShiftType::CompressedDay];

    /// Active slots in display order.
    pub fn slots(&self) -> &'static [ShiftSlot] {
        match self {
            Self::Standard      => &STANDARD_SLOTS,
            Self::CompressedDay => &COMPRESSED_SLOTS,
        }
    }

    /// The clinic's closing hour: the latest window end among the active slots.
    pub fn latest_close(&self) -> DecimalHours {
        self.slots()
            .iter()
            .map(|slot| slot.window().end)
            .fold(f64::MIN, f64::max)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard      => "standard",
            Self::CompressedDay => "compressed_day",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "normal" => Ok(Self::Standard),
            "compressed_day" | "compressed" | "thursday" => Ok(Self::CompressedDay),
            other => Err(format!("unknown shift type '{other}'")),
        }
    }
}

impl ShiftSlot {
    pub const ALL: [ShiftSlot; 6] = [
        ShiftSlot::Opening,
        ShiftSlot::Mid,
        ShiftSlot::Close,
        ShiftSlot::Track1,
        ShiftSlot::Track2,
        ShiftSlot::Track3,
    ];

    pub fn window(&self) -> ShiftWindow {
        match self {
            Self::Opening => ShiftWindow::new(8.0, 18.0),
            Self::Mid     => ShiftWindow::new(9.0, 19.0),
            Self::Close   => ShiftWindow::new(10.0, 20.0),
            Self::Track1 | Self::Track2 | Self::Track3 => ShiftWindow::new(9.0, 19.0),
        }
    }

    pub fn shift_type(&self) -> ShiftType {
        match self {
            Self::Opening | Self::Mid | Self::Close => ShiftType::Standard,
            Self::Track1 | Self::Track2 | Self::Track3 => ShiftType::CompressedDay,
        }
    }

    /// Short label used in breakdown lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Opening => "Opening",
            Self::Mid     => "Mid",
            Self::Close   => "Close",
            Self::Track1  => "Shift 1",
            Self::Track2  => "Shift 2",
            Self::Track3  => "Shift 3",
        }
    }

    /// Heading shown above a slot's assignment list.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Opening => "Opening Shift (8-6)",
            Self::Mid     => "Mid Shift (9-7)",
            Self::Close   => "Close Shift (10-8)",
            Self::Track1  => "Shift 1 (9-7)",
            Self::Track2  => "Shift 2 (9-7)",
            Self::Track3  => "Shift 3 (9-7)",
        }
    }
}
