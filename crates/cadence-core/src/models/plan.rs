//! Plan model definition and weekly availability mask.

use std::str::FromStr;

use jiff::{
    civil::{Date, Weekday},
    Timestamp,
};
use serde::{Deserialize, Serialize};

use super::PlanStatus;

/// Day names indexed by bit position (bit 0 = Sunday).
const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Seven-bit weekly availability pattern, bit 0 = Sunday ... bit 6 = Saturday.
///
/// A mask is never empty; construction rejects `0` and anything above 7 bits.
///
/// ```rust
/// use cadence_core::models::WeekMask;
///
/// let weekdays: WeekMask = "mon,tue,wed,thu,fri".parse().unwrap();
/// assert_eq!(weekdays.bits(), 0b0111110);
/// assert_eq!("62".parse::<WeekMask>().unwrap(), weekdays);
/// assert!("0".parse::<WeekMask>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekMask(u8);

impl WeekMask {
    /// Monday through Friday.
    pub const WEEKDAYS: WeekMask = WeekMask(0b0111110);
    /// Every day of the week.
    pub const EVERY_DAY: WeekMask = WeekMask(0b1111111);

    /// Builds a mask from raw bits.
    pub fn new(bits: u8) -> Result<Self, String> {
        match bits {
            0 => Err("availability must include at least one weekday".to_string()),
            b if b > 0b1111111 => Err(format!("availability mask {b} uses more than 7 bits")),
            b => Ok(WeekMask(b)),
        }
    }

    /// Raw bit pattern.
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Whether study is planned on the given weekday.
    pub fn contains(&self, weekday: Weekday) -> bool {
        let bit = weekday.to_sunday_zero_offset() as u8;
        self.0 & (1 << bit) != 0
    }

    /// Whether study is planned on the given date's weekday.
    pub fn is_available(&self, date: Date) -> bool {
        self.contains(date.weekday())
    }

    /// Short names of the available days, Sunday first.
    pub fn day_names(&self) -> Vec<&'static str> {
        DAY_NAMES
            .iter()
            .enumerate()
            .filter(|(bit, _)| self.0 & (1 << bit) != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl TryFrom<u8> for WeekMask {
    type Error = String;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        WeekMask::new(bits)
    }
}

impl From<WeekMask> for u8 {
    fn from(mask: WeekMask) -> Self {
        mask.0
    }
}

impl FromStr for WeekMask {
    type Err = String;

    /// Accepts a decimal number (`62`), a binary literal (`0b0111110`) or a
    /// comma-separated list of day names (`mon,wed,fri`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(binary) = s.strip_prefix("0b") {
            let bits = u8::from_str_radix(binary, 2)
                .map_err(|_| format!("Invalid availability mask: {s}"))?;
            return WeekMask::new(bits);
        }
        if let Ok(bits) = s.parse::<u8>() {
            return WeekMask::new(bits);
        }

        let mut bits = 0u8;
        for name in s.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let lower = name.to_lowercase();
            let bit = DAY_NAMES
                .iter()
                .position(|day| lower.starts_with(day))
                .ok_or_else(|| format!("Invalid weekday: {name}"))?;
            bits |= 1 << bit;
        }
        WeekMask::new(bits)
    }
}

/// A student's study plan: weekly availability plus a daily time budget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: u64,

    /// Reference to the owning student (managed outside this crate)
    pub student_id: String,

    /// Title of the plan
    pub title: String,

    /// Daily study budget in hours (0.5 to 12)
    pub hours_per_day: f64,

    /// Weekdays on which study happens
    pub availability: WeekMask,

    /// First day of the plan
    pub start_date: Date,

    /// Last day of the plan, if bounded
    pub end_date: Option<Date>,

    /// Status of the plan
    #[serde(default)]
    pub status: PlanStatus,

    /// Last goal number handed out; the next origin goal receives this + 1
    pub last_number_base: u32,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Whether `date` lies inside the plan's start/end range.
    pub fn covers(&self, date: Date) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}
