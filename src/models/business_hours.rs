//! Business-hours configuration records.
//!
//! Opening windows are configured per weekday, with optional date-specific
//! overrides (holidays, special events). A date override supersedes the
//! weekday default for that date; a date with neither entry is closed.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default booking grid granularity in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Upper bound on durations and slot granularity: nothing schedulable
/// spans more than one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// One opening window: `[open_time, close_time)` with a booking grid step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

fn default_slot_minutes() -> u32 {
    DEFAULT_SLOT_MINUTES
}

impl BusinessHours {
    /// Validate the window invariants.
    ///
    /// Returns an error message when `open_time >= close_time` or the slot
    /// granularity is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.open_time >= self.close_time {
            return Err(format!(
                "open_time {} must be before close_time {}",
                self.open_time, self.close_time
            ));
        }
        if self.slot_minutes == 0 {
            return Err("slot_minutes must be positive".to_string());
        }
        if self.slot_minutes > MINUTES_PER_DAY {
            return Err("slot_minutes must fit within one day".to_string());
        }
        Ok(())
    }
}

/// Weekday defaults plus date-specific overrides, read-only to the
/// scheduling core.
#[derive(Debug, Clone, Default)]
pub struct BusinessHoursTable {
    pub weekdays: HashMap<Weekday, BusinessHours>,
    pub overrides: HashMap<NaiveDate, BusinessHours>,
}

impl BusinessHoursTable {
    /// Resolve the window for a date: override first, else weekday default.
    pub fn resolve(&self, date: NaiveDate) -> Option<BusinessHours> {
        use chrono::Datelike;
        self.overrides
            .get(&date)
            .or_else(|| self.weekdays.get(&date.weekday()))
            .copied()
    }

    /// Validate every configured window.
    pub fn validate(&self) -> Result<(), String> {
        for (day, hours) in &self.weekdays {
            hours
                .validate()
                .map_err(|e| format!("business hours for {}: {}", day, e))?;
        }
        for (date, hours) in &self.overrides {
            hours
                .validate()
                .map_err(|e| format!("business hours override for {}: {}", date, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(open: (u32, u32), close: (u32, u32)) -> BusinessHours {
        BusinessHours {
            open_time: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
            slot_minutes: 30,
        }
    }

    #[test]
    fn test_override_supersedes_weekday() {
        let mut table = BusinessHoursTable::default();
        // 2025-09-15 is a Monday
        table.weekdays.insert(Weekday::Mon, window((9, 0), (18, 0)));
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        table.overrides.insert(date, window((12, 0), (16, 0)));

        let resolved = table.resolve(date).unwrap();
        assert_eq!(resolved.open_time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        // The following Monday falls back to the weekday default
        let next_week = NaiveDate::from_ymd_opt(2025, 9, 22).unwrap();
        let resolved = table.resolve(next_week).unwrap();
        assert_eq!(resolved.open_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn test_closed_without_entry() {
        let table = BusinessHoursTable::default();
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        assert!(table.resolve(date).is_none());
    }

    #[test]
    fn test_window_invariants() {
        assert!(window((9, 0), (18, 0)).validate().is_ok());
        assert!(window((18, 0), (9, 0)).validate().is_err());

        let mut zero_slot = window((9, 0), (18, 0));
        zero_slot.slot_minutes = 0;
        assert!(zero_slot.validate().is_err());
    }
}
