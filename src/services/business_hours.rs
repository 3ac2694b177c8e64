//! Business-hours policy: decides whether a time is bookable at all.

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::models::business_hours::{BusinessHours, BusinessHoursTable};

/// Pure policy over the configured opening windows. No side effects.
pub struct BusinessHoursPolicy<'a> {
    table: &'a BusinessHoursTable,
}

impl<'a> BusinessHoursPolicy<'a> {
    pub fn new(table: &'a BusinessHoursTable) -> Self {
        Self { table }
    }

    /// Resolve the opening window for a date.
    ///
    /// Resolution order: date-specific override first, else the weekday
    /// default, else `None` (closed).
    pub fn window_for(&self, date: NaiveDate) -> Option<BusinessHours> {
        self.table.resolve(date)
    }

    /// Whether an appointment of `service_minutes` starting at `time` fits
    /// inside the opening window for `date`.
    ///
    /// The slot granularity governs grid alignment for availability
    /// listings, not the maximum appointment length: a service longer than
    /// one slot is bookable as long as it ends by closing time. A
    /// reservation ending exactly at `close_time` is bookable.
    pub fn is_bookable(&self, date: NaiveDate, time: NaiveTime, service_minutes: u32) -> bool {
        let Some(window) = self.window_for(date) else {
            return false;
        };

        if time < window.open_time {
            return false;
        }

        let end_min = (time.num_seconds_from_midnight() / 60).saturating_add(service_minutes);
        let close_min = window.close_time.num_seconds_from_midnight() / 60;
        end_min <= close_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn monday_nine_to_six() -> BusinessHoursTable {
        let mut table = BusinessHoursTable::default();
        table.weekdays.insert(
            Weekday::Mon,
            BusinessHours {
                open_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                close_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
                slot_minutes: 30,
            },
        );
        table
    }

    fn monday() -> NaiveDate {
        // 2025-09-15 is a Monday
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_bookable_inside_window() {
        let table = monday_nine_to_six();
        let policy = BusinessHoursPolicy::new(&table);
        assert!(policy.is_bookable(monday(), t(10, 0), 30));
    }

    #[test]
    fn test_before_opening_rejected() {
        let table = monday_nine_to_six();
        let policy = BusinessHoursPolicy::new(&table);
        assert!(!policy.is_bookable(monday(), t(8, 30), 30));
    }

    #[test]
    fn test_closing_time_boundary() {
        let table = monday_nine_to_six();
        let policy = BusinessHoursPolicy::new(&table);

        // Ending exactly at close is bookable
        assert!(policy.is_bookable(monday(), t(17, 30), 30));
        // Ending one minute past close is not
        assert!(!policy.is_bookable(monday(), t(17, 31), 30));
    }

    #[test]
    fn test_service_longer_than_slot() {
        let table = monday_nine_to_six();
        let policy = BusinessHoursPolicy::new(&table);

        // 90-minute service on a 30-minute grid is fine mid-day
        assert!(policy.is_bookable(monday(), t(16, 30), 90));
        // but not when it would run past closing
        assert!(!policy.is_bookable(monday(), t(17, 0), 90));
    }

    #[test]
    fn test_huge_duration_never_bookable() {
        let table = monday_nine_to_six();
        let policy = BusinessHoursPolicy::new(&table);
        assert!(!policy.is_bookable(monday(), t(10, 0), u32::MAX));
    }

    #[test]
    fn test_closed_day() {
        let table = monday_nine_to_six();
        let policy = BusinessHoursPolicy::new(&table);
        // Tuesday has no window configured
        let tuesday = NaiveDate::from_ymd_opt(2025, 9, 16).unwrap();
        assert!(!policy.is_bookable(tuesday, t(10, 0), 30));
        assert!(policy.window_for(tuesday).is_none());
    }
}
