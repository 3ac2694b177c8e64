//! Customer aggregate maintenance.
//!
//! `total_visits`, `last_visit_date`, `vip_level` and `vip_status` are
//! derived from completed reservations and updated incrementally on each
//! status change rather than recomputed on every read. Idempotence under
//! replay is guaranteed by the lifecycle manager, which checks the
//! reservation's persisted status before ever calling in here.

use chrono::NaiveDate;
use log::debug;

use crate::api::{Customer, Reservation, ReservationStatus};
use crate::config::SchedulingConfig;

/// Applies the aggregate effect of a reservation status change to a
/// customer record.
pub struct CustomerAggregateUpdater<'a> {
    config: &'a SchedulingConfig,
}

impl<'a> CustomerAggregateUpdater<'a> {
    pub fn new(config: &'a SchedulingConfig) -> Self {
        Self { config }
    }

    /// Mutate `customer` for the transition `old_status -> new_status` of
    /// `reservation`. Returns whether anything changed.
    ///
    /// * Into `completed`: visit count up, `last_visit_date` advances to
    ///   the reservation date if later, VIP tier recomputed.
    /// * Away from `completed` (correction): visit count down (floored at
    ///   zero) and `last_visit_date` recomputed from
    ///   `remaining_completed_dates`, a fresh lookup rather than a cached
    ///   reversal so multiple completions stay correct.
    /// * Every other transition has no aggregate effect.
    pub fn apply_status_change(
        &self,
        customer: &mut Customer,
        reservation: &Reservation,
        old_status: ReservationStatus,
        new_status: ReservationStatus,
        remaining_completed_dates: &[NaiveDate],
    ) -> bool {
        let was_completed = old_status == ReservationStatus::Completed;
        let is_completed = new_status == ReservationStatus::Completed;

        if was_completed == is_completed {
            return false;
        }

        if is_completed {
            customer.total_visits += 1;
            customer.last_visit_date = Some(
                customer
                    .last_visit_date
                    .map_or(reservation.date, |d| d.max(reservation.date)),
            );
        } else {
            customer.total_visits = customer.total_visits.saturating_sub(1);
            customer.last_visit_date = remaining_completed_dates.iter().copied().max();
        }

        customer.vip_level = self.config.vip_level_for(customer.total_visits);
        customer.vip_status = customer.vip_level > 0;

        debug!(
            "customer {} aggregates: visits={} last_visit={:?} vip_level={}",
            customer.id, customer.total_visits, customer.last_visit_date, customer.vip_level
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CustomerId, ReservationId};
    use chrono::{NaiveTime, Utc};

    fn config() -> SchedulingConfig {
        SchedulingConfig {
            vip_thresholds: vec![5, 15],
            ..Default::default()
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn reservation(day: u32) -> Reservation {
        Reservation {
            id: ReservationId(1),
            customer_id: CustomerId(1),
            stylist: "Sarah".to_string(),
            service_type: "cut".to_string(),
            date: date(day),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 30,
            status: ReservationStatus::Completed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_scenario_d_vip_threshold_crossed() {
        let config = config();
        let updater = CustomerAggregateUpdater::new(&config);

        let mut customer = Customer::new(CustomerId(1), "Mia");
        customer.total_visits = 4;

        let changed = updater.apply_status_change(
            &mut customer,
            &reservation(15),
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            &[],
        );

        assert!(changed);
        assert_eq!(customer.total_visits, 5);
        assert_eq!(customer.vip_level, 1);
        assert!(customer.vip_status);
        assert_eq!(customer.last_visit_date, Some(date(15)));
    }

    #[test]
    fn test_last_visit_keeps_later_date() {
        let config = config();
        let updater = CustomerAggregateUpdater::new(&config);

        let mut customer = Customer::new(CustomerId(1), "Mia");
        customer.last_visit_date = Some(date(20));

        updater.apply_status_change(
            &mut customer,
            &reservation(15),
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
            &[],
        );
        assert_eq!(customer.last_visit_date, Some(date(20)));
    }

    #[test]
    fn test_reversal_recomputes_from_lookup() {
        let config = config();
        let updater = CustomerAggregateUpdater::new(&config);

        let mut customer = Customer::new(CustomerId(1), "Mia");
        customer.total_visits = 3;
        customer.last_visit_date = Some(date(20));

        // Reversing the day-20 completion; days 10 and 12 remain completed
        let changed = updater.apply_status_change(
            &mut customer,
            &reservation(20),
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            &[date(10), date(12)],
        );

        assert!(changed);
        assert_eq!(customer.total_visits, 2);
        assert_eq!(customer.last_visit_date, Some(date(12)));
    }

    #[test]
    fn test_reversal_floors_at_zero() {
        let config = config();
        let updater = CustomerAggregateUpdater::new(&config);

        let mut customer = Customer::new(CustomerId(1), "Mia");
        updater.apply_status_change(
            &mut customer,
            &reservation(15),
            ReservationStatus::Completed,
            ReservationStatus::Cancelled,
            &[],
        );
        assert_eq!(customer.total_visits, 0);
        assert_eq!(customer.last_visit_date, None);
    }

    #[test]
    fn test_non_completion_transitions_are_neutral() {
        let config = config();
        let updater = CustomerAggregateUpdater::new(&config);

        let mut customer = Customer::new(CustomerId(1), "Mia");
        customer.total_visits = 4;

        for (old, new) in [
            (ReservationStatus::Pending, ReservationStatus::Confirmed),
            (ReservationStatus::Pending, ReservationStatus::Cancelled),
            (ReservationStatus::Confirmed, ReservationStatus::Cancelled),
        ] {
            let changed =
                updater.apply_status_change(&mut customer, &reservation(15), old, new, &[]);
            assert!(!changed);
            assert_eq!(customer.total_visits, 4);
        }
    }

    #[test]
    fn test_completion_and_reversal_sequence() {
        let config = config();
        let updater = CustomerAggregateUpdater::new(&config);
        let mut customer = Customer::new(CustomerId(1), "Mia");

        // N completions, M reversals -> max(0, N - M)
        for _ in 0..3 {
            updater.apply_status_change(
                &mut customer,
                &reservation(15),
                ReservationStatus::Confirmed,
                ReservationStatus::Completed,
                &[],
            );
        }
        for _ in 0..5 {
            updater.apply_status_change(
                &mut customer,
                &reservation(15),
                ReservationStatus::Completed,
                ReservationStatus::Cancelled,
                &[],
            );
        }
        assert_eq!(customer.total_visits, 0);
    }
}
