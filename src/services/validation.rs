//! Reservation request validation.
//!
//! Composes the business-hours policy and the conflict detector into an
//! ordered rule list. The first failing rule wins, so rejection reasons are
//! deterministic. Validation never has side effects; acceptance returns a
//! normalized request ready for persistence.

use chrono::NaiveDate;

use crate::api::{Reservation, ReservationId, ReservationRequest};
use crate::config::SchedulingConfig;
use crate::models::business_hours::MINUTES_PER_DAY;
use crate::services::business_hours::BusinessHoursPolicy;
use crate::services::conflicts::SlotConflictDetector;
use crate::services::error::{SchedulingError, SchedulingResult};

/// Validates reservation requests against configuration and existing
/// bookings.
pub struct ReservationValidator<'a> {
    config: &'a SchedulingConfig,
}

impl<'a> ReservationValidator<'a> {
    pub fn new(config: &'a SchedulingConfig) -> Self {
        Self { config }
    }

    /// Validate a request, in order:
    ///
    /// 1. Structural: required fields present and well-formed, date not in
    ///    the past relative to `today`.
    /// 2. Business hours: the slot lies inside the opening window.
    /// 3. Conflict: no overlapping pending/confirmed booking for the
    ///    stylist (self excluded via `exclude` on reschedule).
    /// 4. Capacity: stylists configured for more than one concurrent
    ///    customer reject only once the overlap count reaches the limit.
    ///
    /// `existing` must hold the reservations for the request's stylist and
    /// date; the caller fetches them under its serialization lock.
    pub fn validate(
        &self,
        request: &ReservationRequest,
        existing: &[Reservation],
        exclude: Option<ReservationId>,
        today: NaiveDate,
    ) -> SchedulingResult<ReservationRequest> {
        let normalized = self.check_structure(request, today)?;

        let policy = BusinessHoursPolicy::new(&self.config.hours);
        if !policy.is_bookable(normalized.date, normalized.time, normalized.duration_minutes) {
            return Err(SchedulingError::OutsideBusinessHours {
                stylist: normalized.stylist,
                date: normalized.date,
                time: normalized.time,
            });
        }

        let overlapping =
            SlotConflictDetector::conflicts(existing, normalized.interval(), exclude);
        let capacity = self.config.capacity_for(&normalized.stylist);
        if overlapping.len() as u32 >= capacity {
            return Err(if capacity == 1 {
                SchedulingError::SlotConflict {
                    stylist: normalized.stylist,
                    date: normalized.date,
                    time: normalized.time,
                }
            } else {
                SchedulingError::CapacityExceeded {
                    stylist: normalized.stylist,
                    date: normalized.date,
                    time: normalized.time,
                    capacity,
                }
            });
        }

        Ok(normalized)
    }

    fn check_structure(
        &self,
        request: &ReservationRequest,
        today: NaiveDate,
    ) -> SchedulingResult<ReservationRequest> {
        let stylist = request.stylist.trim();
        if stylist.is_empty() {
            return Err(SchedulingError::Structural("stylist is required".into()));
        }

        let service_type = request.service_type.trim();
        if service_type.is_empty() {
            return Err(SchedulingError::Structural("service type is required".into()));
        }

        if request.duration_minutes == 0 {
            return Err(SchedulingError::Structural(
                "service duration must be positive".into(),
            ));
        }

        if request.duration_minutes > MINUTES_PER_DAY {
            return Err(SchedulingError::Structural(
                "service duration must fit within one day".into(),
            ));
        }

        if request.date < today {
            return Err(SchedulingError::Structural(format!(
                "date {} is in the past",
                request.date
            )));
        }

        Ok(ReservationRequest {
            stylist: stylist.to_string(),
            service_type: service_type.to_string(),
            ..request.clone()
        })
    }
}
