//! Reservation model and lifecycle status.
//!
//! A reservation ties a customer to a stylist for a `[time, time + duration)`
//! slot on a calendar date. Slot occupancy and the legal status transitions
//! are defined here; the rules that decide whether a reservation may be
//! accepted live in the service layer.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{CustomerId, ReservationId};

/// Lifecycle status of a reservation.
///
/// Legal transitions: `pending -> confirmed -> completed` and
/// `pending | confirmed -> cancelled`. `Cancelled` is terminal; `completed`
/// admits one correction edge back to `cancelled` so an erroneously
/// completed visit can be reversed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    /// Closed statuses: the appointment no longer sits in the active
    /// schedule. Only the completed -> cancelled correction edge leaves
    /// a closed status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether a reservation in this status occupies its slot.
    ///
    /// Completed and cancelled reservations do not block new bookings.
    pub fn occupies_slot(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Check a state-machine edge.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Completed, Cancelled)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// A half-open `[start, end)` time interval within one day, in minutes
/// from midnight.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInterval {
    pub start_min: u32,
    pub end_min: u32,
}

impl SlotInterval {
    /// Build an interval from a start time and a duration in minutes.
    ///
    /// The end saturates rather than wraps; a saturated interval can never
    /// slip under a closing-time bound.
    pub fn new(start: NaiveTime, duration_minutes: u32) -> Self {
        let start_min = start.num_seconds_from_midnight() / 60;
        Self {
            start_min,
            end_min: start_min.saturating_add(duration_minutes),
        }
    }

    /// Strict overlap test: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &SlotInterval) -> bool {
        self.start_min < other.end_min && other.start_min < self.end_min
    }
}

/// A booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Opaque identifier assigned by the repository at creation.
    pub id: ReservationId,
    /// Reference to the customer; not owned by the reservation.
    pub customer_id: CustomerId,
    pub stylist: String,
    pub service_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Length of the appointment. May exceed the booking grid granularity.
    pub duration_minutes: u32,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// The `[time, time + duration)` interval this reservation holds.
    pub fn interval(&self) -> SlotInterval {
        SlotInterval::new(self.time, self.duration_minutes)
    }
}

/// Incoming request to book an appointment, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub customer_id: CustomerId,
    pub stylist: String,
    pub service_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    /// Persist directly as `confirmed` when the caller pre-authorizes.
    #[serde(default)]
    pub confirmed: bool,
}

fn default_duration_minutes() -> u32 {
    30
}

impl ReservationRequest {
    /// The slot this request asks for.
    pub fn interval(&self) -> SlotInterval {
        SlotInterval::new(self.time, self.duration_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_strict_overlap() {
        let a = SlotInterval::new(t(10, 0), 30);
        let b = SlotInterval::new(t(10, 15), 30);
        let c = SlotInterval::new(t(10, 30), 30);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching endpoints do not conflict
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_interval_saturates_instead_of_wrapping() {
        let interval = SlotInterval::new(t(10, 0), u32::MAX);
        assert_eq!(interval.end_min, u32::MAX);
        // A saturated interval still overlaps everything after its start
        assert!(interval.overlaps(&SlotInterval::new(t(23, 0), 30)));
    }

    #[test]
    fn test_transition_edges() {
        use ReservationStatus::*;

        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));

        // Correction edge: an erroneously completed visit can be reversed
        assert!(Completed.can_transition_to(Cancelled));

        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Confirmed));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
    }

    #[test]
    fn test_slot_occupancy() {
        use ReservationStatus::*;
        assert!(Pending.occupies_slot());
        assert!(Confirmed.occupies_slot());
        assert!(!Completed.occupies_slot());
        assert!(!Cancelled.occupies_slot());
    }
}
