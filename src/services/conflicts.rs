//! Slot conflict detection for stylist double-booking.

use crate::api::{Reservation, ReservationId, SlotInterval};

/// Detects overlaps between a proposed interval and a stylist's existing
/// bookings on one date.
///
/// Callers supply only the reservations fetched for that stylist and date,
/// which bounds the scan independent of total reservation volume.
pub struct SlotConflictDetector;

impl SlotConflictDetector {
    /// Reservations that occupy a slot overlapping `interval`.
    ///
    /// Two intervals conflict iff their `[start, end)` ranges strictly
    /// overlap; touching endpoints do not conflict. Only pending and
    /// confirmed reservations occupy slots. `exclude` lets an update
    /// re-validate a reservation against all other bookings.
    pub fn conflicts<'a>(
        existing: &'a [Reservation],
        interval: SlotInterval,
        exclude: Option<ReservationId>,
    ) -> Vec<&'a Reservation> {
        existing
            .iter()
            .filter(|r| Some(r.id) != exclude)
            .filter(|r| r.status.occupies_slot())
            .filter(|r| r.interval().overlaps(&interval))
            .collect()
    }

    /// Whether any existing booking conflicts with `interval`.
    pub fn has_conflict(
        existing: &[Reservation],
        interval: SlotInterval,
        exclude: Option<ReservationId>,
    ) -> bool {
        !Self::conflicts(existing, interval, exclude).is_empty()
    }
}
