//! Error types for scheduling operations.
//!
//! Every failure of the scheduling core is a typed, recoverable result.
//! Each variant carries a stable code for programmatic handling; the
//! messages are human-readable detail and not part of the contract.

use chrono::{NaiveDate, NaiveTime};

use crate::api::{CustomerId, ReservationId, ReservationStatus};
use crate::db::repository::RepositoryError;

/// Result type for scheduling operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Error type for the scheduling core.
#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    /// A required field is missing or malformed, or the date is in the past.
    #[error("Invalid reservation request: {0}")]
    Structural(String),

    /// The requested slot falls outside the configured opening window.
    #[error("{stylist} is not bookable at {date} {time}: outside business hours")]
    OutsideBusinessHours {
        stylist: String,
        date: NaiveDate,
        time: NaiveTime,
    },

    /// The stylist already holds an overlapping reservation.
    #[error("{stylist} already has a reservation at {date} {time}")]
    SlotConflict {
        stylist: String,
        date: NaiveDate,
        time: NaiveTime,
    },

    /// The stylist's concurrent-customer limit is reached.
    #[error("{stylist} is fully booked at {date} {time} (capacity {capacity})")]
    CapacityExceeded {
        stylist: String,
        date: NaiveDate,
        time: NaiveTime,
        capacity: u32,
    },

    /// The requested status change is not a legal state-machine edge.
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// The reservation id cannot be resolved. A permanent miss, not a
    /// retryable storage failure.
    #[error("Reservation {0} not found")]
    ReservationNotFound(ReservationId),

    /// The reservation's customer reference cannot be resolved.
    #[error("Customer {0} not found")]
    CustomerNotFound(CustomerId),

    /// The persistence layer failed; the caller decides whether to retry.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] RepositoryError),
}

impl SchedulingError {
    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Structural(_) => "VALIDATION_STRUCTURAL",
            Self::OutsideBusinessHours { .. } => "OUTSIDE_BUSINESS_HOURS",
            Self::SlotConflict { .. } => "SLOT_CONFLICT",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ReservationNotFound(_) => "RESERVATION_NOT_FOUND",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
        }
    }
}
