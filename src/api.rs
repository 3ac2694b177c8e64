//! Public API surface for the scheduling engine.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! types consumed by callers. All types derive Serialize/Deserialize for
//! JSON serialization.

pub use crate::models::business_hours::{BusinessHours, BusinessHoursTable};
pub use crate::models::customer::{Customer, CustomerNote};
pub use crate::models::reservation::{
    Reservation, ReservationRequest, ReservationStatus, SlotInterval,
};

use serde::{Deserialize, Serialize};

/// Reservation identifier (repository primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReservationId(pub i64);

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl ReservationId {
    pub fn new(value: i64) -> Self {
        ReservationId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl CustomerId {
    pub fn new(value: i64) -> Self {
        CustomerId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ReservationId> for i64 {
    fn from(id: ReservationId) -> Self {
        id.0
    }
}

impl From<CustomerId> for i64 {
    fn from(id: CustomerId) -> Self {
        id.0
    }
}
