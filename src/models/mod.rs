//! Domain models for the reservation scheduling engine.

pub mod business_hours;
pub mod customer;
pub mod reservation;

pub use business_hours::{BusinessHours, BusinessHoursTable};
pub use customer::{Customer, CustomerNote};
pub use reservation::{Reservation, ReservationRequest, ReservationStatus, SlotInterval};
