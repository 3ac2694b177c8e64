//! Service layer: the reservation scheduling core.
//!
//! This is the only subsystem with real invariants. Policies and detectors
//! are pure over supplied data; the lifecycle manager orchestrates
//! validate -> persist -> aggregate update as one logical unit.

pub mod aggregates;
pub mod business_hours;
pub mod conflicts;
pub mod error;
pub mod lifecycle;
pub mod validation;

pub use aggregates::CustomerAggregateUpdater;
pub use business_hours::BusinessHoursPolicy;
pub use conflicts::SlotConflictDetector;
pub use error::{SchedulingError, SchedulingResult};
pub use lifecycle::ReservationLifecycleManager;
pub use validation::ReservationValidator;
