//! Repository traits for the reservation store.
//!
//! The scheduling core talks to persistence exclusively through these
//! traits, so storage backends can be swapped without touching the service
//! layer. Implementations must be `Send + Sync` and are expected to honor
//! the serialization guarantees the lifecycle manager relies on (reads for
//! one stylist/date followed by a persist happen under the manager's lock).

mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::{Customer, CustomerId, CustomerNote, Reservation, ReservationId};

/// Repository trait for reservation storage.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Check if the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch all reservations for one stylist on one date, regardless of
    /// status. This is the only scan the conflict detector performs, which
    /// bounds its cost independent of total reservation volume.
    async fn find_for_stylist_date(
        &self,
        stylist: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Reservation>>;

    /// Fetch a single reservation by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if the reservation doesn't exist
    async fn find_reservation(&self, id: ReservationId) -> RepositoryResult<Reservation>;

    /// Persist a new reservation, assigning its ID.
    async fn insert_reservation(&self, reservation: Reservation)
        -> RepositoryResult<Reservation>;

    /// Persist changes to an existing reservation.
    async fn update_reservation(&self, reservation: &Reservation) -> RepositoryResult<()>;

    /// Dates of a customer's completed reservations, used to recompute
    /// `last_visit_date` when a completion is reversed.
    async fn find_completed_dates(&self, customer_id: CustomerId)
        -> RepositoryResult<Vec<NaiveDate>>;
}

/// Repository trait for customer records.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Fetch a customer by ID.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if the customer doesn't exist
    async fn find_customer(&self, id: CustomerId) -> RepositoryResult<Customer>;

    /// Persist a customer record (insert or replace).
    async fn save_customer(&self, customer: &Customer) -> RepositoryResult<()>;

    /// Append a note to a customer record. Notes are never rewritten.
    async fn append_customer_note(
        &self,
        id: CustomerId,
        note: CustomerNote,
    ) -> RepositoryResult<()>;
}

/// Combined repository trait for the full engine.
pub trait FullRepository: ReservationRepository + CustomerRepository {}

impl<T: ReservationRepository + CustomerRepository> FullRepository for T {}
