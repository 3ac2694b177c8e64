//! In-memory local repository implementation.
//!
//! Stores all data in HashMaps behind a single `RwLock`, providing fast,
//! deterministic and isolated execution for unit tests and local
//! development.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{Customer, CustomerId, CustomerNote, Reservation, ReservationId};
use crate::db::repository::{
    CustomerRepository, ErrorContext, RepositoryError, RepositoryResult, ReservationRepository,
};

/// In-memory local repository.
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    reservations: HashMap<ReservationId, Reservation>,
    customers: HashMap<CustomerId, Customer>,

    // ID counters
    next_reservation_id: i64,
    next_customer_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            reservations: HashMap::new(),
            customers: HashMap::new(),
            next_reservation_id: 1,
            next_customer_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a customer, assigning its ID. Helper for setting up data.
    pub fn add_customer(&self, mut customer: Customer) -> CustomerId {
        let mut data = self.data.write().unwrap();
        let id = CustomerId(data.next_customer_id);
        data.next_customer_id += 1;
        customer.id = id;
        data.customers.insert(id, customer);
        id
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of reservations stored.
    pub fn reservation_count(&self) -> usize {
        self.data.read().unwrap().reservations.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

#[async_trait]
impl ReservationRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn find_for_stylist_date(
        &self,
        stylist: &str,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<Reservation>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let mut found: Vec<Reservation> = data
            .reservations
            .values()
            .filter(|r| r.stylist == stylist && r.date == date)
            .cloned()
            .collect();
        found.sort_by_key(|r| (r.time, r.id));
        Ok(found)
    }

    async fn find_reservation(&self, id: ReservationId) -> RepositoryResult<Reservation> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.reservations.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Reservation {} not found", id),
                ErrorContext::new("find_reservation")
                    .with_entity("reservation")
                    .with_entity_id(id),
            )
        })
    }

    async fn insert_reservation(
        &self,
        mut reservation: Reservation,
    ) -> RepositoryResult<Reservation> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let id = ReservationId(data.next_reservation_id);
        data.next_reservation_id += 1;
        reservation.id = id;
        data.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn update_reservation(&self, reservation: &Reservation) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        if !data.reservations.contains_key(&reservation.id) {
            return Err(RepositoryError::not_found(format!(
                "Reservation {} not found",
                reservation.id
            )));
        }
        data.reservations.insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn find_completed_dates(
        &self,
        customer_id: CustomerId,
    ) -> RepositoryResult<Vec<NaiveDate>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        Ok(data
            .reservations
            .values()
            .filter(|r| {
                r.customer_id == customer_id
                    && r.status == crate::api::ReservationStatus::Completed
            })
            .map(|r| r.date)
            .collect())
    }
}

#[async_trait]
impl CustomerRepository for LocalRepository {
    async fn find_customer(&self, id: CustomerId) -> RepositoryResult<Customer> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.customers.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Customer {} not found", id),
                ErrorContext::new("find_customer")
                    .with_entity("customer")
                    .with_entity_id(id),
            )
        })
    }

    async fn save_customer(&self, customer: &Customer) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.customers.insert(customer.id, customer.clone());
        Ok(())
    }

    async fn append_customer_note(
        &self,
        id: CustomerId,
        note: CustomerNote,
    ) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        let customer = data.customers.get_mut(&id).ok_or_else(|| {
            RepositoryError::not_found(format!("Customer {} not found", id))
        })?;
        customer.notes.push(note);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ReservationStatus;
    use chrono::{NaiveTime, Utc};

    fn make_reservation(stylist: &str, date: NaiveDate, hour: u32) -> Reservation {
        Reservation {
            id: ReservationId(0),
            customer_id: CustomerId(1),
            stylist: stylist.to_string(),
            service_type: "cut".to_string(),
            date,
            time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            duration_minutes: 30,
            status: ReservationStatus::Confirmed,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_assigns_ids() {
        let repo = LocalRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();

        let first = repo
            .insert_reservation(make_reservation("Sarah", date, 10))
            .await
            .unwrap();
        let second = repo
            .insert_reservation(make_reservation("Sarah", date, 11))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repo.reservation_count(), 2);
    }

    #[tokio::test]
    async fn test_find_for_stylist_date_filters() {
        let repo = LocalRepository::new();
        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let other_date = NaiveDate::from_ymd_opt(2025, 9, 16).unwrap();

        repo.insert_reservation(make_reservation("Sarah", date, 10))
            .await
            .unwrap();
        repo.insert_reservation(make_reservation("Sarah", other_date, 10))
            .await
            .unwrap();
        repo.insert_reservation(make_reservation("Anna", date, 10))
            .await
            .unwrap();

        let found = repo.find_for_stylist_date("Sarah", date).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].stylist, "Sarah");
        assert_eq!(found[0].date, date);
    }

    #[tokio::test]
    async fn test_not_found_errors() {
        let repo = LocalRepository::new();

        let result = repo.find_reservation(ReservationId(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));

        let result = repo.find_customer(CustomerId(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unhealthy_store_rejects_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let date = NaiveDate::from_ymd_opt(2025, 9, 15).unwrap();
        let result = repo.find_for_stylist_date("Sarah", date).await;
        assert!(matches!(result, Err(RepositoryError::ConnectionError { .. })));
    }

    #[tokio::test]
    async fn test_append_note_is_append_only() {
        let repo = LocalRepository::new();
        let id = repo.add_customer(Customer::new(CustomerId(0), "Mia"));

        for text in ["first visit", "allergic to product X"] {
            repo.append_customer_note(
                id,
                CustomerNote {
                    text: text.to_string(),
                    is_important: false,
                    author: "reception".to_string(),
                    created_at: Utc::now(),
                },
            )
            .await
            .unwrap();
        }

        let customer = repo.find_customer(id).await.unwrap();
        assert_eq!(customer.notes.len(), 2);
        assert_eq!(customer.notes[0].text, "first visit");
    }
}
