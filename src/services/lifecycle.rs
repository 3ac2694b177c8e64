//! Reservation lifecycle orchestration.
//!
//! `ReservationLifecycleManager` runs validate -> persist -> aggregate
//! update as one logical unit. The conflict check and the persist form a
//! check-then-act sequence, so the manager holds a per-stylist mutex across
//! both; two concurrent requests for the same stylist serialize and the
//! loser observes the same `SLOT_CONFLICT` it would have seen sequentially.
//! Status transitions serialize per reservation so the edge check always
//! runs against the latest persisted status, and aggregate updates take a
//! per-customer mutex so concurrent completions never lose a visit-count
//! increment.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::{info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;

use crate::api::{Reservation, ReservationId, ReservationRequest, ReservationStatus};
use crate::config::SchedulingConfig;
use crate::db::repository::FullRepository;
use crate::services::aggregates::CustomerAggregateUpdater;
use crate::services::business_hours::BusinessHoursPolicy;
use crate::services::conflicts::SlotConflictDetector;
use crate::services::error::{SchedulingError, SchedulingResult};
use crate::services::validation::ReservationValidator;

/// Clock source, injectable for tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Orchestrates reservation creation, rescheduling and status transitions.
pub struct ReservationLifecycleManager {
    repository: Arc<dyn FullRepository>,
    config: SchedulingConfig,
    clock: Clock,
    // Guards are held across repository awaits, so the slot locks are
    // tokio mutexes; parking_lot only protects the registry maps.
    stylist_locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
    reservation_locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
    customer_locks: Mutex<HashMap<i64, Arc<AsyncMutex<()>>>>,
}

impl ReservationLifecycleManager {
    pub fn new(repository: Arc<dyn FullRepository>, config: SchedulingConfig) -> Self {
        Self::with_clock(repository, config, Arc::new(Utc::now))
    }

    /// Build a manager with an injected clock, used by tests to pin "now".
    pub fn with_clock(
        repository: Arc<dyn FullRepository>,
        config: SchedulingConfig,
        clock: Clock,
    ) -> Self {
        Self {
            repository,
            config,
            clock,
            stylist_locks: Mutex::new(HashMap::new()),
            reservation_locks: Mutex::new(HashMap::new()),
            customer_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn stylist_lock(&self, stylist: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.stylist_locks.lock();
        locks
            .entry(stylist.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn reservation_lock(&self, id: ReservationId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.reservation_locks.lock();
        locks
            .entry(id.value())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    fn customer_lock(&self, customer_id: i64) -> Arc<AsyncMutex<()>> {
        let mut locks = self.customer_locks.lock();
        locks
            .entry(customer_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Fetch a reservation, mapping a repository miss to the typed
    /// not-found error so callers never see a permanent miss labeled as a
    /// retryable storage failure.
    async fn load_reservation(&self, id: ReservationId) -> SchedulingResult<Reservation> {
        self.repository.find_reservation(id).await.map_err(|e| {
            if e.is_not_found() {
                SchedulingError::ReservationNotFound(id)
            } else {
                SchedulingError::StorageUnavailable(e)
            }
        })
    }

    /// Create a reservation.
    ///
    /// Runs the validator and persists only on acceptance; nothing is
    /// stored on rejection. The reservation starts as `pending`, or
    /// `confirmed` when the request pre-authorizes it.
    pub async fn create(&self, request: ReservationRequest) -> SchedulingResult<Reservation> {
        // Resolve the customer reference before taking any lock; a missing
        // customer fails this operation without touching aggregates.
        self.repository
            .find_customer(request.customer_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    SchedulingError::CustomerNotFound(request.customer_id)
                } else {
                    SchedulingError::StorageUnavailable(e)
                }
            })?;

        let lock = self.stylist_lock(request.stylist.trim());
        let _guard = lock.lock().await;

        let existing = self
            .repository
            .find_for_stylist_date(request.stylist.trim(), request.date)
            .await?;

        let validator = ReservationValidator::new(&self.config);
        let normalized =
            validator.validate(&request, &existing, None, self.now().date_naive())?;

        let now = self.now();
        let reservation = Reservation {
            id: ReservationId(0),
            customer_id: normalized.customer_id,
            stylist: normalized.stylist.clone(),
            service_type: normalized.service_type.clone(),
            date: normalized.date,
            time: normalized.time,
            duration_minutes: normalized.duration_minutes,
            status: if normalized.confirmed {
                ReservationStatus::Confirmed
            } else {
                ReservationStatus::Pending
            },
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert_reservation(reservation).await?;
        info!(
            "created reservation {} for {} at {} {}",
            stored.id, stored.stylist, stored.date, stored.time
        );
        Ok(stored)
    }

    /// Move an existing reservation to a new date/time.
    ///
    /// Re-validates with the reservation itself excluded, so moving to the
    /// slot it already occupies succeeds. On rejection the stored
    /// reservation is untouched.
    pub async fn reschedule(
        &self,
        id: ReservationId,
        new_date: NaiveDate,
        new_time: NaiveTime,
    ) -> SchedulingResult<Reservation> {
        let res_lock = self.reservation_lock(id);
        let _res_guard = res_lock.lock().await;

        let mut reservation = self.load_reservation(id).await?;

        if reservation.status.is_terminal() {
            return Err(SchedulingError::InvalidTransition {
                from: reservation.status,
                to: reservation.status,
            });
        }

        let lock = self.stylist_lock(&reservation.stylist);
        let _guard = lock.lock().await;

        let existing = self
            .repository
            .find_for_stylist_date(&reservation.stylist, new_date)
            .await?;

        let request = ReservationRequest {
            customer_id: reservation.customer_id,
            stylist: reservation.stylist.clone(),
            service_type: reservation.service_type.clone(),
            date: new_date,
            time: new_time,
            duration_minutes: reservation.duration_minutes,
            confirmed: reservation.status == ReservationStatus::Confirmed,
        };

        let validator = ReservationValidator::new(&self.config);
        validator.validate(&request, &existing, Some(id), self.now().date_naive())?;

        reservation.date = new_date;
        reservation.time = new_time;
        reservation.updated_at = self.now();
        self.repository.update_reservation(&reservation).await?;

        info!(
            "rescheduled reservation {} to {} {}",
            reservation.id, reservation.date, reservation.time
        );
        Ok(reservation)
    }

    /// Transition a reservation to a new status.
    ///
    /// The whole read-check-persist-aggregate sequence runs under a
    /// per-reservation mutex, so the edge check always sees the latest
    /// persisted status and concurrent replays of the same transition
    /// cannot both pass it: the loser observes an illegal edge and a visit
    /// is never counted twice. If the aggregate write fails, the status
    /// change is rolled back before the error surfaces, leaving the
    /// transition replayable once storage recovers.
    pub async fn transition(
        &self,
        id: ReservationId,
        new_status: ReservationStatus,
    ) -> SchedulingResult<Reservation> {
        let res_lock = self.reservation_lock(id);
        let _res_guard = res_lock.lock().await;

        let mut reservation = self.load_reservation(id).await?;
        let old_status = reservation.status;

        if !old_status.can_transition_to(new_status) {
            return Err(SchedulingError::InvalidTransition {
                from: old_status,
                to: new_status,
            });
        }

        reservation.status = new_status;
        reservation.updated_at = self.now();
        self.repository.update_reservation(&reservation).await?;
        info!(
            "reservation {} transitioned {} -> {}",
            reservation.id, old_status, new_status
        );

        if let Err(e) = self
            .update_aggregates(&reservation, old_status, new_status)
            .await
        {
            // Compensate: restore the old status so the reservation and
            // the customer aggregates stay consistent and the caller can
            // replay the transition.
            reservation.status = old_status;
            reservation.updated_at = self.now();
            if let Err(rollback) = self.repository.update_reservation(&reservation).await {
                warn!(
                    "failed to roll back reservation {} to {}: {}",
                    reservation.id, old_status, rollback
                );
            } else {
                info!(
                    "rolled back reservation {} to {} after aggregate failure",
                    reservation.id, old_status
                );
            }
            return Err(e);
        }

        Ok(reservation)
    }

    async fn update_aggregates(
        &self,
        reservation: &Reservation,
        old_status: ReservationStatus,
        new_status: ReservationStatus,
    ) -> SchedulingResult<()> {
        let updater = CustomerAggregateUpdater::new(&self.config);

        let lock = self.customer_lock(reservation.customer_id.value());
        let _guard = lock.lock().await;

        let mut customer = self
            .repository
            .find_customer(reservation.customer_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    warn!(
                        "customer {} missing during aggregate update of reservation {}",
                        reservation.customer_id, reservation.id
                    );
                    SchedulingError::CustomerNotFound(reservation.customer_id)
                } else {
                    SchedulingError::StorageUnavailable(e)
                }
            })?;

        // The reversal path recomputes last_visit_date from the store;
        // the transition above is already persisted, so the reversed
        // reservation is no longer counted.
        let remaining = if old_status == ReservationStatus::Completed
            && new_status != ReservationStatus::Completed
        {
            self.repository
                .find_completed_dates(reservation.customer_id)
                .await?
        } else {
            Vec::new()
        };

        if updater.apply_status_change(
            &mut customer,
            reservation,
            old_status,
            new_status,
            &remaining,
        ) {
            self.repository.save_customer(&customer).await?;
        }
        Ok(())
    }

    /// Bookable start times for a stylist on a date.
    ///
    /// Walks the opening window on the configured slot grid and keeps the
    /// slots free of conflicts. A closed date yields an empty list.
    pub async fn availability(
        &self,
        stylist: &str,
        date: NaiveDate,
    ) -> SchedulingResult<Vec<NaiveTime>> {
        let policy = BusinessHoursPolicy::new(&self.config.hours);
        let Some(window) = policy.window_for(date) else {
            return Ok(Vec::new());
        };

        let existing = self.repository.find_for_stylist_date(stylist, date).await?;

        let mut slots = Vec::new();
        let mut time = window.open_time;
        loop {
            if !policy.is_bookable(date, time, window.slot_minutes) {
                break;
            }
            let interval = crate::api::SlotInterval::new(time, window.slot_minutes);
            if !SlotConflictDetector::has_conflict(&existing, interval, None) {
                slots.push(time);
            }
            time = match time.overflowing_add_signed(chrono::Duration::minutes(
                window.slot_minutes as i64,
            )) {
                (next, 0) => next,
                // wrapped past midnight
                _ => break,
            };
        }
        Ok(slots)
    }
}
