//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! scheduling engine or repository for the actual work.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use super::dto::{
    AppendNoteRequest, AvailabilityResponse, HealthResponse, RescheduleRequest,
    ReservationListResponse, StatusChangeRequest, StylistDayQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{Customer, CustomerId, CustomerNote, Reservation, ReservationId, ReservationRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store: store_status,
    }))
}

// =============================================================================
// Reservations
// =============================================================================

/// POST /v1/reservations
///
/// Create a reservation. Rejections come back as typed errors with the
/// scheduling core's stable codes.
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> Result<(axum::http::StatusCode, Json<Reservation>), AppError> {
    let reservation = state.engine.create(request).await?;
    Ok((axum::http::StatusCode::CREATED, Json(reservation)))
}

/// GET /v1/reservations?stylist=...&date=...
///
/// List a stylist's reservations for one date.
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<StylistDayQuery>,
) -> HandlerResult<ReservationListResponse> {
    let reservations = state
        .repository
        .find_for_stylist_date(&query.stylist, query.date)
        .await?;
    let total = reservations.len();

    Ok(Json(ReservationListResponse { reservations, total }))
}

/// PUT /v1/reservations/{id}/schedule
///
/// Move a reservation to a new date/time.
pub async fn reschedule_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<RescheduleRequest>,
) -> HandlerResult<Reservation> {
    let reservation = state
        .engine
        .reschedule(ReservationId::new(id), request.date, request.time)
        .await?;
    Ok(Json(reservation))
}

/// POST /v1/reservations/{id}/status
///
/// Transition a reservation through its lifecycle.
pub async fn change_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusChangeRequest>,
) -> HandlerResult<Reservation> {
    let reservation = state
        .engine
        .transition(ReservationId::new(id), request.status)
        .await?;
    Ok(Json(reservation))
}

// =============================================================================
// Availability
// =============================================================================

/// GET /v1/availability?stylist=...&date=...
///
/// Bookable time slots for a stylist on a date.
pub async fn get_availability(
    State(state): State<AppState>,
    Query(query): Query<StylistDayQuery>,
) -> HandlerResult<AvailabilityResponse> {
    let slots = state.engine.availability(&query.stylist, query.date).await?;

    Ok(Json(AvailabilityResponse {
        stylist: query.stylist,
        date: query.date,
        slots,
    }))
}

// =============================================================================
// Customers
// =============================================================================

/// GET /v1/customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Customer> {
    let customer = state.repository.find_customer(CustomerId::new(id)).await?;
    Ok(Json(customer))
}

/// POST /v1/customers/{id}/notes
///
/// Append a note to a customer record.
pub async fn append_customer_note(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AppendNoteRequest>,
) -> HandlerResult<Customer> {
    if request.text.trim().is_empty() {
        return Err(AppError::BadRequest("note text is required".to_string()));
    }

    let id = CustomerId::new(id);
    state
        .repository
        .append_customer_note(
            id,
            CustomerNote {
                text: request.text,
                is_important: request.is_important,
                author: request.author,
                created_at: Utc::now(),
            },
        )
        .await?;

    let customer = state.repository.find_customer(id).await?;
    Ok(Json(customer))
}
