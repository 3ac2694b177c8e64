//! Request and response types for the REST API.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::api::{Reservation, ReservationStatus};

/// GET /health response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

/// PUT /v1/reservations/{id}/schedule body.
#[derive(Debug, Deserialize)]
pub struct RescheduleRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// POST /v1/reservations/{id}/status body.
#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ReservationStatus,
}

/// Query parameters selecting a stylist's day.
#[derive(Debug, Deserialize)]
pub struct StylistDayQuery {
    pub stylist: String,
    pub date: NaiveDate,
}

/// GET /v1/availability response.
#[derive(Debug, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub stylist: String,
    pub date: NaiveDate,
    pub slots: Vec<NaiveTime>,
}

/// GET /v1/reservations response.
#[derive(Debug, Serialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<Reservation>,
    pub total: usize,
}

/// POST /v1/customers/{id}/notes body.
#[derive(Debug, Deserialize)]
pub struct AppendNoteRequest {
    pub text: String,
    #[serde(default)]
    pub is_important: bool,
    pub author: String,
}
