//! # Salon Reservation Scheduling Engine
//!
//! Core scheduling and conflict-resolution logic for a salon booking
//! system: business-hours policy, slot conflict detection, reservation
//! validation, customer visit aggregates and the reservation lifecycle.
//! The surrounding CRUD application (UI, auth, presentation) consumes this
//! crate through a narrow API; an optional axum REST surface is provided
//! behind the `http-server` feature.
//!
//! ## Architecture
//!
//! - [`api`]: identifier newtypes and the public type surface
//! - [`models`]: reservation, customer and business-hours records
//! - [`config`]: operator-supplied scheduling configuration (TOML)
//! - [`db`]: repository traits and the in-memory implementation
//! - [`services`]: the scheduling core (validation, conflicts, lifecycle)
//! - [`http`]: axum-based REST API over the service layer

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
