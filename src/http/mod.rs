//! HTTP server module for the salon backend.
//!
//! This module exposes the scheduling engine as a REST API. It reuses the
//! service layer and repository pattern from the core library; handlers
//! only parse requests and translate errors.

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
