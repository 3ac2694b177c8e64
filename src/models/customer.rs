//! Customer model with visit-derived aggregate fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::api::CustomerId;

/// A note attached to a customer record. Notes are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerNote {
    pub text: String,
    #[serde(default)]
    pub is_important: bool,
    /// Staff member who wrote the note.
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A salon customer.
///
/// `total_visits`, `last_visit_date`, `vip_level` and `vip_status` are
/// derived from completed reservations and maintained incrementally by the
/// aggregate updater; they are never recomputed on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Count of this customer's completed reservations.
    #[serde(default)]
    pub total_visits: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_visit_date: Option<NaiveDate>,
    /// Tier derived from `total_visits` via configured thresholds.
    #[serde(default)]
    pub vip_level: u32,
    #[serde(default)]
    pub vip_status: bool,
    #[serde(default)]
    pub notes: Vec<CustomerNote>,
}

impl Customer {
    /// Create a customer with empty visit history.
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
            phone: None,
            total_visits: 0,
            last_visit_date: None,
            vip_level: 0,
            vip_status: false,
            notes: Vec::new(),
        }
    }
}
