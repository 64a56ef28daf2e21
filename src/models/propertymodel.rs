use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Accommodation listing ("Ubytování"). The equipment set lives in the
/// `property_equipment` junction and is loaded separately.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Property {
    pub id: i64,
    pub label: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub contact: String,
    pub phone: String,
    pub email: String,
    pub description: String,
    pub rooms: i32,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.label, self.city, self.address)
    }
}

/// What a cascading property delete touched.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub reservations_removed: u64,
    pub reviews_removed: u64,
    pub photos_orphaned: u64,
}
