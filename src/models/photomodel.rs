use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Gallery photo. `property_id` becomes `None` once the owning property is
/// deleted; the stored `image` path is kept as it was.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Photo {
    pub id: i64,
    pub image: String,
    pub property_id: Option<i64>,
    pub caption: String,
}

impl Photo {
    pub fn is_orphaned(&self) -> bool {
        self.property_id.is_none()
    }
}
