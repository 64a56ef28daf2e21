use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An amenity tag. `symbol` is the stored icon path, see
/// [`crate::utils::image_utils::symbol_path`].
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub symbol: String,
}

impl fmt::Display for Equipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
