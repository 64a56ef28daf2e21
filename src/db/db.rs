// db/db.rs
use sqlx::{Pool, Postgres};

use crate::{
    db::{
        clientdb::ClientExt, equipmentdb::EquipmentExt, photodb::PhotoExt,
        propertydb::PropertyExt, reservationdb::ReservationExt, reviewdb::ReviewExt,
    },
    service::error::{ServiceError, Violation},
};

/// Everything the handlers need from persistence.
pub trait Store:
    ClientExt + EquipmentExt + PropertyExt + PhotoExt + ReservationExt + ReviewExt + std::fmt::Debug + Send + Sync
{
    fn backend(&self) -> &'static str;
}

#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }

    /// Whether a row with `id` exists in `table`. `table` is always one of
    /// our own constants, never user input.
    pub(crate) async fn exists(&self, table: &'static str, id: i64) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", table);
        sqlx::query_scalar::<_, bool>(&query)
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn require(
        &self,
        table: &'static str,
        entity: &'static str,
        id: i64,
    ) -> Result<(), ServiceError> {
        if self.exists(table, id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found(entity, id))
        }
    }
}

impl Store for DBClient {
    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// SQLSTATE for a value too long for its column.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

/// Unique-key failures become the same violation the in-memory store reports.
pub(crate) fn map_write_error(err: sqlx::Error) -> ServiceError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return Violation::duplicate_email().into();
        }
        if db_err.code().as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
            return Violation::Length {
                field: "__all__",
                message: "Zadaná hodnota je příliš dlouhá".to_string(),
            }
            .into();
        }
    }
    ServiceError::Database(err)
}
