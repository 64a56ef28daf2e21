use async_trait::async_trait;

use crate::{
    db::db::{map_write_error, DBClient},
    dtos::clientdtos::SaveClientDto,
    models::clientmodel::Client,
    service::error::ServiceError,
};

#[async_trait]
pub trait ClientExt {
    async fn create_client(&self, data: SaveClientDto) -> Result<Client, ServiceError>;

    async fn update_client(&self, client_id: i64, data: SaveClientDto) -> Result<Client, ServiceError>;

    async fn get_client(&self, client_id: i64) -> Result<Option<Client>, ServiceError>;

    /// Ordered by last name, then first name.
    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError>;

    /// Removes the client together with their reservations and reviews.
    async fn delete_client(&self, client_id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
impl ClientExt for DBClient {
    async fn create_client(&self, data: SaveClientDto) -> Result<Client, ServiceError> {
        data.check()?;

        let client = sqlx::query_as::<_, Client>(
            r#"
                INSERT INTO clients (first_name, last_name, email, phone)
                VALUES ($1, $2, $3, $4)
                RETURNING id, first_name, last_name, email, phone
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(client)
    }

    async fn update_client(&self, client_id: i64, data: SaveClientDto) -> Result<Client, ServiceError> {
        data.check()?;

        sqlx::query_as::<_, Client>(
            r#"
                UPDATE clients
                SET first_name = $2, last_name = $3, email = $4, phone = $5
                WHERE id = $1
                RETURNING id, first_name, last_name, email, phone
            "#,
        )
        .bind(client_id)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.email)
        .bind(&data.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| ServiceError::not_found("client", client_id))
    }

    async fn get_client(&self, client_id: i64) -> Result<Option<Client>, ServiceError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, first_name, last_name, email, phone FROM clients WHERE id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(client)
    }

    async fn list_clients(&self) -> Result<Vec<Client>, ServiceError> {
        let clients = sqlx::query_as::<_, Client>(
            r#"
                SELECT id, first_name, last_name, email, phone
                FROM clients
                ORDER BY last_name, first_name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(clients)
    }

    async fn delete_client(&self, client_id: i64) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM reservations WHERE client_id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM reviews WHERE client_id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(client_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ServiceError::not_found("client", client_id));
        }

        tx.commit().await?;
        Ok(())
    }
}
