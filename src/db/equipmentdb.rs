use async_trait::async_trait;

use crate::{
    db::db::{map_write_error, DBClient},
    dtos::equipmentdtos::SaveEquipmentDto,
    models::equipmentmodel::Equipment,
    service::error::ServiceError,
};

#[async_trait]
pub trait EquipmentExt {
    async fn create_equipment(&self, data: SaveEquipmentDto) -> Result<Equipment, ServiceError>;

    async fn update_equipment(
        &self,
        equipment_id: i64,
        data: SaveEquipmentDto,
    ) -> Result<Equipment, ServiceError>;

    async fn get_equipment(&self, equipment_id: i64) -> Result<Option<Equipment>, ServiceError>;

    /// Alphabetical by name.
    async fn list_equipment(&self) -> Result<Vec<Equipment>, ServiceError>;

    /// Also detaches the tag from every property carrying it.
    async fn delete_equipment(&self, equipment_id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
impl EquipmentExt for DBClient {
    async fn create_equipment(&self, data: SaveEquipmentDto) -> Result<Equipment, ServiceError> {
        data.check()?;
        let symbol = data.symbol_path()?;

        let equipment = sqlx::query_as::<_, Equipment>(
            "INSERT INTO equipment (name, symbol) VALUES ($1, $2) RETURNING id, name, symbol",
        )
        .bind(&data.name)
        .bind(symbol)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(equipment)
    }

    async fn update_equipment(
        &self,
        equipment_id: i64,
        data: SaveEquipmentDto,
    ) -> Result<Equipment, ServiceError> {
        data.check()?;
        let symbol = data.symbol_path()?;

        sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET name = $2, symbol = $3 WHERE id = $1 RETURNING id, name, symbol",
        )
        .bind(equipment_id)
        .bind(&data.name)
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| ServiceError::not_found("equipment", equipment_id))
    }

    async fn get_equipment(&self, equipment_id: i64) -> Result<Option<Equipment>, ServiceError> {
        let equipment = sqlx::query_as::<_, Equipment>(
            "SELECT id, name, symbol FROM equipment WHERE id = $1",
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(equipment)
    }

    async fn list_equipment(&self) -> Result<Vec<Equipment>, ServiceError> {
        let equipment = sqlx::query_as::<_, Equipment>(
            "SELECT id, name, symbol FROM equipment ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(equipment)
    }

    async fn delete_equipment(&self, equipment_id: i64) -> Result<(), ServiceError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM property_equipment WHERE equipment_id = $1")
            .bind(equipment_id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(equipment_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ServiceError::not_found("equipment", equipment_id));
        }

        tx.commit().await?;
        Ok(())
    }
}
