use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use crate::{
    db::db::{map_write_error, DBClient},
    dtos::propertydtos::SavePropertyDto,
    models::{
        equipmentmodel::Equipment,
        propertymodel::{DeleteSummary, Property},
    },
    service::error::ServiceError,
};

const PROPERTY_COLUMNS: &str =
    "id, label, address, city, postal_code, contact, phone, email, description, rooms";

#[async_trait]
pub trait PropertyExt {
    /// Creates the listing and attaches `data.equipment` in one write.
    async fn create_property(&self, data: SavePropertyDto) -> Result<Property, ServiceError>;

    /// Overwrites all fields and replaces the equipment set.
    async fn update_property(
        &self,
        property_id: i64,
        data: SavePropertyDto,
    ) -> Result<Property, ServiceError>;

    async fn get_property(&self, property_id: i64) -> Result<Option<Property>, ServiceError>;

    /// Ordered by label.
    async fn list_properties(&self) -> Result<Vec<Property>, ServiceError>;

    /// Properties with strictly more than `rooms` rooms, ordered by label.
    async fn list_properties_with_rooms_over(&self, rooms: i32) -> Result<Vec<Property>, ServiceError>;

    async fn property_equipment(&self, property_id: i64) -> Result<Vec<Equipment>, ServiceError>;

    /// Idempotent.
    async fn add_property_equipment(
        &self,
        property_id: i64,
        equipment_id: i64,
    ) -> Result<(), ServiceError>;

    /// Idempotent.
    async fn remove_property_equipment(
        &self,
        property_id: i64,
        equipment_id: i64,
    ) -> Result<(), ServiceError>;

    /// Cascades to reservations and reviews; photos stay with a cleared
    /// property reference.
    async fn delete_property(&self, property_id: i64) -> Result<DeleteSummary, ServiceError>;
}

impl DBClient {
    async fn replace_equipment(
        tx: &mut Transaction<'_, Postgres>,
        property_id: i64,
        equipment_ids: &[i64],
    ) -> Result<(), ServiceError> {
        let known: Vec<i64> = sqlx::query_scalar("SELECT id FROM equipment WHERE id = ANY($1)")
            .bind(equipment_ids)
            .fetch_all(&mut **tx)
            .await?;

        if let Some(missing) = equipment_ids.iter().find(|id| !known.contains(id)) {
            return Err(ServiceError::not_found("equipment", *missing));
        }

        sqlx::query("DELETE FROM property_equipment WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            r#"
                INSERT INTO property_equipment (property_id, equipment_id)
                SELECT $1, equipment_id FROM UNNEST($2::BIGINT[]) AS t(equipment_id)
            "#,
        )
        .bind(property_id)
        .bind(equipment_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PropertyExt for DBClient {
    async fn create_property(&self, data: SavePropertyDto) -> Result<Property, ServiceError> {
        data.check()?;

        let mut tx = self.pool.begin().await?;

        let property = sqlx::query_as::<_, Property>(&format!(
            r#"
                INSERT INTO properties (label, address, city, postal_code, contact, phone, email, description, rooms)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING {}
            "#,
            PROPERTY_COLUMNS
        ))
        .bind(&data.label)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.postal_code)
        .bind(&data.contact)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.description)
        .bind(data.rooms)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        Self::replace_equipment(&mut tx, property.id, &data.equipment_ids()).await?;

        tx.commit().await?;
        Ok(property)
    }

    async fn update_property(
        &self,
        property_id: i64,
        data: SavePropertyDto,
    ) -> Result<Property, ServiceError> {
        data.check()?;

        let mut tx = self.pool.begin().await?;

        let property = sqlx::query_as::<_, Property>(&format!(
            r#"
                UPDATE properties
                SET label = $2, address = $3, city = $4, postal_code = $5, contact = $6,
                    phone = $7, email = $8, description = $9, rooms = $10
                WHERE id = $1
                RETURNING {}
            "#,
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .bind(&data.label)
        .bind(&data.address)
        .bind(&data.city)
        .bind(&data.postal_code)
        .bind(&data.contact)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.description)
        .bind(data.rooms)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| ServiceError::not_found("property", property_id))?;

        Self::replace_equipment(&mut tx, property.id, &data.equipment_ids()).await?;

        tx.commit().await?;
        Ok(property)
    }

    async fn get_property(&self, property_id: i64) -> Result<Option<Property>, ServiceError> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties WHERE id = $1",
            PROPERTY_COLUMNS
        ))
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(property)
    }

    async fn list_properties(&self) -> Result<Vec<Property>, ServiceError> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties ORDER BY label, id",
            PROPERTY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn list_properties_with_rooms_over(&self, rooms: i32) -> Result<Vec<Property>, ServiceError> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {} FROM properties WHERE rooms > $1 ORDER BY label, id",
            PROPERTY_COLUMNS
        ))
        .bind(rooms)
        .fetch_all(&self.pool)
        .await?;

        Ok(properties)
    }

    async fn property_equipment(&self, property_id: i64) -> Result<Vec<Equipment>, ServiceError> {
        self.require("properties", "property", property_id).await?;

        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
                SELECT e.id, e.name, e.symbol
                FROM equipment e
                JOIN property_equipment pe ON pe.equipment_id = e.id
                WHERE pe.property_id = $1
                ORDER BY e.name, e.id
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(equipment)
    }

    async fn add_property_equipment(
        &self,
        property_id: i64,
        equipment_id: i64,
    ) -> Result<(), ServiceError> {
        self.require("properties", "property", property_id).await?;
        self.require("equipment", "equipment", equipment_id).await?;

        sqlx::query(
            r#"
                INSERT INTO property_equipment (property_id, equipment_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
            "#,
        )
        .bind(property_id)
        .bind(equipment_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove_property_equipment(
        &self,
        property_id: i64,
        equipment_id: i64,
    ) -> Result<(), ServiceError> {
        self.require("properties", "property", property_id).await?;

        sqlx::query("DELETE FROM property_equipment WHERE property_id = $1 AND equipment_id = $2")
            .bind(property_id)
            .bind(equipment_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_property(&self, property_id: i64) -> Result<DeleteSummary, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let reservations = sqlx::query("DELETE FROM reservations WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        let reviews = sqlx::query("DELETE FROM reviews WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        let photos = sqlx::query("UPDATE photos SET property_id = NULL WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM property_equipment WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;
        let deleted = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(ServiceError::not_found("property", property_id));
        }

        tx.commit().await?;

        Ok(DeleteSummary {
            reservations_removed: reservations.rows_affected(),
            reviews_removed: reviews.rows_affected(),
            photos_orphaned: photos.rows_affected(),
        })
    }
}
