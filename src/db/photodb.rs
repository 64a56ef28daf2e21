use async_trait::async_trait;

use crate::{
    db::db::{map_write_error, DBClient},
    dtos::photodtos::SavePhotoDto,
    models::photomodel::Photo,
    service::error::ServiceError,
};

#[async_trait]
pub trait PhotoExt {
    /// Stores the photo under `fotogalerie/<property-id>/<filename>`.
    async fn create_photo(&self, data: SavePhotoDto) -> Result<Photo, ServiceError>;

    async fn update_photo(&self, photo_id: i64, data: SavePhotoDto) -> Result<Photo, ServiceError>;

    async fn get_photo(&self, photo_id: i64) -> Result<Option<Photo>, ServiceError>;

    /// Ordered by caption.
    async fn list_photos(&self) -> Result<Vec<Photo>, ServiceError>;

    async fn list_property_photos(&self, property_id: i64) -> Result<Vec<Photo>, ServiceError>;

    async fn delete_photo(&self, photo_id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
impl PhotoExt for DBClient {
    async fn create_photo(&self, data: SavePhotoDto) -> Result<Photo, ServiceError> {
        data.check()?;
        let image = data.image_path()?;
        self.require("properties", "property", data.property_id).await?;

        let photo = sqlx::query_as::<_, Photo>(
            r#"
                INSERT INTO photos (image, property_id, caption)
                VALUES ($1, $2, $3)
                RETURNING id, image, property_id, caption
            "#,
        )
        .bind(image)
        .bind(data.property_id)
        .bind(&data.caption)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(photo)
    }

    async fn update_photo(&self, photo_id: i64, data: SavePhotoDto) -> Result<Photo, ServiceError> {
        data.check()?;
        let image = data.image_path()?;
        self.require("properties", "property", data.property_id).await?;

        sqlx::query_as::<_, Photo>(
            r#"
                UPDATE photos
                SET image = $2, property_id = $3, caption = $4
                WHERE id = $1
                RETURNING id, image, property_id, caption
            "#,
        )
        .bind(photo_id)
        .bind(image)
        .bind(data.property_id)
        .bind(&data.caption)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or_else(|| ServiceError::not_found("photo", photo_id))
    }

    async fn get_photo(&self, photo_id: i64) -> Result<Option<Photo>, ServiceError> {
        let photo = sqlx::query_as::<_, Photo>(
            "SELECT id, image, property_id, caption FROM photos WHERE id = $1",
        )
        .bind(photo_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    async fn list_photos(&self) -> Result<Vec<Photo>, ServiceError> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT id, image, property_id, caption FROM photos ORDER BY caption, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    async fn list_property_photos(&self, property_id: i64) -> Result<Vec<Photo>, ServiceError> {
        self.require("properties", "property", property_id).await?;

        let photos = sqlx::query_as::<_, Photo>(
            r#"
                SELECT id, image, property_id, caption
                FROM photos
                WHERE property_id = $1
                ORDER BY caption, id
            "#,
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    async fn delete_photo(&self, photo_id: i64) -> Result<(), ServiceError> {
        let deleted = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(photo_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(ServiceError::not_found("photo", photo_id));
        }
        Ok(())
    }
}
