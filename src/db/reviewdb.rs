use async_trait::async_trait;

use crate::{
    db::db::DBClient,
    dtos::reviewdtos::SaveReviewDto,
    models::reviewmodel::Review,
    service::{error::ServiceError, validation::today},
};

#[async_trait]
pub trait ReviewExt {
    /// Stamps the review date with today's date.
    async fn create_review(&self, data: SaveReviewDto) -> Result<Review, ServiceError>;

    /// Leaves the review date untouched.
    async fn update_review(&self, review_id: i64, data: SaveReviewDto) -> Result<Review, ServiceError>;

    async fn get_review(&self, review_id: i64) -> Result<Option<Review>, ServiceError>;

    /// Ordered by property, newest first within a property.
    async fn list_reviews(&self) -> Result<Vec<Review>, ServiceError>;

    async fn delete_review(&self, review_id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(&self, data: SaveReviewDto) -> Result<Review, ServiceError> {
        data.check()?;
        let grade = data.grade()?;
        self.require("clients", "client", data.client_id).await?;
        self.require("properties", "property", data.property_id).await?;

        let review = sqlx::query_as::<_, Review>(
            r#"
                INSERT INTO reviews (client_id, property_id, positives, negatives, grade, review_date)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, client_id, property_id, positives, negatives, grade, review_date
            "#,
        )
        .bind(data.client_id)
        .bind(data.property_id)
        .bind(&data.positives)
        .bind(&data.negatives)
        .bind(grade)
        .bind(today())
        .fetch_one(&self.pool)
        .await?;

        Ok(review)
    }

    async fn update_review(&self, review_id: i64, data: SaveReviewDto) -> Result<Review, ServiceError> {
        data.check()?;
        let grade = data.grade()?;
        self.require("clients", "client", data.client_id).await?;
        self.require("properties", "property", data.property_id).await?;

        sqlx::query_as::<_, Review>(
            r#"
                UPDATE reviews
                SET client_id = $2, property_id = $3, positives = $4, negatives = $5, grade = $6
                WHERE id = $1
                RETURNING id, client_id, property_id, positives, negatives, grade, review_date
            "#,
        )
        .bind(review_id)
        .bind(data.client_id)
        .bind(data.property_id)
        .bind(&data.positives)
        .bind(&data.negatives)
        .bind(grade)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::not_found("review", review_id))
    }

    async fn get_review(&self, review_id: i64) -> Result<Option<Review>, ServiceError> {
        let review = sqlx::query_as::<_, Review>(
            r#"
                SELECT id, client_id, property_id, positives, negatives, grade, review_date
                FROM reviews
                WHERE id = $1
            "#,
        )
        .bind(review_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(review)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, ServiceError> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
                SELECT r.id, r.client_id, r.property_id, r.positives, r.negatives, r.grade, r.review_date
                FROM reviews r
                JOIN properties p ON p.id = r.property_id
                ORDER BY p.label, p.id, r.review_date DESC, r.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn delete_review(&self, review_id: i64) -> Result<(), ServiceError> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(review_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(ServiceError::not_found("review", review_id));
        }
        Ok(())
    }
}
