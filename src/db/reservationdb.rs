use async_trait::async_trait;

use crate::{
    db::db::DBClient,
    dtos::reservationdtos::SaveReservationDto,
    models::reservationmodel::{Reservation, ReservationListing},
    service::{error::ServiceError, validation::today},
};

const LISTING_SELECT: &str = r#"
    SELECT r.id, r.client_id, r.property_id, r.start_date, r.end_date, r.occupants, r.notes,
           c.first_name AS client_first_name, c.last_name AS client_last_name,
           p.label AS property_label, p.city AS property_city, p.address AS property_address
    FROM reservations r
    JOIN clients c ON c.id = r.client_id
    JOIN properties p ON p.id = r.property_id
"#;

#[async_trait]
pub trait ReservationExt {
    /// Date rules are judged against the current local date.
    async fn create_reservation(&self, data: SaveReservationDto) -> Result<Reservation, ServiceError>;

    /// Re-runs every save rule, including the start-date check.
    async fn update_reservation(
        &self,
        reservation_id: i64,
        data: SaveReservationDto,
    ) -> Result<Reservation, ServiceError>;

    async fn get_reservation(&self, reservation_id: i64) -> Result<Option<Reservation>, ServiceError>;

    async fn get_reservation_listing(
        &self,
        reservation_id: i64,
    ) -> Result<Option<ReservationListing>, ServiceError>;

    /// Ordered by start date, then client.
    async fn list_reservations(&self) -> Result<Vec<Reservation>, ServiceError>;

    /// Ordered by property, then start date and client.
    async fn list_reservations_by_property(&self) -> Result<Vec<ReservationListing>, ServiceError>;

    async fn delete_reservation(&self, reservation_id: i64) -> Result<(), ServiceError>;
}

impl DBClient {
    async fn require_parties(&self, data: &SaveReservationDto) -> Result<(), ServiceError> {
        self.require("clients", "client", data.client_id).await?;
        self.require("properties", "property", data.property_id).await
    }
}

#[async_trait]
impl ReservationExt for DBClient {
    async fn create_reservation(&self, data: SaveReservationDto) -> Result<Reservation, ServiceError> {
        data.check(today())?;
        self.require_parties(&data).await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
                INSERT INTO reservations (client_id, property_id, start_date, end_date, occupants, notes)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, client_id, property_id, start_date, end_date, occupants, notes
            "#,
        )
        .bind(data.client_id)
        .bind(data.property_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.occupants)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        reservation_id: i64,
        data: SaveReservationDto,
    ) -> Result<Reservation, ServiceError> {
        data.check(today())?;
        self.require_parties(&data).await?;

        sqlx::query_as::<_, Reservation>(
            r#"
                UPDATE reservations
                SET client_id = $2, property_id = $3, start_date = $4, end_date = $5,
                    occupants = $6, notes = $7
                WHERE id = $1
                RETURNING id, client_id, property_id, start_date, end_date, occupants, notes
            "#,
        )
        .bind(reservation_id)
        .bind(data.client_id)
        .bind(data.property_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.occupants)
        .bind(&data.notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::not_found("reservation", reservation_id))
    }

    async fn get_reservation(&self, reservation_id: i64) -> Result<Option<Reservation>, ServiceError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
                SELECT id, client_id, property_id, start_date, end_date, occupants, notes
                FROM reservations
                WHERE id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(reservation)
    }

    async fn get_reservation_listing(
        &self,
        reservation_id: i64,
    ) -> Result<Option<ReservationListing>, ServiceError> {
        let listing = sqlx::query_as::<_, ReservationListing>(&format!(
            "{} WHERE r.id = $1",
            LISTING_SELECT
        ))
        .bind(reservation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(listing)
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, ServiceError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
                SELECT r.id, r.client_id, r.property_id, r.start_date, r.end_date, r.occupants, r.notes
                FROM reservations r
                JOIN clients c ON c.id = r.client_id
                ORDER BY r.start_date, c.last_name, c.first_name, c.id, r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }

    async fn list_reservations_by_property(&self) -> Result<Vec<ReservationListing>, ServiceError> {
        let listings = sqlx::query_as::<_, ReservationListing>(&format!(
            "{} ORDER BY p.label, p.id, r.start_date, c.last_name, c.first_name, c.id, r.id",
            LISTING_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(listings)
    }

    async fn delete_reservation(&self, reservation_id: i64) -> Result<(), ServiceError> {
        let deleted = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(reservation_id)
            .execute(&self.pool)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(ServiceError::not_found("reservation", reservation_id));
        }
        Ok(())
    }
}
