use std::sync::Arc;

use axum::{extract::Path, response::IntoResponse, routing::get, Extension, Json, Router};

use crate::{
    dtos::{propertydtos::PropertyFilterDto, reservationdtos::ReservationListingDto},
    error::{ErrorMessage, HttpError},
    handler::rejected,
    AppState,
};

pub const INDEX_TITLE: &str = "Ubytovací zařízení";

/// The index lists only properties with more rooms than this.
pub const INDEX_MIN_ROOMS_EXCLUSIVE: i32 = 2;

pub fn views_handler() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/seznam", get(reservation_list))
        .route("/detail/:reservation_id", get(reservation_detail))
}

pub async fn index(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let places: Vec<PropertyFilterDto> = app_state
        .db_client
        .list_properties_with_rooms_over(INDEX_MIN_ROOMS_EXCLUSIVE)
        .await
        .map_err(|e| rejected("property", e))?
        .iter()
        .map(PropertyFilterDto::from_property)
        .collect();

    Ok(Json(serde_json::json!({
        "nadpis": INDEX_TITLE,
        "mista": places
    })))
}

pub async fn reservation_list(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reservations: Vec<ReservationListingDto> = app_state
        .db_client
        .list_reservations_by_property()
        .await
        .map_err(|e| rejected("reservation", e))?
        .iter()
        .map(ReservationListingDto::from_listing)
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reservations.len(),
        "data": {
            "reservations": reservations
        }
    })))
}

pub async fn reservation_detail(
    Path(reservation_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let listing = app_state
        .db_client
        .get_reservation_listing(reservation_id)
        .await
        .map_err(|e| rejected("reservation", e))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::ResourceNotFound.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "reservation": ReservationListingDto::from_listing(&listing)
        }
    })))
}
