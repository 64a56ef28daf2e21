use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::reservationdtos::SaveReservationDto,
    error::HttpError,
    handler::rejected,
    service::error::ServiceError,
    AppState,
};

pub fn reservations_handler() -> Router {
    Router::new()
        .route("/", get(list_reservations).post(create_reservation))
        .route(
            "/:reservation_id",
            get(get_reservation).put(update_reservation).delete(delete_reservation),
        )
}

pub async fn list_reservations(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reservations = app_state
        .db_client
        .list_reservations()
        .await
        .map_err(|e| rejected("reservation", e))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reservations.len(),
        "data": {
            "reservations": reservations
        }
    })))
}

pub async fn create_reservation(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveReservationDto>,
) -> Result<impl IntoResponse, HttpError> {
    let reservation = app_state
        .db_client
        .create_reservation(body)
        .await
        .map_err(|e| rejected("reservation", e))?;

    tracing::info!(
        reservation_id = reservation.id,
        client_id = reservation.client_id,
        property_id = reservation.property_id,
        nights = reservation.nights(),
        "reservation created"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "reservation": reservation
            }
        })),
    ))
}

pub async fn get_reservation(
    Path(reservation_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reservation = app_state
        .db_client
        .get_reservation(reservation_id)
        .await
        .map_err(|e| rejected("reservation", e))?
        .ok_or_else(|| HttpError::from(ServiceError::not_found("reservation", reservation_id)))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "reservation": reservation
        }
    })))
}

pub async fn update_reservation(
    Path(reservation_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveReservationDto>,
) -> Result<impl IntoResponse, HttpError> {
    let reservation = app_state
        .db_client
        .update_reservation(reservation_id, body)
        .await
        .map_err(|e| rejected("reservation", e))?;

    tracing::info!(reservation_id, "reservation updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "reservation": reservation
        }
    })))
}

pub async fn delete_reservation(
    Path(reservation_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_reservation(reservation_id)
        .await
        .map_err(|e| rejected("reservation", e))?;

    tracing::info!(reservation_id, "reservation deleted");

    Ok(StatusCode::NO_CONTENT)
}
