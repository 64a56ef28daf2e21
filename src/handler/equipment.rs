use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::equipmentdtos::{EquipmentResponseDto, SaveEquipmentDto},
    error::HttpError,
    handler::rejected,
    service::error::ServiceError,
    AppState,
};

pub fn equipment_handler() -> Router {
    Router::new()
        .route("/", get(list_equipment).post(create_equipment))
        .route(
            "/:equipment_id",
            get(get_equipment).put(update_equipment).delete(delete_equipment),
        )
}

pub async fn list_equipment(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let equipment: Vec<EquipmentResponseDto> = app_state
        .db_client
        .list_equipment()
        .await
        .map_err(|e| rejected("equipment", e))?
        .iter()
        .map(|e| EquipmentResponseDto::from_equipment(e, &app_state.env.media_url))
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": equipment.len(),
        "data": {
            "equipment": equipment
        }
    })))
}

pub async fn create_equipment(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveEquipmentDto>,
) -> Result<impl IntoResponse, HttpError> {
    let equipment = app_state
        .db_client
        .create_equipment(body)
        .await
        .map_err(|e| rejected("equipment", e))?;

    tracing::info!(equipment_id = equipment.id, symbol = %equipment.symbol, "equipment created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "equipment": EquipmentResponseDto::from_equipment(&equipment, &app_state.env.media_url)
            }
        })),
    ))
}

pub async fn get_equipment(
    Path(equipment_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let equipment = app_state
        .db_client
        .get_equipment(equipment_id)
        .await
        .map_err(|e| rejected("equipment", e))?
        .ok_or_else(|| HttpError::from(ServiceError::not_found("equipment", equipment_id)))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "equipment": EquipmentResponseDto::from_equipment(&equipment, &app_state.env.media_url)
        }
    })))
}

pub async fn update_equipment(
    Path(equipment_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveEquipmentDto>,
) -> Result<impl IntoResponse, HttpError> {
    let equipment = app_state
        .db_client
        .update_equipment(equipment_id, body)
        .await
        .map_err(|e| rejected("equipment", e))?;

    tracing::info!(equipment_id, "equipment updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "equipment": EquipmentResponseDto::from_equipment(&equipment, &app_state.env.media_url)
        }
    })))
}

pub async fn delete_equipment(
    Path(equipment_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_equipment(equipment_id)
        .await
        .map_err(|e| rejected("equipment", e))?;

    tracing::info!(equipment_id, "equipment deleted");

    Ok(StatusCode::NO_CONTENT)
}
