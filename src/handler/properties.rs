use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};

use crate::{
    dtos::{
        equipmentdtos::EquipmentResponseDto,
        photodtos::PhotoResponseDto,
        propertydtos::{PropertyFilterDto, SavePropertyDto},
    },
    error::HttpError,
    handler::rejected,
    service::error::ServiceError,
    AppState,
};

pub fn property_handler() -> Router {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/:property_id",
            get(get_property).put(update_property).delete(delete_property),
        )
        .route("/:property_id/photos", get(get_property_photos))
        .route(
            "/:property_id/equipment/:equipment_id",
            put(add_equipment).delete(remove_equipment),
        )
}

async fn equipment_dtos(
    app_state: &AppState,
    property_id: i64,
) -> Result<Vec<EquipmentResponseDto>, HttpError> {
    let equipment = app_state
        .db_client
        .property_equipment(property_id)
        .await
        .map_err(|e| rejected("property", e))?;

    Ok(equipment
        .iter()
        .map(|e| EquipmentResponseDto::from_equipment(e, &app_state.env.media_url))
        .collect())
}

pub async fn list_properties(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let properties: Vec<PropertyFilterDto> = app_state
        .db_client
        .list_properties()
        .await
        .map_err(|e| rejected("property", e))?
        .iter()
        .map(PropertyFilterDto::from_property)
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": properties.len(),
        "data": {
            "properties": properties
        }
    })))
}

pub async fn create_property(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .create_property(body)
        .await
        .map_err(|e| rejected("property", e))?;

    tracing::info!(property_id = property.id, label = %property.label, "property created");

    let equipment = equipment_dtos(&app_state, property.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "property": PropertyFilterDto::from_property(&property).with_equipment(equipment)
            }
        })),
    ))
}

pub async fn get_property(
    Path(property_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .get_property(property_id)
        .await
        .map_err(|e| rejected("property", e))?
        .ok_or_else(|| HttpError::from(ServiceError::not_found("property", property_id)))?;

    let equipment = equipment_dtos(&app_state, property_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "property": PropertyFilterDto::from_property(&property).with_equipment(equipment)
        }
    })))
}

pub async fn update_property(
    Path(property_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavePropertyDto>,
) -> Result<impl IntoResponse, HttpError> {
    let property = app_state
        .db_client
        .update_property(property_id, body)
        .await
        .map_err(|e| rejected("property", e))?;

    tracing::info!(property_id, "property updated");

    let equipment = equipment_dtos(&app_state, property_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "property": PropertyFilterDto::from_property(&property).with_equipment(equipment)
        }
    })))
}

pub async fn delete_property(
    Path(property_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let summary = app_state
        .db_client
        .delete_property(property_id)
        .await
        .map_err(|e| rejected("property", e))?;

    tracing::info!(
        property_id,
        reservations = summary.reservations_removed,
        reviews = summary.reviews_removed,
        photos = summary.photos_orphaned,
        "property deleted"
    );

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "deleted": summary
        }
    })))
}

pub async fn get_property_photos(
    Path(property_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let photos: Vec<PhotoResponseDto> = app_state
        .db_client
        .list_property_photos(property_id)
        .await
        .map_err(|e| rejected("photo", e))?
        .iter()
        .map(|p| PhotoResponseDto::from_photo(p, &app_state.env.media_url))
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": photos.len(),
        "data": {
            "photos": photos
        }
    })))
}

pub async fn add_equipment(
    Path((property_id, equipment_id)): Path<(i64, i64)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .add_property_equipment(property_id, equipment_id)
        .await
        .map_err(|e| rejected("property", e))?;

    tracing::info!(property_id, equipment_id, "equipment attached");

    let equipment = equipment_dtos(&app_state, property_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "equipment": equipment
        }
    })))
}

pub async fn remove_equipment(
    Path((property_id, equipment_id)): Path<(i64, i64)>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .remove_property_equipment(property_id, equipment_id)
        .await
        .map_err(|e| rejected("property", e))?;

    tracing::info!(property_id, equipment_id, "equipment detached");

    let equipment = equipment_dtos(&app_state, property_id).await?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "equipment": equipment
        }
    })))
}
