use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::photodtos::{PhotoResponseDto, SavePhotoDto},
    error::HttpError,
    handler::rejected,
    service::error::ServiceError,
    AppState,
};

pub fn photos_handler() -> Router {
    Router::new()
        .route("/", get(list_photos).post(create_photo))
        .route(
            "/:photo_id",
            get(get_photo).put(update_photo).delete(delete_photo),
        )
}

pub async fn list_photos(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let photos: Vec<PhotoResponseDto> = app_state
        .db_client
        .list_photos()
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

pub async fn create_photo(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavePhotoDto>,
) -> Result<impl IntoResponse, HttpError> {
    let photo = app_state
        .db_client
        .create_photo(body)
        .await
        .map_err(|e| rejected("photo", e))?;

    tracing::info!(photo_id = photo.id, image = %photo.image, "photo stored");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "photo": PhotoResponseDto::from_photo(&photo, &app_state.env.media_url)
            }
        })),
    ))
}

pub async fn get_photo(
    Path(photo_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let photo = app_state
        .db_client
        .get_photo(photo_id)
        .await
        .map_err(|e| rejected("photo", e))?
        .ok_or_else(|| HttpError::from(ServiceError::not_found("photo", photo_id)))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "photo": PhotoResponseDto::from_photo(&photo, &app_state.env.media_url)
        }
    })))
}

pub async fn update_photo(
    Path(photo_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SavePhotoDto>,
) -> Result<impl IntoResponse, HttpError> {
    let photo = app_state
        .db_client
        .update_photo(photo_id, body)
        .await
        .map_err(|e| rejected("photo", e))?;

    tracing::info!(photo_id, "photo updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "photo": PhotoResponseDto::from_photo(&photo, &app_state.env.media_url)
        }
    })))
}

pub async fn delete_photo(
    Path(photo_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_photo(photo_id)
        .await
        .map_err(|e| rejected("photo", e))?;

    tracing::info!(photo_id, "photo deleted");

    Ok(StatusCode::NO_CONTENT)
}
