use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::clientdtos::SaveClientDto,
    error::HttpError,
    handler::rejected,
    service::error::ServiceError,
    AppState,
};

pub fn clients_handler() -> Router {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:client_id",
            get(get_client).put(update_client).delete(delete_client),
        )
}

pub async fn list_clients(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let clients = app_state
        .db_client
        .list_clients()
        .await
        .map_err(|e| rejected("client", e))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": clients.len(),
        "data": {
            "clients": clients
        }
    })))
}

pub async fn create_client(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveClientDto>,
) -> Result<impl IntoResponse, HttpError> {
    let client = app_state
        .db_client
        .create_client(body)
        .await
        .map_err(|e| rejected("client", e))?;

    tracing::info!(client_id = client.id, "client created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "client": client
            }
        })),
    ))
}

pub async fn get_client(
    Path(client_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let client = app_state
        .db_client
        .get_client(client_id)
        .await
        .map_err(|e| rejected("client", e))?
        .ok_or_else(|| HttpError::from(ServiceError::not_found("client", client_id)))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "client": client,
            "title": client.to_string()
        }
    })))
}

pub async fn update_client(
    Path(client_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveClientDto>,
) -> Result<impl IntoResponse, HttpError> {
    let client = app_state
        .db_client
        .update_client(client_id, body)
        .await
        .map_err(|e| rejected("client", e))?;

    tracing::info!(client_id, "client updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "client": client
        }
    })))
}

pub async fn delete_client(
    Path(client_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_client(client_id)
        .await
        .map_err(|e| rejected("client", e))?;

    tracing::info!(client_id, "client deleted with their reservations and reviews");

    Ok(StatusCode::NO_CONTENT)
}
