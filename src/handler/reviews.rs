use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};

use crate::{
    dtos::reviewdtos::{ReviewResponseDto, SaveReviewDto},
    error::HttpError,
    handler::rejected,
    service::error::ServiceError,
    AppState,
};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/:review_id",
            get(get_review).put(update_review).delete(delete_review),
        )
}

pub async fn list_reviews(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews: Vec<ReviewResponseDto> = app_state
        .db_client
        .list_reviews()
        .await
        .map_err(|e| rejected("review", e))?
        .iter()
        .map(ReviewResponseDto::from_review)
        .collect();

    Ok(Json(serde_json::json!({
        "status": "success",
        "results": reviews.len(),
        "data": {
            "reviews": reviews
        }
    })))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .db_client
        .create_review(body)
        .await
        .map_err(|e| rejected("review", e))?;

    tracing::info!(review_id = review.id, grade = %review.grade, "review created");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "status": "success",
            "data": {
                "review": ReviewResponseDto::from_review(&review)
            }
        })),
    ))
}

pub async fn get_review(
    Path(review_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .db_client
        .get_review(review_id)
        .await
        .map_err(|e| rejected("review", e))?
        .ok_or_else(|| HttpError::from(ServiceError::not_found("review", review_id)))?;

    let client = app_state
        .db_client
        .get_client(review.client_id)
        .await
        .map_err(|e| rejected("client", e))?;
    let property = app_state
        .db_client
        .get_property(review.property_id)
        .await
        .map_err(|e| rejected("property", e))?;

    let mut dto = ReviewResponseDto::from_review(&review);
    if let (Some(client), Some(property)) = (client, property) {
        dto = dto.with_title(review.title(&client, &property));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "review": dto
        }
    })))
}

pub async fn update_review(
    Path(review_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SaveReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .db_client
        .update_review(review_id, body)
        .await
        .map_err(|e| rejected("review", e))?;

    tracing::info!(review_id, "review updated");

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "review": ReviewResponseDto::from_review(&review)
        }
    })))
}

pub async fn delete_review(
    Path(review_id): Path<i64>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .delete_review(review_id)
        .await
        .map_err(|e| rejected("review", e))?;

    tracing::info!(review_id, "review deleted");

    Ok(StatusCode::NO_CONTENT)
}
