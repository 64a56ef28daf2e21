// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        clients::clients_handler, equipment::equipment_handler, photos::photos_handler,
        properties::property_handler, reservations::reservations_handler,
        reviews::reviews_handler, views::views_handler,
    },
    AppState,
};

// Health check handler
async fn health_check(Extension(app_state): Extension<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running",
        "store": app_state.db_client.backend()
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/clients", clients_handler())
        .nest("/equipment", equipment_handler())
        .nest("/properties", property_handler())
        .nest("/photos", photos_handler())
        .nest("/reservations", reservations_handler())
        .nest("/reviews", reviews_handler());

    Router::new()
        .merge(views_handler())
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
}
