//! Rutas HTTP
//!
//! Cada recurso expone su propio `Router<AppState>`; aquí se anidan bajo
//! `/api` junto con el health check, CORS y el trace de peticiones.

pub mod alert_routes;
pub mod maintenance_routes;
pub mod movement_routes;
pub mod reading_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Construye el router completo de la aplicación
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/alerts", alert_routes::create_alert_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/readings", reading_routes::create_reading_router())
        .nest("/api/movements", movement_routes::create_movement_router())
        .nest("/api/maintenance", maintenance_routes::create_maintenance_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "giro",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
