use axum::{extract::State, routing::get, Json, Router};
use crate::controllers::alert_controller::AlertController;
use crate::models::{Alert, AlertSummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/summary", get(alerts_summary))
}

async fn list_alerts(State(state): State<AppState>) -> Result<Json<Vec<Alert>>, AppError> {
    let controller = AlertController::new(state.store.clone());
    let response = controller.maintenance_alerts().await?;
    Ok(Json(response))
}

async fn alerts_summary(State(state): State<AppState>) -> Result<Json<AlertSummary>, AppError> {
    let controller = AlertController::new(state.store.clone());
    let response = controller.alerts_summary().await?;
    Ok(Json(response))
}
