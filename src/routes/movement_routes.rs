use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use crate::controllers::movement_controller::MovementController;
use crate::dto::movement_dto::{ArrivalResponse, RegisterArrivalRequest, RegisterDepartureRequest};
use crate::dto::ApiResponse;
use crate::models::VehicleMovement;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_movement_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_departure))
        .route("/in-transit", get(list_in_transit))
        .route("/:id/arrival", post(register_arrival))
}

async fn register_departure(
    State(state): State<AppState>,
    Json(request): Json<RegisterDepartureRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleMovement>>), AppError> {
    let controller = MovementController::new(state.store.clone());
    let response = controller.register_departure(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn register_arrival(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RegisterArrivalRequest>,
) -> Result<Json<ApiResponse<ArrivalResponse>>, AppError> {
    let controller = MovementController::new(state.store.clone());
    let response = controller.register_arrival(id, request).await?;
    Ok(Json(response))
}

async fn list_in_transit(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleMovement>>, AppError> {
    let controller = MovementController::new(state.store.clone());
    let response = controller.list_in_transit().await?;
    Ok(Json(response))
}
