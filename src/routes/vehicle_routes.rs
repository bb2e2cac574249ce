use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{CurrentKmResponse, ReadingListQuery, VehicleListQuery};
use crate::models::VehicleReading;
use crate::services::{FleetStats, VehicleDetails};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/stats", get(fleet_stats))
        .route("/:id", get(get_vehicle))
        .route("/:id/readings", get(list_readings))
        .route("/:id/readings/latest", get(latest_reading))
        .route("/:id/current-km", get(current_km))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleListQuery>,
) -> Result<Json<Vec<VehicleDetails>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn fleet_stats(State(state): State<AppState>) -> Result<Json<FleetStats>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.stats().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleDetails>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn list_readings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ReadingListQuery>,
) -> Result<Json<Vec<VehicleReading>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.readings(id, query).await?;
    Ok(Json(response))
}

async fn latest_reading(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<VehicleReading>>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.latest_reading(id).await?;
    Ok(Json(response))
}

async fn current_km(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CurrentKmResponse>, AppError> {
    let controller = VehicleController::new(state.store.clone());
    let response = controller.current_km(id).await?;
    Ok(Json(response))
}
