use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use crate::controllers::reading_controller::ReadingController;
use crate::dto::reading_dto::CreateReadingRequest;
use crate::dto::ApiResponse;
use crate::models::VehicleReading;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_reading_router() -> Router<AppState> {
    Router::new().route("/", post(create_reading))
}

async fn create_reading(
    State(state): State<AppState>,
    Json(request): Json<CreateReadingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleReading>>), AppError> {
    let controller = ReadingController::new(state.store.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
