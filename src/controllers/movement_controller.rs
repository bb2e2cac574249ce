use crate::dto::movement_dto::{ArrivalResponse, RegisterArrivalRequest, RegisterDepartureRequest};
use crate::dto::ApiResponse;
use crate::models::{MovementStatus, NewVehicleMovement, NewVehicleReading, VehicleMovement};
use crate::repositories::FleetStore;
use crate::utils::errors::{movement_already_completed, not_found_error, AppError};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

/// Quién figura como autor de las lecturas generadas en la guarita
pub const GATE_RECORDER: &str = "Sistema - Guarita";

pub struct MovementController {
    store: Arc<dyn FleetStore>,
}

impl MovementController {
    pub fn new(store: Arc<dyn FleetStore>) -> Self {
        Self { store }
    }

    pub async fn register_departure(
        &self,
        request: RegisterDepartureRequest,
    ) -> Result<ApiResponse<VehicleMovement>, AppError> {
        request.validate()?;

        self.store
            .find_vehicle(request.vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Viatura", &request.vehicle_id.to_string()))?;

        self.store
            .find_personnel(request.personnel_id)
            .await?
            .ok_or_else(|| not_found_error("Militar", &request.personnel_id.to_string()))?;

        // Como máximo un movimiento en tránsito por viatura; lo garantiza el almacén
        let movement = self
            .store
            .insert_movement(NewVehicleMovement {
                vehicle_id: request.vehicle_id,
                personnel_id: request.personnel_id,
                destination: request.destination,
                destination_kind: request.destination_kind,
                departure_km: request.departure_km,
                departure_time: request.departure_time.unwrap_or_else(Utc::now),
                notes: request.notes,
            })
            .await
            .map_err(|err| {
                if matches!(err, AppError::Conflict(_)) {
                    warn!("🚫 Saída recusada: viatura {} já está em trânsito", request.vehicle_id);
                }
                err
            })?;

        info!("🚒 Saída registrada: viatura {} para {}", movement.vehicle_id, movement.destination);

        Ok(ApiResponse::success_with_message(movement, "Saída registrada com sucesso"))
    }

    pub async fn register_arrival(
        &self,
        id: Uuid,
        request: RegisterArrivalRequest,
    ) -> Result<ApiResponse<ArrivalResponse>, AppError> {
        request.validate()?;

        let movement = self
            .store
            .find_movement(id)
            .await?
            .ok_or_else(|| not_found_error("Movimento", &id.to_string()))?;

        if movement.status == MovementStatus::Completed {
            return Err(movement_already_completed());
        }

        if request.arrival_km < movement.departure_km {
            return Err(AppError::BadRequest(format!(
                "KM de chegada ({}) não pode ser menor que KM de saída ({})",
                request.arrival_km, movement.departure_km
            )));
        }

        // La comparación con la última lectura ocurre dentro de complete_movement
        let arrival_time = request.arrival_time.unwrap_or_else(Utc::now);
        let reading = NewVehicleReading {
            vehicle_id: movement.vehicle_id,
            km_reading: request.arrival_km,
            reading_date: arrival_time,
            recorded_by: Some(GATE_RECORDER.to_string()),
            notes: Some(format!("Movimento finalizado: {}", movement.destination)),
        };

        let (movement, reading) = self
            .store
            .complete_movement(id, request.arrival_km, arrival_time, reading)
            .await?;

        info!(
            "🏁 Chegada registrada: viatura {} com {} km",
            movement.vehicle_id, reading.km_reading
        );

        Ok(ApiResponse::success_with_message(
            ArrivalResponse { movement, reading },
            "Chegada registrada com sucesso",
        ))
    }

    pub async fn list_in_transit(&self) -> Result<Vec<VehicleMovement>, AppError> {
        self.store.list_in_transit_movements().await
    }
}
