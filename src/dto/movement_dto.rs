use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{DestinationKind, VehicleMovement, VehicleReading};

// Request para registrar una salida en la guarita
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDepartureRequest {
    pub vehicle_id: Uuid,
    pub personnel_id: Uuid,

    #[validate(length(min = 1, max = 200))]
    pub destination: String,

    pub destination_kind: Option<DestinationKind>,

    #[validate(range(min = 0))]
    pub departure_km: i64,

    pub departure_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

// Request para registrar la llegada
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterArrivalRequest {
    #[validate(range(min = 0))]
    pub arrival_km: i64,

    pub arrival_time: Option<DateTime<Utc>>,
}

// Response de la llegada: movimiento cerrado y lectura generada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalResponse {
    pub movement: VehicleMovement,
    pub reading: VehicleReading,
}
