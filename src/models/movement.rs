//! Modelo de VehicleMovement
//!
//! Entradas del libro de la guarita: salidas y llegadas de viaturas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del movimiento - mapea al ENUM movement_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "movement_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    InTransit,
    Completed,
}

/// Tipo de destino - mapea al ENUM destination_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "destination_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DestinationKind {
    Incident,
    Qrf,
    Ceman,
    Cal,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMovement {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub personnel_id: Uuid,
    pub destination: String,
    pub destination_kind: Option<DestinationKind>,
    pub departure_km: i64,
    pub departure_time: DateTime<Utc>,
    pub arrival_km: Option<i64>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub status: MovementStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicleMovement {
    pub vehicle_id: Uuid,
    pub personnel_id: Uuid,
    pub destination: String,
    pub destination_kind: Option<DestinationKind>,
    pub departure_km: i64,
    pub departure_time: DateTime<Utc>,
    pub notes: Option<String>,
}
