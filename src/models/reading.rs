//! Modelo de VehicleReading
//!
//! Lecturas de odómetro. Por viatura son monótonamente no decrecientes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleReading {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub km_reading: i64,
    pub reading_date: DateTime<Utc>,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewVehicleReading {
    pub vehicle_id: Uuid,
    pub km_reading: i64,
    pub reading_date: DateTime<Utc>,
    pub recorded_by: Option<String>,
    pub notes: Option<String>,
}
