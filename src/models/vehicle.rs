//! Modelo de Vehicle
//!
//! Viaturas de la frota y sus tipos. Mapea a las tablas `vehicles` y
//! `vehicle_types` del schema PostgreSQL.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Régimen de propiedad - mapea al ENUM ownership_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "ownership_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OwnershipKind {
    Owned,
    Leased,
}

/// Tipo de servicio - mapea al ENUM service_kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "service_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Operational,
    Backup,
}

/// Tipo de viatura con sus reglas de mantenimiento
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleType {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub km_interval: Option<i64>,
    pub time_interval_days: Option<i32>,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub plate: String,
    pub chassis_number: String,
    pub renavam: String,
    pub operational_prefix: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub type_id: Uuid,
    pub ownership: OwnershipKind,
    pub service: ServiceKind,
    /// Umbral de próxima revisión cargado manualmente
    pub next_maintenance_km: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Umbral de revisión preventiva, si fue configurado.
    ///
    /// Un valor 0 se considera "no configurado".
    pub fn maintenance_threshold(&self) -> Option<i64> {
        self.next_maintenance_km.filter(|km| *km != 0)
    }
}
