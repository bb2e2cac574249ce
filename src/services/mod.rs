//! Services module
//!
//! Lógica derivada de la aplicación: disponibilidad, odómetro, alertas de
//! mantenimiento y estadísticas de la frota. Todo es de solo lectura.

pub mod alert_service;
pub mod availability_service;
pub mod vehicle_service;

pub use alert_service::AlertService;
pub use availability_service::{AvailabilityService, MaintenanceAvailability};
pub use vehicle_service::{FleetStats, VehicleDetails, VehicleFilter, VehicleService};
