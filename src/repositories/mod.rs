//! Repositorios y almacén de registros
//!
//! `FleetStore` es la costura entre la lógica derivada y la persistencia.
//! `PgFleetStore` compone los repositorios sqlx por entidad;
//! `MemoryFleetStore` cubre tests y el modo demo.

pub mod fleet_snapshot;
pub mod fleet_store;
pub mod maintenance_repository;
pub mod memory_fleet_store;
pub mod movement_repository;
pub mod personnel_repository;
pub mod pg_fleet_store;
pub mod reading_repository;
pub mod vehicle_repository;

pub use fleet_snapshot::FleetSnapshot;
pub use fleet_store::FleetStore;
pub use memory_fleet_store::MemoryFleetStore;
pub use pg_fleet_store::PgFleetStore;
