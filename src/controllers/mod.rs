//! Controladores
//!
//! Validan requests, aplican las invariantes de escritura y delegan en
//! servicios y en el almacén de registros.

pub mod alert_controller;
pub mod maintenance_controller;
pub mod movement_controller;
pub mod reading_controller;
pub mod vehicle_controller;
