//! DTOs de la API
//!
//! Requests validados con `validator` y responses serializadas en camelCase
//! para el frontend.

pub mod api_response;
pub mod maintenance_dto;
pub mod movement_dto;
pub mod reading_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
