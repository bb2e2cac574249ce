//! Utilidades del sistema
//!
//! Manejo de errores compartido por repositorios, servicios y rutas.

pub mod errors;

pub use errors::{AppError, AppResult};
