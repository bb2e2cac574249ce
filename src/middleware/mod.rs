//! Middleware del sistema
//!
//! Por ahora solo CORS; el trace de peticiones usa `TraceLayer` directamente.

pub mod cors;

pub use cors::cors_layer;
