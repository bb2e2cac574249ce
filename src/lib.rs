//! GIRO - controle de frota
//!
//! Alertas de manutenção, disponibilidade e quilometragem das viaturas,
//! servidos por uma API HTTP em axum sobre PostgreSQL ou memória.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use routes::create_app_router;
pub use state::AppState;
