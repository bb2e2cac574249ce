//! Modelos de datos
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema de PostgreSQL, más las alertas derivadas.

pub mod alert;
pub mod maintenance;
pub mod movement;
pub mod personnel;
pub mod reading;
pub mod vehicle;

pub use alert::*;
pub use maintenance::*;
pub use movement::*;
pub use personnel::*;
pub use reading::*;
pub use vehicle::*;
