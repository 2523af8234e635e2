//! Implementación REST del contrato `ProcessEngine`.
//! Este archivo expone el módulo `dto` (formato de cable del motor) y
//! reexporta el cliente que implementa las tres operaciones contra la API
//! HTTP del motor. La implementación detallada está en `rest_engine.rs`.

pub mod dto;
mod rest_engine;

pub use rest_engine::{new_from_env, RestProcessEngine};
