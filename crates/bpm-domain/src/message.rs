// message.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Petición de correlación: la única operación de escritura contra el motor.
///
/// Lleva el nombre del mensaje, el mapa opcional de claves de correlación
/// (nombre de variable -> valor esperado) y, opcionalmente, variables de
/// proceso que el motor fijará en la instancia receptora al entregar el
/// mensaje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRequest {
    message_name: String,
    correlation_keys: BTreeMap<String, JsonValue>,
    process_variables: BTreeMap<String, JsonValue>,
}

impl CorrelationRequest {
    /// Crea una petición para el mensaje dado, sin claves ni variables.
    pub fn message(message_name: &str) -> Result<Self, DomainError> {
        if message_name.trim().is_empty() {
            return Err(DomainError::ValidationError("El nombre del mensaje no puede estar vacío".to_string()));
        }
        Ok(Self { message_name: message_name.to_string(),
                  correlation_keys: BTreeMap::new(),
                  process_variables: BTreeMap::new() })
    }

    /// Añade una clave de correlación (variable de proceso que debe tener
    /// el valor dado en la instancia receptora).
    pub fn with_correlation_key(mut self, name: &str, value: JsonValue) -> Self {
        self.correlation_keys.insert(name.to_string(), value);
        self
    }

    /// Añade una variable de proceso a fijar en la instancia receptora
    /// durante la entrega.
    pub fn with_process_variable(mut self, name: &str, value: JsonValue) -> Self {
        self.process_variables.insert(name.to_string(), value);
        self
    }

    pub fn message_name(&self) -> &str {
        &self.message_name
    }

    pub fn correlation_keys(&self) -> &BTreeMap<String, JsonValue> {
        &self.correlation_keys
    }

    pub fn process_variables(&self) -> &BTreeMap<String, JsonValue> {
        &self.process_variables
    }
}

/// Resultado de una correlación aceptada por el motor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub process_instance_id: Uuid,
    pub subscription_id: Uuid,
    pub activity_id: Option<String>,
    pub correlated_at: DateTime<Utc>,
}
