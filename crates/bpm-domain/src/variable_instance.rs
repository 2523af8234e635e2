// variable_instance.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

/// Par clave/valor del motor asociado a una instancia de proceso.
///
/// Para el patrón de correlación se usan como claves de correlación: la
/// segunda consulta busca la variable candidata dentro del conjunto de
/// instancias suscritas. El valor se modela como JSON porque el motor no
/// impone tipado a las variables de proceso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableInstance {
  id: Uuid,
  name: String,
  value: JsonValue,
  process_instance_id: Uuid,
  created_at: DateTime<Utc>,
}

impl VariableInstance {
  fn new(id: Uuid,
         name: &str,
         value: JsonValue,
         process_instance_id: Uuid,
         created_at: DateTime<Utc>)
         -> Result<Self, DomainError> {
    if name.trim().is_empty() {
      return Err(DomainError::ValidationError("El nombre de la variable no puede estar vacío".to_string()));
    }
    Ok(Self { id, name: name.to_string(), value, process_instance_id, created_at })
  }

  /// Construye la variable a partir de campos ya conocidos (por ejemplo
  /// deserializados de la respuesta del motor).
  pub fn from_parts(id: Uuid,
                    name: &str,
                    value: JsonValue,
                    process_instance_id: Uuid,
                    created_at: DateTime<Utc>)
                    -> Result<Self, DomainError> {
    Self::new(id, name, value, process_instance_id, created_at)
  }

  /// Construye una variable nueva con id generado y marca de tiempo actual.
  pub fn fresh(name: &str, value: JsonValue, process_instance_id: Uuid) -> Result<Self, DomainError> {
    Self::new(Uuid::new_v4(), name, value, process_instance_id, Utc::now())
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn value(&self) -> &JsonValue {
    &self.value
  }

  pub fn process_instance_id(&self) -> Uuid {
    self.process_instance_id
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

impl fmt::Display for VariableInstance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "VariableInstance('{}' = {} en instancia {})",
           self.name, self.value, self.process_instance_id)
  }
}
