// event_subscription.rs
use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Tipo de evento al que puede estar suscrita una instancia de proceso.
///
/// El motor externo distingue suscripciones por tipo; para el patrón de
/// correlación sólo interesa `Message`, pero el filtro de consulta acepta
/// cualquiera de los tipos que el motor publica.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
  Message,
  Signal,
  Conditional,
  Compensation,
}

impl EventType {
  pub fn as_str(&self) -> &'static str {
    match self {
      EventType::Message => "message",
      EventType::Signal => "signal",
      EventType::Conditional => "conditional",
      EventType::Compensation => "compensation",
    }
  }
}

impl fmt::Display for EventType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for EventType {
  type Err = DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "message" => Ok(EventType::Message),
      "signal" => Ok(EventType::Signal),
      "conditional" => Ok(EventType::Conditional),
      "compensation" => Ok(EventType::Compensation),
      other => Err(DomainError::ValidationError(format!("Tipo de evento desconocido: {}", other))),
    }
  }
}

/// Registro del motor: una instancia de proceso esperando un evento con
/// nombre. Es de sólo lectura desde este lado; el motor lo crea cuando la
/// instancia alcanza el punto de espera y lo consume al entregar el evento.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSubscription {
  id: Uuid,
  event_type: EventType,
  event_name: String,
  process_instance_id: Uuid,
  activity_id: Option<String>,
  created_at: DateTime<Utc>,
}

impl EventSubscription {
  fn new(id: Uuid,
         event_type: EventType,
         event_name: &str,
         process_instance_id: Uuid,
         activity_id: Option<String>,
         created_at: DateTime<Utc>)
         -> Result<Self, DomainError> {
    if event_name.trim().is_empty() {
      return Err(DomainError::ValidationError("El nombre del evento no puede estar vacío".to_string()));
    }
    Ok(Self { id,
              event_type,
              event_name: event_name.to_string(),
              process_instance_id,
              activity_id,
              created_at })
  }

  /// Construye la suscripción a partir de campos ya conocidos (por ejemplo
  /// deserializados de la respuesta del motor).
  pub fn from_parts(id: Uuid,
                    event_type: EventType,
                    event_name: &str,
                    process_instance_id: Uuid,
                    activity_id: Option<String>,
                    created_at: DateTime<Utc>)
                    -> Result<Self, DomainError> {
    Self::new(id, event_type, event_name, process_instance_id, activity_id, created_at)
  }

  /// Construye una suscripción nueva con id generado y marca de tiempo
  /// actual. Útil para sembrar dobles de prueba.
  pub fn waiting(event_type: EventType,
                 event_name: &str,
                 process_instance_id: Uuid,
                 activity_id: Option<String>)
                 -> Result<Self, DomainError> {
    Self::new(Uuid::new_v4(), event_type, event_name, process_instance_id, activity_id, Utc::now())
  }

  pub fn id(&self) -> Uuid {
    self.id
  }

  pub fn event_type(&self) -> EventType {
    self.event_type
  }

  pub fn event_name(&self) -> &str {
    &self.event_name
  }

  pub fn process_instance_id(&self) -> Uuid {
    self.process_instance_id
  }

  pub fn activity_id(&self) -> Option<&str> {
    self.activity_id.as_deref()
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }
}

impl fmt::Display for EventSubscription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f,
           "EventSubscription({}: '{}' en instancia {})",
           self.event_type, self.event_name, self.process_instance_id)
  }
}
