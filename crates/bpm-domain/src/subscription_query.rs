use crate::{EventSubscription, EventType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Filtro de consulta sobre las suscripciones a eventos del motor.
///
/// Estilo builder: los filtros no fijados se ignoran y los fijados se
/// combinan de forma conjuntiva. El predicado `matches` reproduce en
/// proceso la semántica del filtro y lo comparten el doble en memoria y
/// las pruebas; la implementación REST traduce los mismos campos a
/// parámetros de consulta.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSubscriptionQuery {
    event_type: Option<EventType>,
    event_name: Option<String>,
    process_instance_id: Option<Uuid>,
    activity_id: Option<String>,
}

impl EventSubscriptionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restringe por tipo de evento (para correlación: `EventType::Message`).
    pub fn event_type(mut self, event_type: EventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    /// Restringe por nombre de evento (el nombre del mensaje).
    pub fn event_name(mut self, event_name: &str) -> Self {
        self.event_name = Some(event_name.to_string());
        self
    }

    /// Restringe a las suscripciones de una instancia de proceso concreta.
    pub fn process_instance_id(mut self, process_instance_id: Uuid) -> Self {
        self.process_instance_id = Some(process_instance_id);
        self
    }

    /// Restringe por id de actividad (el punto de espera dentro del proceso).
    pub fn activity_id(mut self, activity_id: &str) -> Self {
        self.activity_id = Some(activity_id.to_string());
        self
    }

    pub fn event_type_filter(&self) -> Option<EventType> {
        self.event_type
    }

    pub fn event_name_filter(&self) -> Option<&str> {
        self.event_name.as_deref()
    }

    pub fn process_instance_id_filter(&self) -> Option<Uuid> {
        self.process_instance_id
    }

    pub fn activity_id_filter(&self) -> Option<&str> {
        self.activity_id.as_deref()
    }

    /// Evalúa el filtro contra una suscripción concreta.
    pub fn matches(&self, subscription: &EventSubscription) -> bool {
        if let Some(t) = self.event_type {
            if subscription.event_type() != t {
                return false;
            }
        }
        if let Some(ref name) = self.event_name {
            if subscription.event_name() != name {
                return false;
            }
        }
        if let Some(pid) = self.process_instance_id {
            if subscription.process_instance_id() != pid {
                return false;
            }
        }
        if let Some(ref aid) = self.activity_id {
            if subscription.activity_id() != Some(aid.as_str()) {
                return false;
            }
        }
        true
    }
}
