// Archivo: stubs.rs
// Propósito: implementación en memoria del contrato con el motor, para
// pruebas y wiring rápido.
//
// Incluye un motor en memoria (`InMemoryProcessEngine`) con helpers de
// siembra y un registro de entregas. Esta implementación no es durable ni
// ejecuta procesos; sólo guarda suscripciones y variables y aplica la regla
// de receptor único en la correlación.
use crate::engine::ProcessEngine;
use crate::errors::{EngineError, Result};
use bpm_domain::{CorrelationRequest, CorrelationResult, DomainError, EventSubscription,
                 EventSubscriptionQuery, EventType, VariableInstance, VariableInstanceQuery};
use chrono::Utc;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

fn map_domain_err<T>(res: std::result::Result<T, DomainError>) -> Result<T> {
    res.map_err(|e| EngineError::Other(format!("dominio: {}", e)))
}

// Minimal in-memory engine double for wiring examples (not durable)
pub struct InMemoryProcessEngine {
    /// Suscripciones activas indexadas por id de suscripción.
    subscriptions: Mutex<HashMap<Uuid, EventSubscription>>,
    /// Variables de proceso indexadas por id de variable.
    variables: Mutex<HashMap<Uuid, VariableInstance>>,
    /// Registro de correlaciones aceptadas, en orden de entrega.
    deliveries: Mutex<Vec<CorrelationResult>>,
}

impl InMemoryProcessEngine {
    /// Crea una nueva instancia del motor en memoria, sin suscripciones.
    pub fn new() -> Self {
        Self { subscriptions: Mutex::new(HashMap::new()),
               variables: Mutex::new(HashMap::new()),
               deliveries: Mutex::new(Vec::new()) }
    }

    /// Helper para mapear `Mutex::lock()` en un `Result` con
    /// `EngineError::Other`.
    fn lock<'a, T>(&'a self, m: &'a Mutex<T>) -> std::result::Result<MutexGuard<'a, T>, EngineError> {
        m.lock().map_err(|e| EngineError::Other(format!("mutex poisoned: {:?}", e)))
    }

    /// Siembra una instancia nueva esperando el mensaje dado. Devuelve el
    /// id de la instancia de proceso generada.
    pub fn start_waiting_instance(&self, message_name: &str) -> Result<Uuid> {
        let process_instance_id = Uuid::new_v4();
        self.subscribe(EventType::Message, message_name, process_instance_id, None)?;
        Ok(process_instance_id)
    }

    /// Siembra una suscripción para una instancia ya conocida. Devuelve el
    /// id de la suscripción.
    pub fn subscribe(&self,
                     event_type: EventType,
                     event_name: &str,
                     process_instance_id: Uuid,
                     activity_id: Option<String>)
                     -> Result<Uuid> {
        let sub = map_domain_err(EventSubscription::waiting(event_type, event_name, process_instance_id, activity_id))?;
        let id = sub.id();
        self.lock(&self.subscriptions)?.insert(id, sub);
        Ok(id)
    }

    /// Fija una variable de proceso; si ya existe una con el mismo nombre
    /// en la instancia, reemplaza su valor conservando el id.
    pub fn set_variable(&self, process_instance_id: Uuid, name: &str, value: JsonValue) -> Result<Uuid> {
        let mut variables = self.lock(&self.variables)?;
        let existing = variables.values()
                                .find(|v| v.process_instance_id() == process_instance_id && v.name() == name)
                                .map(|v| v.id());
        let var = match existing {
            Some(id) => map_domain_err(VariableInstance::from_parts(id, name, value, process_instance_id, Utc::now()))?,
            None => map_domain_err(VariableInstance::fresh(name, value, process_instance_id))?,
        };
        let id = var.id();
        variables.insert(id, var);
        Ok(id)
    }

    /// Devuelve una copia del registro de entregas, en orden.
    pub fn deliveries(&self) -> Result<Vec<CorrelationResult>> {
        Ok(self.lock(&self.deliveries)?.clone())
    }
}

impl Default for InMemoryProcessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessEngine for InMemoryProcessEngine {
    /// Filtra las suscripciones en memoria con el predicado del filtro.
    fn query_event_subscriptions(&self, query: &EventSubscriptionQuery) -> Result<Vec<EventSubscription>> {
        let subscriptions = self.lock(&self.subscriptions)?;
        Ok(subscriptions.values()
                        .filter(|s| query.matches(s))
                        .cloned()
                        .collect())
    }

    /// Filtra las variables en memoria con el predicado del filtro.
    fn query_variable_instances(&self, query: &VariableInstanceQuery) -> Result<Vec<VariableInstance>> {
        let variables = self.lock(&self.variables)?;
        Ok(variables.values()
                    .filter(|v| query.matches(v))
                    .cloned()
                    .collect())
    }

    /// Aplica la regla de receptor único del motor: con cero o varias
    /// suscripciones coincidentes responde `Mismatch`. Con exactamente una,
    /// consume la suscripción, fija las variables de proceso de la petición
    /// y registra la entrega.
    fn correlate_message(&self, request: &CorrelationRequest) -> Result<CorrelationResult> {
        let mut subscriptions = self.lock(&self.subscriptions)?;
        let mut variables = self.lock(&self.variables)?;

        // Candidatas: suscripciones de mensaje con el nombre pedido cuyas
        // instancias satisfacen todas las claves de correlación.
        let matched: Vec<Uuid> =
            subscriptions.values()
                         .filter(|s| s.event_type() == EventType::Message
                                     && s.event_name() == request.message_name())
                         .filter(|s| {
                             request.correlation_keys().iter().all(|(k, v)| {
                                 variables.values().any(|var| {
                                              var.process_instance_id() == s.process_instance_id()
                                              && var.name() == k
                                              && var.value() == v
                                          })
                             })
                         })
                         .map(|s| s.id())
                         .collect();

        if matched.len() != 1 {
            return Err(EngineError::Mismatch { message: request.message_name().to_string(),
                                               candidates: matched.len() });
        }

        let sub = subscriptions.remove(&matched[0])
                               .ok_or(EngineError::NotFound("suscripción".into()))?;

        // Fijar las variables de proceso de la petición en la instancia
        // receptora (reemplazando valor si el nombre ya existe).
        for (name, value) in request.process_variables() {
            let existing = variables.values()
                                    .find(|v| v.process_instance_id() == sub.process_instance_id()
                                              && v.name() == name.as_str())
                                    .map(|v| v.id());
            let var = match existing {
                Some(id) => map_domain_err(VariableInstance::from_parts(id,
                                                                        name,
                                                                        value.clone(),
                                                                        sub.process_instance_id(),
                                                                        Utc::now()))?,
                None => map_domain_err(VariableInstance::fresh(name, value.clone(), sub.process_instance_id()))?,
            };
            variables.insert(var.id(), var);
        }

        let result = CorrelationResult { process_instance_id: sub.process_instance_id(),
                                         subscription_id: sub.id(),
                                         activity_id: sub.activity_id().map(String::from),
                                         correlated_at: Utc::now() };
        self.lock(&self.deliveries)?.push(result.clone());
        Ok(result)
    }
}
