// Archivo: service.rs
// Propósito: implementar `CorrelationService`, una capa orquestadora que
// expone operaciones de alto nivel sobre el motor (listar suscripciones,
// leer claves de correlación, entregar un mensaje). Esta capa debe ser
// invocada desde handlers HTTP o desde una CLI.
use crate::correlator::{CorrelatorConfig, MessageCorrelator};
use crate::engine::ProcessEngine;
use crate::errors::CorrelationError;
use bpm_domain::{CorrelationRequest, CorrelationResult, EventSubscription, EventSubscriptionQuery,
                 VariableInstance, VariableInstanceQuery};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// Servicio de alto nivel que expone la API de correlación de mensajes.
///
/// Esta capa orquesta el acceso al motor y el correlator. Está pensada
/// para ser invocada desde un handler HTTP o desde una CLI.
pub struct CorrelationService<E> where E: ProcessEngine
{
    engine: Arc<E>,
    correlator: Arc<MessageCorrelator<E>>,
}

impl<E> CorrelationService<E> where E: ProcessEngine + 'static
{
    /// Crea el servicio inyectando el acceso al motor y la configuración
    /// del correlator. El `MessageCorrelator` se construye internamente y
    /// se reusa.
    pub fn new(engine: Arc<E>, config: CorrelatorConfig) -> Self {
        let correlator = Arc::new(MessageCorrelator::new(engine.clone(), config));
        Self { engine, correlator }
    }

    /// Lista las suscripciones activas que cumplen el filtro.
    pub fn active_subscriptions(&self, query: &EventSubscriptionQuery) -> Result<Vec<EventSubscription>, CorrelationError> {
        Ok(self.engine.query_event_subscriptions(query)?)
    }

    /// Lee variables de proceso (claves de correlación) según el filtro.
    pub fn correlation_keys(&self, query: &VariableInstanceQuery) -> Result<Vec<VariableInstance>, CorrelationError> {
        Ok(self.engine.query_variable_instances(query)?)
    }

    /// Entrega un mensaje aplicando la comprobación de cardinalidad previa.
    /// `candidate_key` sólo se consulta cuando hay varias suscripciones.
    pub fn deliver(&self,
                   message_name: &str,
                   candidate_key: Option<(&str, JsonValue)>)
                   -> Result<CorrelationResult, CorrelationError> {
        let base = CorrelationRequest::message(message_name)?;
        self.correlator.correlate(base, candidate_key)
    }

    /// Variante de `deliver` para peticiones que además fijan variables de
    /// proceso en la instancia receptora.
    pub fn deliver_request(&self,
                           base: CorrelationRequest,
                           candidate_key: Option<(&str, JsonValue)>)
                           -> Result<CorrelationResult, CorrelationError> {
        self.correlator.correlate(base, candidate_key)
    }
}
