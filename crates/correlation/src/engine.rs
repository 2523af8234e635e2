// Archivo: engine.rs
// Propósito: definir el trait `ProcessEngine`, el contrato con el motor de
// procesos externo. Describe las tres operaciones que deben implementar los
// accesos concretos (REST, doble en memoria, etc.).
use crate::errors::Result;
use bpm_domain::{CorrelationRequest, CorrelationResult, EventSubscription, EventSubscriptionQuery,
                 VariableInstance, VariableInstanceQuery};

/// Contrato mínimo con el motor de procesos externo.
///
/// El motor es el único dueño del estado: suscripciones, instancias y
/// variables se leen mediante consulta y la única escritura es la
/// correlación. Ninguna implementación debe retener estado autoritativo
/// propio ni añadir reintentos u orden más allá de lo que el motor ya
/// garantiza.
pub trait ProcessEngine: Send + Sync {
    /// Consulta las suscripciones a eventos activas que cumplen el filtro,
    /// en el orden en que el motor las devuelva.
    fn query_event_subscriptions(&self, query: &EventSubscriptionQuery) -> Result<Vec<EventSubscription>>;

    /// Consulta variables de proceso (por ejemplo claves de correlación)
    /// según el filtro.
    fn query_variable_instances(&self, query: &VariableInstanceQuery) -> Result<Vec<VariableInstance>>;

    /// Entrega el mensaje al motor. El motor exige exactamente un receptor:
    /// con cero o varios receptores responde `EngineError::Mismatch`, que es
    /// justamente el error que la comprobación previa de cardinalidad evita.
    fn correlate_message(&self, request: &CorrelationRequest) -> Result<CorrelationResult>;
}
