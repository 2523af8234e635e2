// Archivo: correlator.rs
// Propósito: implementar `MessageCorrelator`, la comprobación de
// cardinalidad previa a la correlación.
//
// Nota: el correlator no retiene estado; cada paso es una llamada de
// lectura al motor y la decisión se toma sobre el tamaño de las listas
// devueltas. La entrega final es la única escritura.
use crate::engine::ProcessEngine;
use crate::errors::CorrelationError;
use bpm_domain::{CorrelationRequest, CorrelationResult, EventSubscription, EventSubscriptionQuery,
                 EventType, VariableInstance, VariableInstanceQuery};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use uuid::Uuid;

/// Configuración simple del correlator.
///
/// Actualmente vacío: sirve como placeholder para futuras opciones (por
/// ejemplo el tipo de evento a considerar, hoy fijo en `Message`).
pub struct CorrelatorConfig {
    // Por ahora no contiene campos; se deja para expansión futura.
}

/// Orquestador del patrón "comprobar antes de correlacionar".
///
/// Responsabilidades principales:
/// - Consultar las suscripciones de mensaje activas para un nombre dado
/// - Con varias candidatas, restringir por clave de correlación al conjunto
///   de instancias suscritas
/// - Entregar el mensaje sólo cuando hay exactamente un receptor
///
/// Nota sobre errores:
/// - Cada rama en la que no se entrega el mensaje termina en una variante
///   propia de `CorrelationError`; el error `Mismatch` del motor sólo puede
///   aparecer si el estado del motor cambió entre la consulta y la entrega.
pub struct MessageCorrelator<E>
    where E: ProcessEngine
{
    engine: Arc<E>,
    #[allow(dead_code)]
    config: CorrelatorConfig,
}

impl<E> MessageCorrelator<E> where E: ProcessEngine
{
    /// Crea una nueva instancia del correlator. `engine` es el acceso al
    /// motor inyectado.
    pub fn new(engine: Arc<E>, _config: CorrelatorConfig) -> Self {
        Self { engine, config: CorrelatorConfig {} }
    }

    /// Primera consulta del patrón: suscripciones de mensaje activas para
    /// `message_name`, filtradas por tipo `Message`.
    pub fn find_subscriptions(&self, message_name: &str) -> Result<Vec<EventSubscription>, CorrelationError> {
        let query = EventSubscriptionQuery::new().event_type(EventType::Message)
                                                 .event_name(message_name);
        Ok(self.engine.query_event_subscriptions(&query)?)
    }

    /// Segunda consulta del patrón: variables con nombre y valor candidatos,
    /// restringidas a las instancias dueñas de `subscriptions`.
    ///
    /// La restricción por instancia es la que evita que una variable igual
    /// en una instancia no suscrita cuente como coincidencia.
    pub fn narrow_by_key(&self,
                         subscriptions: &[EventSubscription],
                         key_name: &str,
                         key_value: &JsonValue)
                         -> Result<Vec<VariableInstance>, CorrelationError> {
        let ids: Vec<Uuid> = subscriptions.iter().map(|s| s.process_instance_id()).collect();
        let query = VariableInstanceQuery::new().name(key_name)
                                                .value_eq(key_value.clone())
                                                .process_instance_id_in(ids);
        Ok(self.engine.query_variable_instances(&query)?)
    }

    /// Procedimiento completo: consulta, decide por cardinalidad y entrega.
    ///
    /// Input:
    /// - `base`: petición de correlación (nombre del mensaje y, si las hay,
    ///   variables de proceso a fijar en la entrega).
    /// - `candidate_key`: clave de correlación candidata, usada sólo cuando
    ///   la primera consulta devuelve más de una suscripción.
    ///
    /// Output:
    /// - `Ok(CorrelationResult)` cuando el mensaje se entregó a exactamente
    ///   un receptor.
    /// - Una variante de `CorrelationError` en cualquier rama que no
    ///   entrega: sin suscripción, varias sin clave, clave sin coincidencia
    ///   o clave con varias coincidencias.
    pub fn correlate(&self,
                     base: CorrelationRequest,
                     candidate_key: Option<(&str, JsonValue)>)
                     -> Result<CorrelationResult, CorrelationError> {
        let message_name = base.message_name().to_string();
        let subscriptions = self.find_subscriptions(&message_name)?;

        match subscriptions.len() {
            0 => Err(CorrelationError::NoSubscription(message_name)),
            1 => {
                // Receptor único: entrega directa, sin clave de correlación.
                Ok(self.engine.correlate_message(&base)?)
            }
            candidates => {
                let (key_name, key_value) = match candidate_key {
                    Some(k) => k,
                    None => {
                        return Err(CorrelationError::AmbiguousSubscription { message: message_name,
                                                                             candidates })
                    }
                };

                let matches = self.narrow_by_key(&subscriptions, key_name, &key_value)?;
                match matches.len() {
                    0 => Err(CorrelationError::NoInstanceForKey { key: key_name.to_string() }),
                    1 => {
                        // Exactamente una instancia candidata: entregar con
                        // el mapa de claves para que el motor resuelva al
                        // mismo receptor.
                        let request = base.with_correlation_key(key_name, key_value);
                        Ok(self.engine.correlate_message(&request)?)
                    }
                    n => Err(CorrelationError::AmbiguousKey { key: key_name.to_string(), candidates: n }),
                }
            }
        }
    }
}
