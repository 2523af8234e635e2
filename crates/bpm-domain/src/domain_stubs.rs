use crate::{EventSubscription, EventType, VariableInstance};
use serde_json::json;
use uuid::Uuid;

pub struct DomainStubs;

impl DomainStubs {
    /// Crea una suscripción de mensaje de ejemplo para una instancia nueva.
    pub fn waiting_subscription(message_name: &str) -> EventSubscription {
        EventSubscription::waiting(EventType::Message, message_name, Uuid::new_v4(), None).unwrap()
    }

    /// Escenario clásico de desambiguación: dos instancias suscritas al
    /// mismo mensaje y sólo la primera con la clave de correlación.
    ///
    /// Devuelve las suscripciones y las variables asociadas; la primera
    /// suscripción pertenece a la instancia que tiene la clave.
    pub fn sample_pair(message_name: &str,
                       key_name: &str,
                       key_value: &str)
                       -> (Vec<EventSubscription>, Vec<VariableInstance>) {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let subs = vec![EventSubscription::waiting(EventType::Message, message_name, first, None).unwrap(),
                        EventSubscription::waiting(EventType::Message, message_name, second, None).unwrap()];

        // Sólo la primera instancia lleva la clave candidata; la segunda
        // tiene una variable ajena para que el filtro tenga algo que excluir.
        let vars = vec![VariableInstance::fresh(key_name, json!(key_value), first).unwrap(),
                        VariableInstance::fresh("otraVariable", json!(42), second).unwrap()];

        (subs, vars)
    }
}
