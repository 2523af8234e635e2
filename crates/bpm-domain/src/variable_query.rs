use crate::VariableInstance;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

/// Filtro de consulta sobre las variables de proceso del motor.
///
/// En el patrón de correlación esta consulta se usa para desambiguar:
/// se fija el nombre y valor de la clave candidata y se restringe al
/// conjunto de instancias extraído de las suscripciones encontradas en
/// la primera consulta. La igualdad del valor es igualdad JSON estricta,
/// sin coerción de tipos.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableInstanceQuery {
    name: Option<String>,
    value_eq: Option<JsonValue>,
    process_instance_id_in: Vec<Uuid>,
}

impl VariableInstanceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restringe por nombre de variable.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Restringe por igualdad de valor (JSON).
    pub fn value_eq(mut self, value: JsonValue) -> Self {
        self.value_eq = Some(value);
        self
    }

    /// Restringe al conjunto de instancias dado. Una lista vacía significa
    /// sin restricción por instancia.
    pub fn process_instance_id_in(mut self, ids: Vec<Uuid>) -> Self {
        self.process_instance_id_in = ids;
        self
    }

    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value_eq_filter(&self) -> Option<&JsonValue> {
        self.value_eq.as_ref()
    }

    pub fn process_instance_id_in_filter(&self) -> &[Uuid] {
        &self.process_instance_id_in
    }

    /// Evalúa el filtro contra una variable concreta.
    pub fn matches(&self, variable: &VariableInstance) -> bool {
        if let Some(ref name) = self.name {
            if variable.name() != name {
                return false;
            }
        }
        if let Some(ref value) = self.value_eq {
            if variable.value() != value {
                return false;
            }
        }
        if !self.process_instance_id_in.is_empty()
           && !self.process_instance_id_in.contains(&variable.process_instance_id())
        {
            return false;
        }
        true
    }
}
