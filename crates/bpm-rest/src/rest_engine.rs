use crate::dto::{CorrelationRequestBody, CorrelationResultDto, ErrorBodyDto, EventSubscriptionDto,
                 VariableInstanceDto};
use bpm_domain::{CorrelationRequest, CorrelationResult, EventSubscription, EventSubscriptionQuery,
                 VariableInstance, VariableInstanceQuery};
use correlation::{EngineError, ProcessEngine, Result};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use url::Url;

/// Cliente REST que implementa `ProcessEngine`.
///
/// Mapea las tres operaciones del contrato sobre la API HTTP del motor:
/// - `GET  {base}/event-subscription` con los filtros como query params
/// - `GET  {base}/variable-instance` con los filtros como query params
/// - `POST {base}/message` con la petición de correlación como JSON
pub struct RestProcessEngine {
  base_url: Url,
  client: Client,
}

/// Crea el cliente leyendo `ENGINE_REST_URL` del entorno (con soporte de
/// `.env` vía dotenvy).
pub fn new_from_env() -> Result<RestProcessEngine> {
  dotenvy::dotenv().ok();
  let base = std::env::var("ENGINE_REST_URL")
    .map_err(|_| EngineError::Other("ENGINE_REST_URL no está definido en el entorno".to_string()))?;
  RestProcessEngine::new(&base)
}

fn map_transport_err(e: reqwest::Error) -> EngineError {
  EngineError::Connection(e.to_string())
}

/// Traduce el filtro de suscripciones a query params (sólo los fijados).
fn subscription_params(query: &EventSubscriptionQuery) -> Vec<(String, String)> {
  let mut params = Vec::new();
  if let Some(t) = query.event_type_filter() {
    params.push(("eventType".to_string(), t.as_str().to_string()));
  }
  if let Some(name) = query.event_name_filter() {
    params.push(("eventName".to_string(), name.to_string()));
  }
  if let Some(pid) = query.process_instance_id_filter() {
    params.push(("processInstanceId".to_string(), pid.to_string()));
  }
  if let Some(aid) = query.activity_id_filter() {
    params.push(("activityId".to_string(), aid.to_string()));
  }
  params
}

/// Traduce el filtro de variables a query params. El valor viaja como JSON
/// codificado y el conjunto de instancias como lista separada por comas.
fn variable_params(query: &VariableInstanceQuery) -> Vec<(String, String)> {
  let mut params = Vec::new();
  if let Some(name) = query.name_filter() {
    params.push(("name".to_string(), name.to_string()));
  }
  if let Some(value) = query.value_eq_filter() {
    params.push(("value".to_string(), value.to_string()));
  }
  let ids = query.process_instance_id_in_filter();
  if !ids.is_empty() {
    let joined = ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(",");
    params.push(("processInstanceIdIn".to_string(), joined));
  }
  params
}

impl RestProcessEngine {
  pub fn new(base_url: &str) -> Result<Self> {
    let base_url = Url::parse(base_url).map_err(|e| EngineError::Other(format!("URL base inválida: {}", e)))?;
    let client = Client::builder().build().map_err(map_transport_err)?;
    Ok(Self { base_url, client })
  }

  fn endpoint(&self, path: &str) -> Result<Url> {
    self.base_url
        .join(path)
        .map_err(|e| EngineError::Other(format!("URL inválida para '{}': {}", path, e)))
  }

  /// Decodifica una respuesta 2xx o la traduce al error correspondiente.
  /// `context` describe la operación para los mensajes de error.
  fn read_json<T: serde::de::DeserializeOwned>(&self, response: Response, context: &str) -> Result<T> {
    let status = response.status();
    if status.is_success() {
      return response.json::<T>()
                     .map_err(|e| EngineError::Protocol(format!("{}: cuerpo no decodificable: {}", context, e)));
    }

    log::warn!("{}: el motor respondió {}", context, status);
    let body = response.json::<ErrorBodyDto>().ok();
    match (status, body) {
      (StatusCode::NOT_FOUND, _) => Err(EngineError::NotFound(context.to_string())),
      (StatusCode::CONFLICT, Some(err)) if err.error_type == "mismatch" => {
        Err(EngineError::Mismatch { message: err.message, candidates: err.candidates.unwrap_or(0) })
      }
      (_, Some(err)) => Err(EngineError::Protocol(format!("{}: {} ({})", context, err.message, status))),
      (_, None) => Err(EngineError::Protocol(format!("{}: estado {}", context, status))),
    }
  }
}

impl ProcessEngine for RestProcessEngine {
  fn query_event_subscriptions(&self, query: &EventSubscriptionQuery) -> Result<Vec<EventSubscription>> {
    let url = self.endpoint("event-subscription")?;
    log::debug!("GET {} {:?}", url, query);
    let response = self.client
                       .get(url)
                       .query(&subscription_params(query))
                       .send()
                       .map_err(map_transport_err)?;
    let dtos: Vec<EventSubscriptionDto> = self.read_json(response, "consulta de suscripciones")?;
    dtos.into_iter()
        .map(|dto| {
          EventSubscription::try_from(dto).map_err(|e| EngineError::Protocol(format!("suscripción inválida: {}", e)))
        })
        .collect()
  }

  fn query_variable_instances(&self, query: &VariableInstanceQuery) -> Result<Vec<VariableInstance>> {
    let url = self.endpoint("variable-instance")?;
    log::debug!("GET {} {:?}", url, query);
    let response = self.client
                       .get(url)
                       .query(&variable_params(query))
                       .send()
                       .map_err(map_transport_err)?;
    let dtos: Vec<VariableInstanceDto> = self.read_json(response, "consulta de variables")?;
    dtos.into_iter()
        .map(|dto| {
          VariableInstance::try_from(dto).map_err(|e| EngineError::Protocol(format!("variable inválida: {}", e)))
        })
        .collect()
  }

  fn correlate_message(&self, request: &CorrelationRequest) -> Result<CorrelationResult> {
    let url = self.endpoint("message")?;
    let body = CorrelationRequestBody::from(request);
    log::debug!("POST {} mensaje '{}'", url, request.message_name());
    let response = self.client
                       .post(url)
                       .json(&body)
                       .send()
                       .map_err(map_transport_err)?;
    let dto: CorrelationResultDto = self.read_json(response, "correlación de mensaje")?;
    Ok(CorrelationResult::from(dto))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use bpm_domain::EventType;
  use serde_json::json;
  use uuid::Uuid;

  #[test]
  fn subscription_params_only_emit_set_filters() {
    let query = EventSubscriptionQuery::new().event_type(EventType::Message)
                                             .event_name("my_message");
    let params = subscription_params(&query);
    assert_eq!(params,
               vec![("eventType".to_string(), "message".to_string()),
                    ("eventName".to_string(), "my_message".to_string())]);
  }

  #[test]
  fn subscription_params_empty_for_unfiltered_query() {
    assert!(subscription_params(&EventSubscriptionQuery::new()).is_empty());
  }

  #[test]
  fn variable_params_join_instance_ids() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let query = VariableInstanceQuery::new().name("aCorrelationKey")
                                            .value_eq(json!("a value used for correlation"))
                                            .process_instance_id_in(vec![a, b]);
    let params = variable_params(&query);
    assert_eq!(params[0], ("name".to_string(), "aCorrelationKey".to_string()));
    assert_eq!(params[1], ("value".to_string(), "\"a value used for correlation\"".to_string()));
    assert_eq!(params[2], ("processInstanceIdIn".to_string(), format!("{},{}", a, b)));
  }

  #[test]
  fn rejects_invalid_base_url() {
    assert!(RestProcessEngine::new("no es una url").is_err());
  }
}
