// dto.rs — formato de cable de la API REST del motor (camelCase).
use bpm_domain::{CorrelationRequest, CorrelationResult, DomainError, EventSubscription, EventType,
                 VariableInstance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscriptionDto {
  pub id: Uuid,
  pub event_type: String,
  pub event_name: String,
  pub process_instance_id: Uuid,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub activity_id: Option<String>,
  pub created: DateTime<Utc>,
}

impl TryFrom<EventSubscriptionDto> for EventSubscription {
  type Error = DomainError;

  fn try_from(dto: EventSubscriptionDto) -> Result<Self, Self::Error> {
    let event_type: EventType = dto.event_type.parse()?;
    EventSubscription::from_parts(dto.id,
                                  event_type,
                                  &dto.event_name,
                                  dto.process_instance_id,
                                  dto.activity_id,
                                  dto.created)
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInstanceDto {
  pub id: Uuid,
  pub name: String,
  pub value: JsonValue,
  pub process_instance_id: Uuid,
  pub created: DateTime<Utc>,
}

impl TryFrom<VariableInstanceDto> for VariableInstance {
  type Error = DomainError;

  fn try_from(dto: VariableInstanceDto) -> Result<Self, Self::Error> {
    VariableInstance::from_parts(dto.id, &dto.name, dto.value, dto.process_instance_id, dto.created)
  }
}

/// Envoltura de valor usada por el motor en los mapas de claves y variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueDto {
  pub value: JsonValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationRequestBody {
  pub message_name: String,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub correlation_keys: BTreeMap<String, ValueDto>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub process_variables: BTreeMap<String, ValueDto>,
}

impl From<&CorrelationRequest> for CorrelationRequestBody {
  fn from(request: &CorrelationRequest) -> Self {
    let wrap = |m: &BTreeMap<String, JsonValue>| {
      m.iter()
       .map(|(k, v)| (k.clone(), ValueDto { value: v.clone() }))
       .collect::<BTreeMap<String, ValueDto>>()
    };
    Self { message_name: request.message_name().to_string(),
           correlation_keys: wrap(request.correlation_keys()),
           process_variables: wrap(request.process_variables()) }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResultDto {
  pub process_instance_id: Uuid,
  pub subscription_id: Uuid,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub activity_id: Option<String>,
  pub correlated_at: DateTime<Utc>,
}

impl From<CorrelationResultDto> for CorrelationResult {
  fn from(dto: CorrelationResultDto) -> Self {
    Self { process_instance_id: dto.process_instance_id,
           subscription_id: dto.subscription_id,
           activity_id: dto.activity_id,
           correlated_at: dto.correlated_at }
  }
}

/// Cuerpo de error que devuelve el motor en respuestas no-2xx. Para un
/// rechazo de correlación (`type = "mismatch"`) incluye el número de
/// receptores encontrados.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBodyDto {
  #[serde(rename = "type")]
  pub error_type: String,
  pub message: String,
  #[serde(default)]
  pub candidates: Option<usize>,
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn subscription_dto_roundtrips_camel_case() {
    let raw = json!({
      "id": "7f8d2c70-0000-4000-8000-000000000001",
      "eventType": "message",
      "eventName": "my_message",
      "processInstanceId": "7f8d2c70-0000-4000-8000-000000000002",
      "created": "2024-05-01T10:00:00Z"
    });
    let dto: EventSubscriptionDto = serde_json::from_value(raw).expect("decode");
    assert_eq!(dto.event_name, "my_message");
    assert!(dto.activity_id.is_none());

    let sub = EventSubscription::try_from(dto).expect("convert");
    assert_eq!(sub.event_type(), EventType::Message);
    assert_eq!(sub.event_name(), "my_message");
  }

  #[test]
  fn subscription_dto_rejects_unknown_event_type() {
    let raw = json!({
      "id": "7f8d2c70-0000-4000-8000-000000000001",
      "eventType": "timer",
      "eventName": "my_message",
      "processInstanceId": "7f8d2c70-0000-4000-8000-000000000002",
      "created": "2024-05-01T10:00:00Z"
    });
    let dto: EventSubscriptionDto = serde_json::from_value(raw).expect("decode");
    assert!(EventSubscription::try_from(dto).is_err());
  }

  #[test]
  fn correlation_body_wraps_values_and_skips_empty_maps() {
    let request = CorrelationRequest::message("my_message").expect("request")
                                                           .with_correlation_key("aCorrelationKey",
                                                                                 json!("a value used for correlation"));
    let body = CorrelationRequestBody::from(&request);
    let encoded = serde_json::to_value(&body).expect("encode");
    assert_eq!(encoded,
               json!({
                 "messageName": "my_message",
                 "correlationKeys": {
                   "aCorrelationKey": { "value": "a value used for correlation" }
                 }
               }));
  }

  #[test]
  fn error_body_decodes_mismatch_candidates() {
    let raw = json!({
      "type": "mismatch",
      "message": "2 subscriptions for 'my_message'",
      "candidates": 2
    });
    let err: ErrorBodyDto = serde_json::from_value(raw).expect("decode");
    assert_eq!(err.error_type, "mismatch");
    assert_eq!(err.candidates, Some(2));
  }
}
