use bpm_domain::CorrelationRequest;
use correlation::correlator::{CorrelatorConfig, MessageCorrelator};
use correlation::stubs::InMemoryProcessEngine;
use correlation::CorrelationError;
use serde_json::json;
use std::sync::Arc;

fn correlator(engine: &Arc<InMemoryProcessEngine>) -> MessageCorrelator<InMemoryProcessEngine> {
  MessageCorrelator::new(engine.clone(), CorrelatorConfig {})
}

#[test]
fn no_subscription_is_not_correlated() {
  let engine = Arc::new(InMemoryProcessEngine::new());
  let correlator = correlator(&engine);

  let base = CorrelationRequest::message("my_message").expect("request");
  match correlator.correlate(base, None) {
    Err(CorrelationError::NoSubscription(name)) => assert_eq!(name, "my_message"),
    other => panic!("expected NoSubscription, got {:?}", other),
  }
  // the engine never saw a correlation attempt
  assert!(engine.deliveries().expect("deliveries").is_empty());
}

#[test]
fn multiple_subscriptions_without_key_are_not_correlated() {
  let engine = Arc::new(InMemoryProcessEngine::new());
  engine.start_waiting_instance("my_message").expect("seed first");
  engine.start_waiting_instance("my_message").expect("seed second");
  let correlator = correlator(&engine);

  let base = CorrelationRequest::message("my_message").expect("request");
  match correlator.correlate(base, None) {
    Err(CorrelationError::AmbiguousSubscription { candidates, .. }) => assert_eq!(candidates, 2),
    other => panic!("expected AmbiguousSubscription, got {:?}", other),
  }
  assert!(engine.deliveries().expect("deliveries").is_empty());
}

#[test]
fn key_without_matching_instance_is_not_correlated() {
  let engine = Arc::new(InMemoryProcessEngine::new());
  let first = engine.start_waiting_instance("my_message").expect("seed first");
  engine.start_waiting_instance("my_message").expect("seed second");
  engine.set_variable(first, "aCorrelationKey", json!("some other value")).expect("set var");
  let correlator = correlator(&engine);

  let base = CorrelationRequest::message("my_message").expect("request");
  match correlator.correlate(base, Some(("aCorrelationKey", json!("a value used for correlation")))) {
    Err(CorrelationError::NoInstanceForKey { key }) => assert_eq!(key, "aCorrelationKey"),
    other => panic!("expected NoInstanceForKey, got {:?}", other),
  }
  assert!(engine.deliveries().expect("deliveries").is_empty());
}

#[test]
fn key_matching_multiple_instances_is_not_correlated() {
  let engine = Arc::new(InMemoryProcessEngine::new());
  let first = engine.start_waiting_instance("my_message").expect("seed first");
  let second = engine.start_waiting_instance("my_message").expect("seed second");
  engine.set_variable(first, "aCorrelationKey", json!("a value used for correlation")).expect("set var");
  engine.set_variable(second, "aCorrelationKey", json!("a value used for correlation")).expect("set var");
  let correlator = correlator(&engine);

  let base = CorrelationRequest::message("my_message").expect("request");
  match correlator.correlate(base, Some(("aCorrelationKey", json!("a value used for correlation")))) {
    Err(CorrelationError::AmbiguousKey { candidates, .. }) => assert_eq!(candidates, 2),
    other => panic!("expected AmbiguousKey, got {:?}", other),
  }
  assert!(engine.deliveries().expect("deliveries").is_empty());
}

#[test]
fn key_on_unsubscribed_instance_does_not_count() {
  let engine = Arc::new(InMemoryProcessEngine::new());
  let first = engine.start_waiting_instance("my_message").expect("seed first");
  let _second = engine.start_waiting_instance("my_message").expect("seed second");
  // a third instance carries the same key but is not subscribed to the message
  let outsider = engine.start_waiting_instance("other_message").expect("seed outsider");
  engine.set_variable(first, "aCorrelationKey", json!("a value used for correlation")).expect("set var");
  engine.set_variable(outsider, "aCorrelationKey", json!("a value used for correlation")).expect("set var");
  let correlator = correlator(&engine);

  // the variable query is scoped to the subscribed instances, so the
  // outsider must not turn this into an ambiguous match
  let subs = correlator.find_subscriptions("my_message").expect("subscriptions");
  assert_eq!(subs.len(), 2);
  let narrowed = correlator.narrow_by_key(&subs, "aCorrelationKey", &json!("a value used for correlation"))
                           .expect("narrow");
  assert_eq!(narrowed.len(), 1);
  assert_eq!(narrowed[0].process_instance_id(), first);

  let base = CorrelationRequest::message("my_message").expect("request");
  let result = correlator.correlate(base, Some(("aCorrelationKey", json!("a value used for correlation"))))
                         .expect("correlate");
  assert_eq!(result.process_instance_id, first);
}

#[test]
fn single_subscription_ignores_candidate_key() {
  let engine = Arc::new(InMemoryProcessEngine::new());
  let waiting = engine.start_waiting_instance("my_message").expect("seed");
  let correlator = correlator(&engine);

  // uniqueness is already proven by the first query; the key is not needed
  // and must not prevent delivery even if it matches nothing
  let base = CorrelationRequest::message("my_message").expect("request");
  let result = correlator.correlate(base, Some(("aCorrelationKey", json!("unused")))).expect("correlate");
  assert_eq!(result.process_instance_id, waiting);
}
