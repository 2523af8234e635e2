use bpm_domain::{DomainStubs, EventSubscriptionQuery, EventType, VariableInstanceQuery};
use serde_json::json;

#[test]
fn unset_filters_match_everything() {
  let sub = DomainStubs::waiting_subscription("my_message");
  assert!(EventSubscriptionQuery::new().matches(&sub));
}

#[test]
fn subscription_filters_combine_conjunctively() {
  let (subs, _vars) = DomainStubs::sample_pair("my_message", "aCorrelationKey", "a value used for correlation");

  let query = EventSubscriptionQuery::new().event_type(EventType::Message)
                                           .event_name("my_message");
  assert!(subs.iter().all(|s| query.matches(s)));

  // adding an instance filter excludes the other subscriber
  let narrowed = query.clone().process_instance_id(subs[0].process_instance_id());
  assert!(narrowed.matches(&subs[0]));
  assert!(!narrowed.matches(&subs[1]));

  assert!(!EventSubscriptionQuery::new().event_name("other_message").matches(&subs[0]));
  assert!(!EventSubscriptionQuery::new().event_type(EventType::Signal).matches(&subs[0]));
}

#[test]
fn variable_filters_scope_name_value_and_instances() {
  let (subs, vars) = DomainStubs::sample_pair("my_message", "aCorrelationKey", "a value used for correlation");
  let ids: Vec<_> = subs.iter().map(|s| s.process_instance_id()).collect();

  let query = VariableInstanceQuery::new().name("aCorrelationKey")
                                          .value_eq(json!("a value used for correlation"))
                                          .process_instance_id_in(ids);
  let matched: Vec<_> = vars.iter().filter(|v| query.matches(v)).collect();
  assert_eq!(matched.len(), 1);
  assert_eq!(matched[0].process_instance_id(), subs[0].process_instance_id());
}

#[test]
fn value_equality_is_strict_json_equality() {
  let (_subs, vars) = DomainStubs::sample_pair("my_message", "aCorrelationKey", "42");
  // the key was seeded as the string "42"; the number 42 must not match
  let as_number = VariableInstanceQuery::new().name("aCorrelationKey").value_eq(json!(42));
  assert!(vars.iter().all(|v| !as_number.matches(v)));
  let as_string = VariableInstanceQuery::new().name("aCorrelationKey").value_eq(json!("42"));
  assert_eq!(vars.iter().filter(|v| as_string.matches(v)).count(), 1);
}
