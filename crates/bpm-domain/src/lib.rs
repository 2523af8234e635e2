mod domain_stubs;
mod errors;
mod event_subscription;
mod message;
mod subscription_query;
mod variable_instance;
mod variable_query;

pub use errors::DomainError;
pub use event_subscription::{EventSubscription, EventType};
pub use message::{CorrelationRequest, CorrelationResult};
pub use subscription_query::EventSubscriptionQuery;
pub use variable_instance::VariableInstance;
pub use variable_query::VariableInstanceQuery;
// Re-export de fixtures para que otros crates puedan sembrar datos de ejemplo
pub use domain_stubs::DomainStubs;
