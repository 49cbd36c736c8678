//! Durable execution context and its per-run envelope.

mod auditor;
mod flow_context;
mod repository;
mod runtime;
#[cfg(test)]
mod runtime_test;

pub use auditor::{ContextAuditor, NullAuditor};
pub use flow_context::{ContextState, FlowContext, MAX_TRANSITION_HISTORY};
pub use repository::{ContextRepository, InMemoryContextRepository};
pub use runtime::{DeferredTask, Runtime};
