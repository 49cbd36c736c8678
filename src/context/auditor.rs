//! Audit sink observing every externally relevant context mutation.

use super::FlowContext;
use crate::errors::EngineError;

/// Receives a callback for each auditable event during an execution. All
/// hooks must be side-effect-only; the engine ignores their outcome.
pub trait ContextAuditor: Send + Sync {
  /// A var is about to change from `old_value` to `new_value`.
  fn set_var(&self, ctx: &FlowContext, key: &str, new_value: &str, old_value: &str);

  /// The executor entered a step.
  fn transition(&self, ctx: &FlowContext, flow_id: &str, step_id: &str);

  /// A DSL element is about to run.
  fn execute(&self, ctx: &FlowContext, flow_id: &str, step_id: &str, dsl_name: &str);

  /// A post-step task is about to run.
  fn execute_post_step(&self, ctx: &FlowContext, flow_id: &str, step_id: &str);

  /// A post-commit task is about to run.
  fn execute_post_commit(&self, ctx: &FlowContext, flow_id: &str);

  /// An element or deferred task failed.
  fn error(&self, ctx: &FlowContext, flow_id: &str, step_id: &str, dsl_name: &str, error: &EngineError);
}

/// Auditor that discards everything. Unit-test support.
pub struct NullAuditor;

impl ContextAuditor for NullAuditor {
  fn set_var(&self, _ctx: &FlowContext, _key: &str, _new_value: &str, _old_value: &str) {}

  fn transition(&self, _ctx: &FlowContext, _flow_id: &str, _step_id: &str) {}

  fn execute(&self, _ctx: &FlowContext, _flow_id: &str, _step_id: &str, _dsl_name: &str) {}

  fn execute_post_step(&self, _ctx: &FlowContext, _flow_id: &str, _step_id: &str) {}

  fn execute_post_commit(&self, _ctx: &FlowContext, _flow_id: &str) {}

  fn error(
    &self,
    _ctx: &FlowContext,
    _flow_id: &str,
    _step_id: &str,
    _dsl_name: &str,
    _error: &EngineError,
  ) {
  }
}
