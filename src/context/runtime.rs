//! Per-execution envelope: auditor handle, transaction id, deferred tasks.

use std::collections::HashMap;
use std::sync::Arc;

use super::ContextAuditor;
use crate::errors::Result;
use crate::types::OutputValue;

/// A deferred side-effect queued by a DSL. Post-step tasks drain at the end
/// of the step that queued them, inside the lock; post-commit tasks drain
/// after the context is persisted and the lock released.
pub type DeferredTask = Box<dyn FnOnce() -> Result<()> + Send>;

/// Transient state scoped to a single `execute` call.
///
/// Built fresh by the executor, handed to every DSL dispatch, and dropped
/// when the call returns. The transaction id equals the id of the lock held
/// for the call.
pub struct Runtime {
  auditor: Arc<dyn ContextAuditor>,
  transaction_id: String,
  post_step_tasks: Vec<DeferredTask>,
  post_commit_tasks: Vec<DeferredTask>,
  output_values: HashMap<String, OutputValue>,
}

impl Runtime {
  pub fn new(auditor: Arc<dyn ContextAuditor>, transaction_id: impl Into<String>) -> Self {
    Self {
      auditor,
      transaction_id: transaction_id.into(),
      post_step_tasks: Vec::new(),
      post_commit_tasks: Vec::new(),
      output_values: HashMap::new(),
    }
  }

  pub fn auditor(&self) -> &dyn ContextAuditor {
    self.auditor.as_ref()
  }

  pub fn transaction_id(&self) -> &str {
    &self.transaction_id
  }

  /// Queues a task to run after the current step's elements finish.
  pub fn add_post_step_task(&mut self, task: impl FnOnce() -> Result<()> + Send + 'static) {
    self.post_step_tasks.push(Box::new(task));
  }

  pub(crate) fn take_post_step_tasks(&mut self) -> Vec<DeferredTask> {
    std::mem::take(&mut self.post_step_tasks)
  }

  /// Queues a task to run after the context is persisted and the lock
  /// released.
  pub fn add_post_commit_task(&mut self, task: impl FnOnce() -> Result<()> + Send + 'static) {
    self.post_commit_tasks.push(Box::new(task));
  }

  pub(crate) fn take_post_commit_tasks(&mut self) -> Vec<DeferredTask> {
    std::mem::take(&mut self.post_commit_tasks)
  }

  /// Publishes a caller-visible value under `key`. Vars snapshotted from the
  /// context override runtime values on key collision.
  pub fn add_output_value(&mut self, key: impl Into<String>, value: OutputValue) {
    self.output_values.insert(key.into(), value);
  }

  pub fn output_values(&self) -> &HashMap<String, OutputValue> {
    &self.output_values
  }

  pub(crate) fn take_output_values(&mut self) -> HashMap<String, OutputValue> {
    std::mem::take(&mut self.output_values)
  }
}
