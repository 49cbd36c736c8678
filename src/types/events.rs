//! Input and output events crossing the executor boundary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Action;

/// Caller request to drive a flow.
///
/// No `context_id` means "create a fresh context"; no `requested_step` means
/// "resume from the context's current step, or the flow's default step on
/// first entry".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputEvent {
  pub context_id: Option<String>,
  pub requested_step: Option<String>,
  /// Opaque payload DSL elements may inspect.
  pub payload: Value,
}

impl InputEvent {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_context_id(mut self, id: impl Into<String>) -> Self {
    self.context_id = Some(id.into());
    self
  }

  pub fn with_requested_step(mut self, step: impl Into<String>) -> Self {
    self.requested_step = Some(step.into());
    self
  }

  pub fn with_payload(mut self, payload: Value) -> Self {
    self.payload = payload;
    self
  }
}

/// Output of one DSL element. A DSL returning no output means "no opinion,
/// continue with the next element".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
  pub action: Action,
  /// Route target for `Route`, resume point for `Await`, empty otherwise.
  pub next_route: String,
}

impl OutputEvent {
  pub fn route(target: impl Into<String>) -> Self {
    Self {
      action: Action::Route,
      next_route: target.into(),
    }
  }

  pub fn await_at(step: impl Into<String>) -> Self {
    Self {
      action: Action::Await,
      next_route: step.into(),
    }
  }

  pub fn end() -> Self {
    Self {
      action: Action::End,
      next_route: String::new(),
    }
  }

  pub fn reject() -> Self {
    Self {
      action: Action::Reject,
      next_route: String::new(),
    }
  }
}

/// One caller-visible value published during an execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputValue {
  pub value: Value,
}

impl OutputValue {
  pub fn new(value: Value) -> Self {
    Self { value }
  }

  pub fn text(value: impl Into<String>) -> Self {
    Self {
      value: Value::String(value.into()),
    }
  }

  pub fn as_text(&self) -> Option<&str> {
    self.value.as_str()
  }
}

/// Result of one `FlowExecutor::execute` call.
///
/// `output_values` carries everything the DSLs published plus one entry per
/// context var; on a key collision the var wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowOutputEvent {
  pub context_id: String,
  pub context_state: String,
  /// Action of the last element output applied by the step loop, if any.
  pub action: Option<Action>,
  pub next_route: String,
  pub output_values: HashMap<String, OutputValue>,
}

impl FlowOutputEvent {
  /// Convenience lookup: output value as a string.
  pub fn value_text(&self, key: &str) -> Option<&str> {
    self.output_values.get(key).and_then(OutputValue::as_text)
  }
}
