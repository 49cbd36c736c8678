//! Durable per-execution state: vars, transitions, and the state machine.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::Runtime;
use crate::errors::{EngineError, Result};

/// Upper bound on the transition history; oldest entries drop first.
pub const MAX_TRANSITION_HISTORY: usize = 1000;

/// Lifecycle state of a context. `End` and `Error` are terminal; `Await` is a
/// resumable pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextState {
  Undefined,
  Alive,
  Await,
  End,
  Error,
}

impl std::fmt::Display for ContextState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      ContextState::Undefined => "Undefined",
      ContextState::Alive => "Alive",
      ContextState::Await => "Await",
      ContextState::End => "End",
      ContextState::Error => "Error",
    };
    f.write_str(s)
  }
}

impl std::str::FromStr for ContextState {
  type Err = EngineError;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "Undefined" => Ok(ContextState::Undefined),
      "Alive" => Ok(ContextState::Alive),
      "Await" => Ok(ContextState::Await),
      "End" => Ok(ContextState::End),
      "Error" => Ok(ContextState::Error),
      other => Err(EngineError::Validation(format!(
        "Unknown context state {other}"
      ))),
    }
  }
}

/// The durable unit of execution state.
///
/// Vars are only writable through [`FlowContext::put_var`], which routes every
/// change past the auditor carried by the current [`Runtime`]. Transient vars
/// live for one execution and are skipped by serialization, so any repository
/// that round-trips through serde drops them for free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowContext {
  pub id: String,
  state: ContextState,
  pub current_flow: String,
  pub current_step: String,
  vars: HashMap<String, String>,
  #[serde(skip)]
  transient_vars: HashMap<String, Value>,
  transitions: VecDeque<String>,
}

impl FlowContext {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      state: ContextState::Undefined,
      current_flow: String::new(),
      current_step: String::new(),
      vars: HashMap::new(),
      transient_vars: HashMap::new(),
      transitions: VecDeque::new(),
    }
  }

  pub fn state(&self) -> ContextState {
    self.state
  }

  /// Moves the context to `state`. Leaving `End` is forbidden.
  pub fn set_state(&mut self, state: ContextState) -> Result<()> {
    if self.state == ContextState::End && state != ContextState::End {
      return Err(EngineError::State(format!("State of {} is End", self.id)));
    }
    if self.state != state {
      info!(context = %self.id, from = %self.state, to = %state, "state change");
    }
    self.state = state;
    Ok(())
  }

  /// Reads a var; absent keys read as the empty string.
  pub fn var(&self, key: &str) -> &str {
    self.vars.get(key).map(String::as_str).unwrap_or("")
  }

  /// Writes a var. The auditor attached to `runtime` observes the change
  /// before it lands.
  pub fn put_var(&mut self, runtime: &Runtime, key: &str, value: &str) {
    let old = self.vars.get(key).cloned().unwrap_or_default();
    runtime.auditor().set_var(self, key, value, &old);
    if old.is_empty() {
      info!(context = %self.id, key, value, "var set");
    } else if old != value {
      info!(context = %self.id, key, old = %old, new = %value, "var changed");
    }
    self.vars.insert(key.to_string(), value.to_string());
  }

  pub fn vars(&self) -> &HashMap<String, String> {
    &self.vars
  }

  /// Writes a per-execution scratch value. Not audited, not persisted.
  pub fn put_transient(&mut self, key: &str, value: Value) {
    self.transient_vars.insert(key.to_string(), value);
  }

  pub fn transient(&self, key: &str) -> Option<&Value> {
    self.transient_vars.get(key)
  }

  /// Appends a `flowId/stepId` entry to the bounded transition history.
  pub fn push_transition(&mut self, entry: impl Into<String>) {
    self.transitions.push_back(entry.into());
    if self.transitions.len() > MAX_TRANSITION_HISTORY {
      self.transitions.pop_front();
    }
  }

  pub fn transitions(&self) -> impl Iterator<Item = &str> {
    self.transitions.iter().map(String::as_str)
  }

  pub fn transition_count(&self) -> usize {
    self.transitions.len()
  }
}
