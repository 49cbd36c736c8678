//! Flow and step structures.

use std::collections::HashMap;

use crate::types::DslMetadata;

/// A named node in a flow: an ordered list of logic elements followed by an
/// ordered list of final elements. Final elements run after the logic list
/// and their output, when present, overrides the logic list's output.
#[derive(Debug, Clone)]
pub struct FlowStep {
  pub id: String,
  pub logic_elements: Vec<DslMetadata>,
  pub final_elements: Vec<DslMetadata>,
}

impl FlowStep {
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      logic_elements: Vec::new(),
      final_elements: Vec::new(),
    }
  }
}

/// A named step graph. Immutable once registered; the registry hands out
/// shared references only.
#[derive(Debug, Clone)]
pub struct Flow {
  pub id: String,
  pub default_step: String,
  pub error_step: Option<String>,
  steps: HashMap<String, FlowStep>,
}

impl Flow {
  pub fn new(id: impl Into<String>, default_step: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      default_step: default_step.into(),
      error_step: None,
      steps: HashMap::new(),
    }
  }

  pub fn with_error_step(mut self, step: impl Into<String>) -> Self {
    self.error_step = Some(step.into());
    self
  }

  /// Adds a step, keyed by its id. Replaces any step with the same id.
  pub fn put_step(&mut self, step: FlowStep) {
    self.steps.insert(step.id.clone(), step);
  }

  pub fn fetch_step(&self, id: &str) -> Option<&FlowStep> {
    self.steps.get(id)
  }

  pub fn steps(&self) -> impl Iterator<Item = &FlowStep> {
    self.steps.values()
  }
}
