//! Referential-integrity checks run before a flow enters the registry.

use super::DslRegistry;
use crate::errors::{EngineError, Result};
use crate::model::Flow;
use crate::types::DslMetadata;

/// Validates flows against the DSL registry: ids present, step references
/// resolvable, every element constructible and statically valid.
pub struct FlowValidator<'a> {
  dsls: &'a DslRegistry,
}

impl<'a> FlowValidator<'a> {
  pub fn new(dsls: &'a DslRegistry) -> Self {
    Self { dsls }
  }

  pub fn validate_flow(&self, flow: &Flow) -> Result<()> {
    if flow.id.is_empty() {
      return Err(EngineError::Validation("Flow must have an id".to_string()));
    }
    if flow.default_step.is_empty() {
      return Err(EngineError::Validation(format!(
        "Flow {} must have a default step",
        flow.id
      )));
    }
    if flow.fetch_step(&flow.default_step).is_none() {
      return Err(EngineError::Validation(format!(
        "Flow {} default step {} does not exist",
        flow.id, flow.default_step
      )));
    }
    if let Some(error_step) = flow.error_step.as_deref() {
      if flow.fetch_step(error_step).is_none() {
        return Err(EngineError::Validation(format!(
          "Flow {} error step {error_step} does not exist",
          flow.id
        )));
      }
    }

    for step in flow.steps() {
      if step.id.is_empty() {
        return Err(EngineError::Validation(format!(
          "Step in flow {} must have an id",
          flow.id
        )));
      }
      for element in &step.logic_elements {
        self.validate_element(&flow.id, &step.id, "logic", element)?;
      }
      for element in &step.final_elements {
        self.validate_element(&flow.id, &step.id, "final", element)?;
      }
    }
    Ok(())
  }

  fn validate_element(
    &self,
    flow_id: &str,
    step_id: &str,
    list: &str,
    element: &DslMetadata,
  ) -> Result<()> {
    if element.name.is_empty() {
      return Err(EngineError::Validation(format!(
        "Unnamed {list} element in step {step_id} of flow {flow_id}"
      )));
    }
    let instance = self.dsls.resolve(element).ok_or_else(|| {
      EngineError::Validation(format!(
        "DSL {} could not be resolved ({list} element in step {step_id} of flow {flow_id})",
        element.name
      ))
    })?;
    instance.validate(&element.model).map_err(|e| {
      EngineError::Validation(format!(
        "Invalid {list} element {} in step {step_id} of flow {flow_id}: {e}",
        element.name
      ))
    })
  }
}
