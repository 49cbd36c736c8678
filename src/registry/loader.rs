//! Turns parsed documents into registered, validated flows.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use super::{DslRegistry, FlowRegistry, FlowValidator};
use crate::definition::{DocumentDefinition, ElementDefinition};
use crate::errors::Result;
use crate::model::{Flow, FlowStep};
use crate::types::{AttrModel, AttrValue, DslMetadata};

/// Builds flows from a document, validates them, and registers them. A
/// validation failure aborts before the offending flow is inserted.
pub struct RegistryLoader {
  flows: Arc<FlowRegistry>,
  dsls: Arc<DslRegistry>,
}

impl RegistryLoader {
  pub fn new(flows: Arc<FlowRegistry>, dsls: Arc<DslRegistry>) -> Self {
    Self { flows, dsls }
  }

  pub fn load_document(&self, doc: &DocumentDefinition) -> Result<()> {
    let validator = FlowValidator::new(&self.dsls);
    for flow_def in &doc.flows {
      let mut flow = Flow::new(&flow_def.id, &flow_def.default_step);
      if let Some(error_step) = &flow_def.error_step {
        flow = flow.with_error_step(error_step);
      }

      for step_def in &flow_def.steps {
        let mut step = FlowStep::new(&step_def.id);
        for element in &step_def.elements {
          step
            .logic_elements
            .push(DslMetadata::new(&element.name, build_model(element)));
        }
        for element in &step_def.finally {
          step
            .final_elements
            .push(DslMetadata::new(&element.name, build_model(element)));
        }
        flow.put_step(step);
      }

      validator.validate_flow(&flow)?;
      info!(flow = %flow.id, steps = flow.steps().count(), "registering flow");
      self.flows.register(flow);
    }
    Ok(())
  }
}

/// Builds the attribute model for one element: attributes as strings, nested
/// elements as nested bags keyed by tag name, text content under `content`.
pub(crate) fn build_model(element: &ElementDefinition) -> AttrModel {
  let mut model = AttrModel::new();
  for (key, value) in &element.attributes {
    model.set_text(key, value);
  }
  for child in &element.children {
    model.set(&child.name, AttrValue::Map(nested_value(child)));
  }
  if !element.content.is_empty() {
    model.set_text("content", &element.content);
  }
  model
}

fn nested_value(element: &ElementDefinition) -> HashMap<String, AttrValue> {
  let mut map: HashMap<String, AttrValue> = element
    .attributes
    .iter()
    .map(|(k, v)| (k.clone(), AttrValue::Text(v.clone())))
    .collect();
  for child in &element.children {
    map.insert(child.name.clone(), AttrValue::Map(nested_value(child)));
  }
  if !element.content.is_empty() {
    map.insert("content".to_string(), AttrValue::Text(element.content.clone()));
  }
  map
}
