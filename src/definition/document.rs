//! Parsed form of a flow document, prior to registry loading.

use std::collections::HashMap;

/// One DSL element as written in the document: tag name, attributes, nested
/// elements, and trimmed text content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementDefinition {
  pub name: String,
  pub attributes: HashMap<String, String>,
  pub children: Vec<ElementDefinition>,
  pub content: String,
}

/// One step: ordered logic elements and ordered final elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepDefinition {
  pub id: String,
  pub elements: Vec<ElementDefinition>,
  pub finally: Vec<ElementDefinition>,
}

/// One flow definition with its steps in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowDefinition {
  pub id: String,
  pub default_step: String,
  pub error_step: Option<String>,
  pub steps: Vec<StepDefinition>,
}

/// A whole document: every flow under the `<cdsl>` root, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDefinition {
  pub flows: Vec<FlowDefinition>,
}
