//! One DSL element occurrence inside a step.

use serde::{Deserialize, Serialize};

use super::AttrModel;

/// Name plus attribute bag for one element, as loaded from a flow document.
///
/// The name keys into the DSL registry; the model is copied before every
/// dispatch so the registered definition stays pristine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DslMetadata {
  pub name: String,
  pub model: AttrModel,
}

impl DslMetadata {
  pub fn new(name: impl Into<String>, model: AttrModel) -> Self {
    Self {
      name: name.into(),
      model,
    }
  }
}
