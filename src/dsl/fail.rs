//! `fail`: always errors. Exercises error routing in tests and demos.

use crate::context::{FlowContext, Runtime};
use crate::errors::{EngineError, Result};
use crate::types::{AttrModel, InputEvent, OutputEvent};

/// Fails with the `message` attribute, or a fixed message without one.
pub struct Fail;

impl super::Dsl for Fail {
  fn execute(
    &mut self,
    _runtime: &mut Runtime,
    _ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    Err(EngineError::Dsl(model.text_or("message", "Simulated failure")))
  }
}
