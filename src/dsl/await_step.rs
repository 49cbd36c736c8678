//! `await`: pauses the context until a later execution resumes it.

use tracing::debug;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

/// Pauses the flow; the `at` attribute names the step a future execution
/// resumes from.
pub struct Await;

impl super::Dsl for Await {
  fn execute(
    &mut self,
    _runtime: &mut Runtime,
    _ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let Some(at) = model.text("at") else {
      debug!("await: no at attribute, skipping");
      return Ok(None);
    };
    Ok(Some(OutputEvent::await_at(at)))
  }
}
