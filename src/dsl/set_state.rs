//! `setState`: moves the context to a named lifecycle state.

use tracing::debug;

use crate::context::{ContextState, FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct SetState;

impl super::Dsl for SetState {
  fn execute(
    &mut self,
    _runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let Some(val) = model.text("val") else {
      debug!("setState: no val attribute, skipping");
      return Ok(None);
    };
    match val.parse::<ContextState>() {
      Ok(state) => ctx.set_state(state)?,
      Err(_) => debug!(val, "setState: unknown state name, skipping"),
    }
    Ok(None)
  }
}
