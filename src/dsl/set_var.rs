//! `setVar`: writes one durable context variable.

use tracing::debug;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct SetVar;

impl super::Dsl for SetVar {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let Some(name) = model.text("name").filter(|s| !s.is_empty()) else {
      debug!("setVar: no name attribute, skipping");
      return Ok(None);
    };
    let Some(val) = model.text("val") else {
      debug!(name, "setVar: no val attribute, skipping");
      return Ok(None);
    };
    ctx.put_var(runtime, name, val);
    Ok(None)
  }
}
