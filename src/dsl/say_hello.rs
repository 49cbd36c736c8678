//! `sayHello`: demo element writing a greeting var.

use tracing::info;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct SayHello;

impl super::Dsl for SayHello {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let name = model.text_or("name", "World");
    let message = format!("Hello, {name}!");
    info!(%message, "sayHello");
    ctx.put_var(runtime, "greeting", &message);
    Ok(None)
  }
}
