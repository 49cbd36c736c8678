//! `endRoute`: terminates the flow.

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct EndRoute;

impl super::Dsl for EndRoute {
  fn execute(
    &mut self,
    _runtime: &mut Runtime,
    _ctx: &mut FlowContext,
    _model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    Ok(Some(OutputEvent::end()))
  }
}
