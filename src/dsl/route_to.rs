//! `routeTo`: requests a jump to another step.

use tracing::debug;

use crate::context::{FlowContext, Runtime};
use crate::errors::{EngineError, Result};
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct RouteTo;

impl super::Dsl for RouteTo {
  fn execute(
    &mut self,
    _runtime: &mut Runtime,
    _ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let Some(target) = model.text("target").filter(|s| !s.is_empty()) else {
      debug!("routeTo: no target attribute, skipping");
      return Ok(None);
    };
    Ok(Some(OutputEvent::route(target)))
  }

  fn validate(&self, model: &AttrModel) -> Result<()> {
    if model.text("target").filter(|s| !s.is_empty()).is_none() {
      return Err(EngineError::Validation(
        "routeTo requires a target attribute".to_string(),
      ));
    }
    Ok(())
  }
}
