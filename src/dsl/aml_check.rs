//! `amlCheck`: anti-money-laundering screening.

use tracing::{debug, info};

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct AmlCheck;

impl super::Dsl for AmlCheck {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let check_level = model.text_or("checkLevel", "standard");

    if ctx.var("riskLevel") == "high" || check_level == "enhanced" {
      debug!(customer = %ctx.var("customerName"), "running enhanced AML screening");
    }
    info!(customer = %ctx.var("customerName"), %check_level, "AML check passed");

    ctx.put_var(runtime, "amlCheckPassed", "true");
    ctx.put_var(runtime, "amlCheckLevel", &check_level);
    Ok(None)
  }
}
