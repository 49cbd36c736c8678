//! `finalDecision`: rolls the check results up into an approval verdict.

use tracing::info;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct FinalDecision;

impl super::Dsl for FinalDecision {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let auto_approve = model.text("autoApprove") == Some("true");

    // Elevated risk tiers would normally queue for manual review; the demo
    // approves any customer whose checks all passed.
    let approved = ctx.var("infoValid") == "true"
      && ctx.var("documentsVerified") == "true"
      && ctx.var("sanctionsCheckPassed") == "true"
      && ctx.var("amlCheckPassed") == "true";

    info!(
      customer = %ctx.var("customerName"),
      risk_level = %ctx.var("riskLevel"),
      auto_approve,
      approved,
      "final decision"
    );

    ctx.put_var(runtime, "kycApproved", if approved { "true" } else { "false" });
    ctx.put_var(
      runtime,
      "kycDecisionReason",
      if approved {
        "All checks passed"
      } else {
        "One or more checks failed"
      },
    );
    Ok(None)
  }
}
