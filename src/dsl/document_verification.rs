//! `documentVerification`: verifies the customer's identity document.

use tracing::{debug, info};

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct DocumentVerification;

impl super::Dsl for DocumentVerification {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let document_type = model.text_or("documentType", "passport");
    let document_id = model.text_or("documentId", "123456789");

    if ctx.var("riskLevel") == "high" {
      debug!(customer = %ctx.var("customerName"), "extra scrutiny for high-risk customer");
    }
    info!(%document_type, %document_id, "verified document");

    ctx.put_var(runtime, "documentsVerified", "true");
    ctx.put_var(runtime, "documentType", &document_type);
    ctx.put_var(runtime, "documentID", &document_id);
    Ok(None)
  }
}
