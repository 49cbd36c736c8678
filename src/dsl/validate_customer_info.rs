//! `validateCustomerInfo`: sanity-checks the collected profile.

use tracing::info;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct ValidateCustomerInfo;

impl super::Dsl for ValidateCustomerInfo {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let strict = model.text("strictValidation") == Some("true");

    let customer_name = ctx.var("customerName").to_string();
    let customer_age = ctx.var("customerAge").to_string();
    let transaction_value = ctx.var("transactionValue").to_string();
    let country_code = ctx.var("countryCode").to_string();

    let mut errors = Vec::new();
    if customer_name.is_empty() {
      errors.push("Customer name is required");
    }
    if !customer_age.parse::<i64>().is_ok_and(|age| age > 0) {
      errors.push("Invalid customer age");
    }
    if !transaction_value.parse::<i64>().is_ok_and(|v| v > 0) {
      errors.push("Invalid transaction value");
    }
    if strict && country_code.len() != 2 {
      errors.push("Invalid country code");
    }

    let valid = errors.is_empty();
    info!(%customer_name, valid, issues = errors.len(), "validated customer info");

    ctx.put_var(runtime, "infoValid", if valid { "true" } else { "false" });
    if !errors.is_empty() {
      ctx.put_var(runtime, "validationErrors", &errors.len().to_string());
      for (i, message) in errors.iter().enumerate() {
        ctx.put_var(runtime, &format!("validationError{i}"), message);
      }
    }
    Ok(None)
  }
}
