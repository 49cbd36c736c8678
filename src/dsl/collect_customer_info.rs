//! `collectCustomerInfo`: seeds the customer profile vars.

use tracing::info;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

pub struct CollectCustomerInfo;

impl super::Dsl for CollectCustomerInfo {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let name = model.text_or("name", "John Doe");
    let age = model.text_or("age", "30");
    let transaction_value = model.text_or("transactionValue", "1000");
    let country_code = model.text_or("countryCode", "US");

    info!(%name, %age, %transaction_value, %country_code, "collecting customer info");

    ctx.put_var(runtime, "customerName", &name);
    ctx.put_var(runtime, "customerAge", &age);
    ctx.put_var(runtime, "transactionValue", &transaction_value);
    ctx.put_var(runtime, "countryCode", &country_code);
    Ok(None)
  }
}
