//! `riskAssessment`: scores the customer and records the contributing factors.

use tracing::info;

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::types::{AttrModel, InputEvent, OutputEvent};

/// Jurisdictions that always score high.
pub(crate) const HIGH_RISK_COUNTRIES: [&str; 4] = ["AF", "IR", "KP", "SY"];

pub struct RiskAssessment;

impl super::Dsl for RiskAssessment {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    _input: &InputEvent,
  ) -> Result<Option<OutputEvent>> {
    let customer_age = model.text_or("customerAge", "30");
    let transaction_value = model.text_or("transactionValue", "1000");
    let country_code = model.text_or("countryCode", "US");

    let age: i64 = customer_age.parse().unwrap_or(0);
    let value: i64 = transaction_value.parse().unwrap_or(0);

    let risk_level = if HIGH_RISK_COUNTRIES.contains(&country_code.as_str()) {
      "high"
    } else if value > 10_000 {
      "high"
    } else if value > 5_000 || age < 25 {
      "medium"
    } else {
      "low"
    };

    info!(%customer_age, %transaction_value, %country_code, risk_level, "assessed risk");

    ctx.put_var(runtime, "riskLevel", risk_level);
    ctx.put_var(
      runtime,
      "riskFactors",
      &format!("age={customer_age},value={transaction_value},country={country_code}"),
    );
    Ok(None)
  }
}
