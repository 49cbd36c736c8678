//! Tests for `risk_assessment`.

use std::sync::Arc;

use crate::context::{FlowContext, NullAuditor, Runtime};
use crate::dsl::{Dsl, RiskAssessment};
use crate::types::{AttrModel, InputEvent};

fn assess(age: &str, value: &str, country: &str) -> FlowContext {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx");
  let mut ctx = FlowContext::new("c1");
  let mut model = AttrModel::new();
  model.set_text("customerAge", age);
  model.set_text("transactionValue", value);
  model.set_text("countryCode", country);
  RiskAssessment
    .execute(&mut rt, &mut ctx, model, &InputEvent::new())
    .unwrap();
  ctx
}

#[test]
fn low_risk_profile() {
  let ctx = assess("35", "3000", "US");
  assert_eq!(ctx.var("riskLevel"), "low");
  assert_eq!(ctx.var("riskFactors"), "age=35,value=3000,country=US");
}

#[test]
fn high_risk_country_dominates() {
  let ctx = assess("35", "3000", "IR");
  assert_eq!(ctx.var("riskLevel"), "high");
}

#[test]
fn large_transactions_are_high_risk() {
  let ctx = assess("35", "15000", "US");
  assert_eq!(ctx.var("riskLevel"), "high");
}

#[test]
fn young_customers_and_mid_values_are_medium_risk() {
  assert_eq!(assess("22", "3000", "US").var("riskLevel"), "medium");
  assert_eq!(assess("35", "7000", "US").var("riskLevel"), "medium");
}

#[test]
fn defaults_apply_when_attributes_absent() {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx");
  let mut ctx = FlowContext::new("c1");
  RiskAssessment
    .execute(&mut rt, &mut ctx, AttrModel::new(), &InputEvent::new())
    .unwrap();
  assert_eq!(ctx.var("riskLevel"), "low");
  assert_eq!(ctx.var("riskFactors"), "age=30,value=1000,country=US");
}
