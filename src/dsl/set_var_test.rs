//! Tests for `set_var`.

use std::sync::Arc;

use crate::context::{FlowContext, NullAuditor, Runtime};
use crate::dsl::{Dsl, SetVar};
use crate::types::{AttrModel, InputEvent};

fn harness() -> (Runtime, FlowContext, InputEvent) {
  (
    Runtime::new(Arc::new(NullAuditor), "tx"),
    FlowContext::new("c1"),
    InputEvent::new(),
  )
}

#[test]
fn writes_the_named_var() {
  let (mut rt, mut ctx, input) = harness();
  let mut model = AttrModel::new();
  model.set_text("name", "myVar");
  model.set_text("val", "myVal");

  let out = SetVar.execute(&mut rt, &mut ctx, model, &input).unwrap();
  assert!(out.is_none());
  assert_eq!(ctx.var("myVar"), "myVal");
}

#[test]
fn missing_name_or_val_is_a_no_op() {
  let (mut rt, mut ctx, input) = harness();

  let mut only_val = AttrModel::new();
  only_val.set_text("val", "v");
  SetVar
    .execute(&mut rt, &mut ctx, only_val, &input)
    .unwrap();

  let mut only_name = AttrModel::new();
  only_name.set_text("name", "k");
  SetVar
    .execute(&mut rt, &mut ctx, only_name, &input)
    .unwrap();

  assert!(ctx.vars().is_empty());
}
