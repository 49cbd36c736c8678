//! Tests for `say_hello`.

use std::sync::Arc;

use crate::context::{FlowContext, NullAuditor, Runtime};
use crate::dsl::{Dsl, SayHello};
use crate::types::{AttrModel, InputEvent};

#[test]
fn greets_the_named_party() {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx");
  let mut ctx = FlowContext::new("c1");
  let mut model = AttrModel::new();
  model.set_text("name", "Go");

  SayHello
    .execute(&mut rt, &mut ctx, model, &InputEvent::new())
    .unwrap();
  assert_eq!(ctx.var("greeting"), "Hello, Go!");
}

#[test]
fn defaults_to_world() {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx");
  let mut ctx = FlowContext::new("c1");

  SayHello
    .execute(&mut rt, &mut ctx, AttrModel::new(), &InputEvent::new())
    .unwrap();
  assert_eq!(ctx.var("greeting"), "Hello, World!");
}
