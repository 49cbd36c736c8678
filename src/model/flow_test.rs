//! Tests for `flow`.

use crate::model::{Flow, FlowStep};
use crate::types::{AttrModel, DslMetadata};

#[test]
fn fetch_step_by_id() {
  let mut flow = Flow::new("f", "init");
  flow.put_step(FlowStep::new("init"));
  flow.put_step(FlowStep::new("end"));

  assert!(flow.fetch_step("init").is_some());
  assert!(flow.fetch_step("end").is_some());
  assert!(flow.fetch_step("nope").is_none());
}

#[test]
fn put_step_replaces_same_id() {
  let mut flow = Flow::new("f", "init");
  flow.put_step(FlowStep::new("init"));

  let mut replacement = FlowStep::new("init");
  replacement
    .logic_elements
    .push(DslMetadata::new("endRoute", AttrModel::new()));
  flow.put_step(replacement);

  assert_eq!(flow.fetch_step("init").unwrap().logic_elements.len(), 1);
  assert_eq!(flow.steps().count(), 1);
}

#[test]
fn error_step_is_optional() {
  let flow = Flow::new("f", "init");
  assert!(flow.error_step.is_none());
  let flow = Flow::new("f", "init").with_error_step("boom");
  assert_eq!(flow.error_step.as_deref(), Some("boom"));
}
