//! Tests for `flow_registry`.

use crate::model::{Flow, FlowStep};
use crate::registry::FlowRegistry;

#[test]
fn register_then_get() {
  let registry = FlowRegistry::new();
  let mut flow = Flow::new("f", "init");
  flow.put_step(FlowStep::new("init"));
  registry.register(flow);

  let fetched = registry.get("f").unwrap();
  assert_eq!(fetched.id, "f");
  assert!(registry.get("missing").is_none());
}

#[test]
fn last_registration_wins() {
  let registry = FlowRegistry::new();
  registry.register(Flow::new("f", "first"));
  registry.register(Flow::new("f", "second"));

  assert_eq!(registry.get("f").unwrap().default_step, "second");
}
