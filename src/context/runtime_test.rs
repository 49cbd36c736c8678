//! Tests for `runtime`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::context::{NullAuditor, Runtime};
use crate::types::OutputValue;

#[test]
fn deferred_tasks_drain_in_order_and_clear() {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx-1");
  let counter = Arc::new(AtomicUsize::new(0));

  for expected in 0..3 {
    let counter = counter.clone();
    rt.add_post_step_task(move || {
      assert_eq!(counter.fetch_add(1, Ordering::SeqCst), expected);
      Ok(())
    });
  }

  let tasks = rt.take_post_step_tasks();
  assert_eq!(tasks.len(), 3);
  for task in tasks {
    task().unwrap();
  }
  assert_eq!(counter.load(Ordering::SeqCst), 3);
  assert!(rt.take_post_step_tasks().is_empty());
}

#[test]
fn post_commit_tasks_are_separate_from_post_step() {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx-1");
  rt.add_post_step_task(|| Ok(()));
  rt.add_post_commit_task(|| Ok(()));
  rt.add_post_commit_task(|| Ok(()));

  assert_eq!(rt.take_post_step_tasks().len(), 1);
  assert_eq!(rt.take_post_commit_tasks().len(), 2);
}

#[test]
fn output_values_last_write_wins() {
  let mut rt = Runtime::new(Arc::new(NullAuditor), "tx-1");
  rt.add_output_value("k", OutputValue::text("first"));
  rt.add_output_value("k", OutputValue::text("second"));

  assert_eq!(rt.output_values().len(), 1);
  let values = rt.take_output_values();
  assert_eq!(values.get("k").unwrap().as_text(), Some("second"));
  assert!(rt.output_values().is_empty());
}

#[test]
fn transaction_id_is_exposed() {
  let rt = Runtime::new(Arc::new(NullAuditor), "lock-9");
  assert_eq!(rt.transaction_id(), "lock-9");
}
