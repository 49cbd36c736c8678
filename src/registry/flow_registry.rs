//! Flow-id to flow mapping.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::model::Flow;

/// Holds registered flows behind shared references; a flow never changes
/// after registration. Last write wins on id collision.
#[derive(Default)]
pub struct FlowRegistry {
  flows: RwLock<HashMap<String, Arc<Flow>>>,
}

impl FlowRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(&self, flow: Flow) -> Arc<Flow> {
    let flow = Arc::new(flow);
    let mut flows = self.flows.write().expect("flow registry poisoned");
    flows.insert(flow.id.clone(), Arc::clone(&flow));
    flow
  }

  pub fn get(&self, id: &str) -> Option<Arc<Flow>> {
    let flows = self.flows.read().expect("flow registry poisoned");
    flows.get(id).cloned()
  }
}
