//! Durable storage contract for contexts.

use std::collections::HashMap;
use std::sync::Mutex;

use super::FlowContext;
use crate::errors::{EngineError, Result};

/// Persists and rehydrates contexts. The transaction id is the id of the
/// lock held by the caller; implementations may use it for write fencing.
///
/// Transient vars are never part of what is saved.
pub trait ContextRepository: Send + Sync {
  fn save(&self, transaction_id: &str, ctx: &FlowContext) -> Result<()>;

  fn load(&self, transaction_id: &str, context_id: &str) -> Result<FlowContext>;
}

/// Map-backed repository for unit tests.
///
/// Stores the serialized form rather than the live value, so a load returns
/// a canonicalized copy with transients dropped, the same way a real store
/// would behave.
#[derive(Default)]
pub struct InMemoryContextRepository {
  contexts: Mutex<HashMap<String, serde_json::Value>>,
}

impl InMemoryContextRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Ids of every stored context. Test support.
  pub fn context_ids(&self) -> Vec<String> {
    self
      .contexts
      .lock()
      .map(|contexts| contexts.keys().cloned().collect())
      .unwrap_or_default()
  }
}

impl ContextRepository for InMemoryContextRepository {
  fn save(&self, _transaction_id: &str, ctx: &FlowContext) -> Result<()> {
    let record = serde_json::to_value(ctx)
      .map_err(|e| EngineError::Repository(format!("failed to serialize context {}: {e}", ctx.id)))?;
    let mut contexts = self
      .contexts
      .lock()
      .map_err(|_| EngineError::Repository("context store poisoned".to_string()))?;
    contexts.insert(ctx.id.clone(), record);
    Ok(())
  }

  fn load(&self, _transaction_id: &str, context_id: &str) -> Result<FlowContext> {
    let contexts = self
      .contexts
      .lock()
      .map_err(|_| EngineError::Repository("context store poisoned".to_string()))?;
    let record = contexts
      .get(context_id)
      .ok_or_else(|| EngineError::Repository(format!("Context {context_id} not found")))?;
    serde_json::from_value(record.clone())
      .map_err(|e| EngineError::Repository(format!("failed to deserialize context {context_id}: {e}")))
  }
}
