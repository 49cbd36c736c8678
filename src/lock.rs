//! Resource locking contract serializing executions per context.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::errors::{EngineError, Result};

/// A held lock on a named resource. The id doubles as the transaction id for
/// repository writes performed while the lock is held.
#[derive(Debug, Clone)]
pub struct Lock {
  pub id: String,
  pub resource: String,
  pub owner: String,
  pub expires_at: Instant,
}

impl Lock {
  pub fn new(
    id: impl Into<String>,
    resource: impl Into<String>,
    owner: impl Into<String>,
    duration: Duration,
  ) -> Self {
    Self {
      id: id.into(),
      resource: resource.into(),
      owner: owner.into(),
      expires_at: Instant::now() + duration,
    }
  }

  pub fn is_expired(&self) -> bool {
    Instant::now() > self.expires_at
  }
}

/// Grants and releases locks. Obtaining a resource with a live holder must
/// fail with a lock-rejected error; releasing an already released lock must
/// be tolerated.
pub trait LockProvider: Send + Sync {
  fn obtain(
    &self,
    owner: &str,
    resource: &str,
    duration: Duration,
    retries: u32,
    retry_max_duration: Duration,
  ) -> Result<Lock>;

  fn release(&self, lock: &Lock) -> Result<()>;
}

/// Process-local lock provider for unit tests and single-node use.
#[derive(Default)]
pub struct InMemoryLockProvider {
  locks: Mutex<HashMap<String, Lock>>,
}

impl InMemoryLockProvider {
  pub fn new() -> Self {
    Self::default()
  }

  fn try_take(&self, owner: &str, resource: &str, duration: Duration) -> Result<Option<Lock>> {
    let mut locks = self
      .locks
      .lock()
      .map_err(|_| EngineError::Lock("lock table poisoned".to_string()))?;
    if let Some(held) = locks.get(resource) {
      if !held.is_expired() {
        return Ok(None);
      }
    }
    let lock = Lock::new(Uuid::new_v4().to_string(), resource, owner, duration);
    locks.insert(resource.to_string(), lock.clone());
    Ok(Some(lock))
  }
}

impl LockProvider for InMemoryLockProvider {
  fn obtain(
    &self,
    owner: &str,
    resource: &str,
    duration: Duration,
    retries: u32,
    retry_max_duration: Duration,
  ) -> Result<Lock> {
    let mut attempt = 0;
    loop {
      if let Some(lock) = self.try_take(owner, resource, duration)? {
        return Ok(lock);
      }
      if attempt >= retries {
        return Err(EngineError::Lock(format!(
          "Lock rejected for resource {resource} by owner {owner}: resource is already locked"
        )));
      }
      attempt += 1;
      std::thread::sleep(retry_max_duration);
    }
  }

  fn release(&self, lock: &Lock) -> Result<()> {
    let mut locks = self
      .locks
      .lock()
      .map_err(|_| EngineError::Lock("lock table poisoned".to_string()))?;
    // Removing a lock that is absent or re-granted to another holder is a
    // no-op, so double release stays harmless.
    if locks.get(&lock.resource).is_some_and(|held| held.id == lock.id) {
      locks.remove(&lock.resource);
    }
    Ok(())
  }
}
