//! Element-name to DSL-factory mapping.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::dsl::Dsl;
use crate::types::DslMetadata;

type DslFactory = Box<dyn Fn() -> Box<dyn Dsl> + Send + Sync>;

/// Maps element names to zero-argument constructors. Every resolve yields a
/// fresh instance, so DSL state is never shared across concurrent runs.
#[derive(Default)]
pub struct DslRegistry {
  factories: RwLock<HashMap<String, DslFactory>>,
}

impl DslRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registers a factory under `name`. Last write wins.
  pub fn register(
    &self,
    name: impl Into<String>,
    factory: impl Fn() -> Box<dyn Dsl> + Send + Sync + 'static,
  ) {
    let mut factories = self.factories.write().expect("dsl registry poisoned");
    factories.insert(name.into(), Box::new(factory));
  }

  /// Constructs a fresh instance for the element named by `metadata`.
  pub fn resolve(&self, metadata: &DslMetadata) -> Option<Box<dyn Dsl>> {
    let factories = self.factories.read().expect("dsl registry poisoned");
    factories.get(&metadata.name).map(|factory| factory())
  }

  pub fn contains(&self, name: &str) -> bool {
    let factories = self.factories.read().expect("dsl registry poisoned");
    factories.contains_key(name)
  }
}
