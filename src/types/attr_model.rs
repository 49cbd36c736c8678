//! Attribute bag handed to a DSL element on each dispatch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One attribute value: a plain string, or a nested bag for child elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
  Text(String),
  Map(HashMap<String, AttrValue>),
}

impl AttrValue {
  /// Returns the string form of this value, or None for nested bags.
  pub fn as_text(&self) -> Option<&str> {
    match self {
      AttrValue::Text(s) => Some(s),
      AttrValue::Map(_) => None,
    }
  }

  /// Returns the nested bag, or None for plain strings.
  pub fn as_map(&self) -> Option<&HashMap<String, AttrValue>> {
    match self {
      AttrValue::Text(_) => None,
      AttrValue::Map(m) => Some(m),
    }
  }
}

/// Unordered attribute-name to value mapping for one DSL element.
///
/// Each dispatch receives its own copy, so elements are free to mutate the
/// bag without affecting the registered flow definition. `Clone` performs the
/// structural deep copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttrModel {
  entries: HashMap<String, AttrValue>,
}

impl AttrModel {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(&self, key: &str) -> Option<&AttrValue> {
    self.entries.get(key)
  }

  /// Looks up a string attribute. Nested bags and absent keys yield None.
  pub fn text(&self, key: &str) -> Option<&str> {
    self.entries.get(key).and_then(AttrValue::as_text)
  }

  /// Looks up a string attribute, falling back to `default` when absent.
  pub fn text_or(&self, key: &str, default: &str) -> String {
    self.text(key).unwrap_or(default).to_string()
  }

  pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
    self.entries.insert(key.into(), value);
  }

  pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.entries.insert(key.into(), AttrValue::Text(value.into()));
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
    self.entries.iter()
  }
}
