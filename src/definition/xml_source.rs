//! Minimal XML reader for the `<cdsl>` flow-document dialect.
//!
//! Covers exactly what flow documents use: elements, string attributes,
//! nested elements, text content, comments, and the standard five entities.
//! Anything outside that subset is a validation error.

use std::path::PathBuf;

use tracing::debug;

use super::{DocumentDefinition, ElementDefinition, FlowDefinition, StepDefinition};
use crate::errors::{EngineError, Result};

/// Loads flow documents from XML files under a base directory.
pub struct XmlDefinitionSource {
  base_path: PathBuf,
}

impl XmlDefinitionSource {
  pub fn new(base_path: impl Into<PathBuf>) -> Self {
    Self {
      base_path: base_path.into(),
    }
  }

  /// Reads and parses the document at `path`, relative to the base path.
  pub fn load_document(&self, path: &str) -> Result<DocumentDefinition> {
    let full_path = self.base_path.join(path);
    let source = std::fs::read_to_string(&full_path).map_err(|e| {
      EngineError::Validation(format!("Failed to read {}: {e}", full_path.display()))
    })?;
    parse_document(&source)
  }
}

/// Parses a flow document from XML source text.
pub fn parse_document(source: &str) -> Result<DocumentDefinition> {
  let root = parse_root(source)?;
  if root.name != "cdsl" {
    return Err(EngineError::Validation(format!(
      "Flow document root must be <cdsl>, found <{}>",
      root.name
    )));
  }

  let mut flows = Vec::new();
  for child in &root.children {
    if child.name != "flow" {
      return Err(EngineError::Validation(format!(
        "Unexpected element <{}> under <cdsl>",
        child.name
      )));
    }
    flows.push(map_flow(child)?);
  }
  debug!(flows = flows.len(), "parsed flow document");
  Ok(DocumentDefinition { flows })
}

/// Raw element tree produced by the scanner.
struct XmlElement {
  name: String,
  attributes: Vec<(String, String)>,
  children: Vec<XmlElement>,
  text: String,
}

impl XmlElement {
  fn attr(&self, name: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(k, _)| k == name)
      .map(|(_, v)| v.as_str())
  }
}

fn map_flow(elem: &XmlElement) -> Result<FlowDefinition> {
  let mut steps = Vec::new();
  for child in &elem.children {
    if child.name != "step" {
      return Err(EngineError::Validation(format!(
        "Unexpected element <{}> under <flow>",
        child.name
      )));
    }
    steps.push(map_step(child));
  }
  Ok(FlowDefinition {
    id: elem.attr("id").unwrap_or("").to_string(),
    default_step: elem.attr("defaultStep").unwrap_or("").to_string(),
    error_step: elem.attr("errorStep").filter(|s| !s.is_empty()).map(String::from),
    steps,
  })
}

fn map_step(elem: &XmlElement) -> StepDefinition {
  let mut step = StepDefinition {
    id: elem.attr("id").unwrap_or("").to_string(),
    ..StepDefinition::default()
  };
  for child in &elem.children {
    if child.name == "finally" {
      step.finally.extend(child.children.iter().map(map_element));
    } else {
      step.elements.push(map_element(child));
    }
  }
  step
}

fn map_element(elem: &XmlElement) -> ElementDefinition {
  ElementDefinition {
    name: elem.name.clone(),
    attributes: elem.attributes.iter().cloned().collect(),
    children: elem.children.iter().map(map_element).collect(),
    content: elem.text.trim().to_string(),
  }
}

fn parse_root(source: &str) -> Result<XmlElement> {
  let source = strip_comments(source);
  let mut pos = skip_whitespace(&source, 0);
  pos = skip_prolog(&source, pos)?;
  pos = skip_whitespace(&source, pos);
  let (root, end) = parse_element(&source, pos)?;
  if !source[end..].trim().is_empty() {
    return Err(EngineError::Validation(
      "Trailing content after document root".to_string(),
    ));
  }
  Ok(root)
}

/// Strips `<!-- -->` comments.
fn strip_comments(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  let mut rest = s;
  while let Some(start) = rest.find("<!--") {
    out.push_str(&rest[..start]);
    match rest[start..].find("-->") {
      Some(end) => rest = &rest[start + end + 3..],
      None => return out,
    }
  }
  out.push_str(rest);
  out
}

/// Skips `<?xml ...?>` declarations and `<!DOCTYPE ...>` if present.
fn skip_prolog(s: &str, mut pos: usize) -> Result<usize> {
  loop {
    pos = skip_whitespace(s, pos);
    if s[pos..].starts_with("<?") {
      let end = s[pos..]
        .find("?>")
        .ok_or_else(|| EngineError::Validation("Unterminated processing instruction".to_string()))?;
      pos += end + 2;
    } else if s[pos..].starts_with("<!") {
      let end = s[pos..]
        .find('>')
        .ok_or_else(|| EngineError::Validation("Unterminated document type declaration".to_string()))?;
      pos += end + 1;
    } else {
      return Ok(pos);
    }
  }
}

fn skip_whitespace(s: &str, mut pos: usize) -> usize {
  let bytes = s.as_bytes();
  while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
    pos += 1;
  }
  pos
}

fn is_name_byte(b: u8) -> bool {
  b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.' || b == b':'
}

/// Parses a name (tag or attribute) and returns it plus the position after it.
fn parse_name(s: &str, pos: usize) -> Result<(&str, usize)> {
  let bytes = s.as_bytes();
  let mut end = pos;
  while end < bytes.len() && is_name_byte(bytes[end]) {
    end += 1;
  }
  if end == pos {
    return Err(EngineError::Validation(format!(
      "Expected a name at offset {pos}"
    )));
  }
  Ok((&s[pos..end], end))
}

/// Replaces the five predefined entities with their characters.
fn unescape_entities(s: &str) -> String {
  if !s.contains('&') {
    return s.to_string();
  }
  s.replace("&lt;", "<")
    .replace("&gt;", ">")
    .replace("&quot;", "\"")
    .replace("&apos;", "'")
    .replace("&amp;", "&")
}

/// Parses one element starting at `pos` (which must point at `<`). Returns
/// the element and the position just past its closing tag.
fn parse_element(s: &str, pos: usize) -> Result<(XmlElement, usize)> {
  let bytes = s.as_bytes();
  if pos >= bytes.len() || bytes[pos] != b'<' {
    return Err(EngineError::Validation(format!(
      "Expected '<' at offset {pos}"
    )));
  }
  let (name, mut pos) = parse_name(s, pos + 1)?;
  let mut elem = XmlElement {
    name: name.to_string(),
    attributes: Vec::new(),
    children: Vec::new(),
    text: String::new(),
  };

  // Attribute list until '>' or '/>'.
  loop {
    pos = skip_whitespace(s, pos);
    if s[pos..].starts_with("/>") {
      return Ok((elem, pos + 2));
    }
    if s[pos..].starts_with('>') {
      pos += 1;
      break;
    }
    let (attr_name, next) = parse_name(s, pos)?;
    pos = skip_whitespace(s, next);
    if !s[pos..].starts_with('=') {
      return Err(EngineError::Validation(format!(
        "Attribute {attr_name} of <{name}> is missing '='"
      )));
    }
    pos = skip_whitespace(s, pos + 1);
    let quote = *s[pos..].as_bytes().first().ok_or_else(|| {
      EngineError::Validation(format!("Unterminated attribute in <{name}>"))
    })?;
    if quote != b'"' && quote != b'\'' {
      return Err(EngineError::Validation(format!(
        "Attribute {attr_name} of <{name}> must be quoted"
      )));
    }
    pos += 1;
    let end = s[pos..].find(quote as char).ok_or_else(|| {
      EngineError::Validation(format!("Unterminated attribute value in <{name}>"))
    })?;
    let value = unescape_entities(&s[pos..pos + end]);
    elem.attributes.push((attr_name.to_string(), value));
    pos += end + 1;
  }

  // Children and text until the matching close tag.
  loop {
    if pos >= bytes.len() {
      return Err(EngineError::Validation(format!("Unclosed element <{name}>")));
    }
    if s[pos..].starts_with("</") {
      let (close_name, next) = parse_name(s, pos + 2)?;
      let next = skip_whitespace(s, next);
      if !s[next..].starts_with('>') {
        return Err(EngineError::Validation(format!(
          "Malformed closing tag for <{close_name}>"
        )));
      }
      if close_name != elem.name {
        return Err(EngineError::Validation(format!(
          "Mismatched closing tag: expected </{}>, found </{close_name}>",
          elem.name
        )));
      }
      return Ok((elem, next + 1));
    }
    if bytes[pos] == b'<' {
      let (child, next) = parse_element(s, pos)?;
      elem.children.push(child);
      pos = next;
    } else {
      let end = s[pos..].find('<').unwrap_or(s.len() - pos);
      elem.text.push_str(&unescape_entities(&s[pos..pos + end]));
      pos += end;
    }
  }
}
