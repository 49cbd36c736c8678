//! Declarative flow documents and their XML source.

mod document;
mod xml_source;

pub use document::{DocumentDefinition, ElementDefinition, FlowDefinition, StepDefinition};
pub use xml_source::{parse_document, XmlDefinitionSource};
