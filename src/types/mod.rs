//! Core value types exchanged between the executor, contexts, and DSLs.

mod action;
mod attr_model;
mod dsl_metadata;
mod events;

pub use action::Action;
pub use attr_model::{AttrModel, AttrValue};
pub use dsl_metadata::DslMetadata;
pub use events::{FlowOutputEvent, InputEvent, OutputEvent, OutputValue};
