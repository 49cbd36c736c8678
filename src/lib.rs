//! # cdsl
//!
//! Declarative flow execution engine. Operators describe business processes
//! as XML documents: each flow is a graph of named steps, and each step is an
//! ordered list of DSL elements drawn from an extensible vocabulary. The
//! executor drives a durable context through that graph, pausing on `await`,
//! routing between steps, and serializing every execution per context behind
//! a lock.
//!
//! ## Architecture
//!
//! - [`definition`] parses flow documents; [`registry`] validates and holds
//!   the resulting [`model`] flows plus the DSL factory map.
//! - [`executor`] drives a [`context`] through a flow, dispatching [`dsl`]
//!   elements and persisting through the collaborator traits in [`context`]
//!   and [`lock`].
//!
//! Durable storage, distributed locking, and audit sinks are contracts here;
//! the in-memory implementations back tests and single-process use.

pub mod context;
pub mod definition;
pub mod dsl;
pub mod errors;
pub mod executor;
pub mod lock;
pub mod model;
pub mod registry;
pub mod types;

pub use context::{
  ContextAuditor, ContextRepository, ContextState, FlowContext, InMemoryContextRepository,
  NullAuditor, Runtime,
};
pub use definition::{parse_document, XmlDefinitionSource};
pub use dsl::{register_builtin_dsls, Dsl};
pub use errors::{EngineError, Result};
pub use executor::FlowExecutor;
pub use lock::{InMemoryLockProvider, Lock, LockProvider};
pub use model::{Flow, FlowStep};
pub use registry::{DslRegistry, FlowRegistry, RegistryLoader};
pub use types::{Action, AttrModel, DslMetadata, FlowOutputEvent, InputEvent, OutputEvent, OutputValue};
