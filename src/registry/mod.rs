//! Name lookups: flows by id, DSL factories by element name.

mod dsl_registry;
mod flow_registry;
#[cfg(test)]
mod flow_registry_test;
mod loader;
#[cfg(test)]
mod loader_test;
mod validator;

pub use dsl_registry::DslRegistry;
pub use flow_registry::FlowRegistry;
pub use loader::RegistryLoader;
pub use validator::FlowValidator;
