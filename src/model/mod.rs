//! In-memory flow representation walked by the executor.

mod flow;
#[cfg(test)]
mod flow_test;

pub use flow::{Flow, FlowStep};
