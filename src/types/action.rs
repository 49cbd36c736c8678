//! Control-flow verdict returned by a DSL element.

use serde::{Deserialize, Serialize};

/// What the executor should do with the step loop after an element produced
/// an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
  /// Continue at the step named by `next_route`.
  Route,
  /// Pause the context; a later execution resumes at `next_route`.
  Await,
  /// Terminate the context.
  End,
  /// Stop the loop without touching context state.
  Reject,
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Action::Route => "Route",
      Action::Await => "Await",
      Action::End => "End",
      Action::Reject => "Reject",
    };
    f.write_str(s)
  }
}
