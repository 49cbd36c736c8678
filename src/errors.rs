//! Engine error taxonomy.

use thiserror::Error;

/// Errors raised by the engine and its collaborators.
///
/// Variants map to where a failure originates rather than to a specific
/// collaborator implementation: a custom repository and the in-memory test
/// support both surface `Repository`, and so on.
#[derive(Error, Debug)]
pub enum EngineError {
  /// A flow document failed a load-time check (malformed XML, missing step,
  /// unresolvable element). Aborts registry insertion.
  #[error("{0}")]
  Validation(String),

  /// A name could not be resolved at execution time (unknown DSL, missing
  /// route target, unknown requested step).
  #[error("{0}")]
  Resolution(String),

  /// A lock could not be obtained or released.
  #[error("{0}")]
  Lock(String),

  /// An execution was attempted against a context in a terminal state.
  #[error("{0}")]
  State(String),

  /// A DSL element reported failure.
  #[error("{0}")]
  Dsl(String),

  /// The context repository failed to save or load.
  #[error("{0}")]
  Repository(String),

  /// A deferred post-step or post-commit task failed or panicked. Never
  /// surfaced to callers; audited and swallowed.
  #[error("{0}")]
  Task(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
