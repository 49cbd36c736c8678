//! The flow executor: locking, stepping, dispatch, error routing, commit.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::context::{ContextAuditor, ContextRepository, ContextState, FlowContext, Runtime};
use crate::errors::{EngineError, Result};
use crate::lock::{Lock, LockProvider};
use crate::model::{Flow, FlowStep};
use crate::registry::DslRegistry;
use crate::types::{Action, DslMetadata, FlowOutputEvent, InputEvent, OutputEvent, OutputValue};

/// Drives a context through a flow, one step at a time.
///
/// Executions against the same context are serialized by a lock on
/// `context/<contextId>`, held from before the first repository access until
/// after the context is persisted. Post-commit tasks run outside the lock.
pub struct FlowExecutor {
  lock_provider: Arc<dyn LockProvider>,
  repository: Arc<dyn ContextRepository>,
  auditor: Arc<dyn ContextAuditor>,
  dsls: Arc<DslRegistry>,
  pub lock_retries: u32,
  pub lock_duration: Duration,
  pub lock_retry_max_duration: Duration,
  /// Lock-owner string identifying this executor.
  pub identifier: String,
}

impl FlowExecutor {
  pub fn new(
    lock_provider: Arc<dyn LockProvider>,
    repository: Arc<dyn ContextRepository>,
    auditor: Arc<dyn ContextAuditor>,
    dsls: Arc<DslRegistry>,
  ) -> Self {
    Self {
      lock_provider,
      repository,
      auditor,
      dsls,
      lock_retries: 3,
      lock_duration: Duration::from_secs(30),
      lock_retry_max_duration: Duration::from_secs(1),
      identifier: "anonymous".to_string(),
    }
  }

  /// Runs `flow` against the context named by `input` (or a fresh one).
  ///
  /// On return the lock has been released, whether the run succeeded or not.
  /// The context may have been persisted even when an error comes back, so
  /// callers treat the stored context as authoritative.
  #[instrument(level = "trace", skip(self, flow, input), fields(flow = %flow.id))]
  pub fn execute(&self, flow: &Flow, input: &InputEvent) -> Result<FlowOutputEvent> {
    let mut held: Option<Lock> = None;
    let result = self.execute_under_lock(flow, input, &mut held);
    if let Some(lock) = held.take() {
      if let Err(error) = self.lock_provider.release(&lock) {
        warn!(resource = %lock.resource, %error, "failed to release lock");
      }
    }
    result
  }

  fn obtain_lock(&self, context_id: &str) -> Result<Lock> {
    self.lock_provider.obtain(
      &self.identifier,
      &format!("context/{context_id}"),
      self.lock_duration,
      self.lock_retries,
      self.lock_retry_max_duration,
    )
  }

  fn execute_under_lock(
    &self,
    flow: &Flow,
    input: &InputEvent,
    held: &mut Option<Lock>,
  ) -> Result<FlowOutputEvent> {
    // Create or load the context, under its lock.
    let mut ctx = match input.context_id.as_deref().filter(|id| !id.is_empty()) {
      None => {
        let ctx = FlowContext::new(Uuid::new_v4().to_string());
        let lock = self.obtain_lock(&ctx.id)?;
        let transaction_id = lock.id.clone();
        *held = Some(lock);
        self.repository.save(&transaction_id, &ctx)?;
        // Reload so the executor works on whatever canonical form the
        // repository hands back.
        let ctx = self.repository.load(&transaction_id, &ctx.id)?;
        info!(context = %ctx.id, "created context");
        ctx
      }
      Some(context_id) => {
        let lock = self.obtain_lock(context_id)?;
        let transaction_id = lock.id.clone();
        *held = Some(lock);
        let ctx = self.repository.load(&transaction_id, context_id)?;
        if ctx.state() == ContextState::End {
          return Err(EngineError::State(format!("State of {} is End", ctx.id)));
        }
        ctx
      }
    };

    // Pick the entry step: the context's resume point, the flow default, or
    // an explicit caller request.
    if ctx.current_step.is_empty() {
      ctx.current_step = flow.default_step.clone();
    }
    if let Some(requested) = input.requested_step.as_deref().filter(|s| !s.is_empty()) {
      if flow.fetch_step(requested).is_none() {
        return Err(EngineError::Resolution(format!(
          "Requested step {requested} was not found"
        )));
      }
      ctx.current_step = requested.to_string();
    }
    ctx.current_flow = flow.id.clone();

    let transaction_id = held
      .as_ref()
      .map(|lock| lock.id.clone())
      .unwrap_or_default();
    let mut runtime = Runtime::new(Arc::clone(&self.auditor), transaction_id);

    let mut next_step = flow.fetch_step(&ctx.current_step);
    let mut applied_result: Option<OutputEvent> = None;

    while let Some(step) = next_step {
      next_step = None;
      ctx.current_step = step.id.clone();
      ctx.push_transition(format!("{}/{}", flow.id, step.id));
      runtime.auditor().transition(&ctx, &flow.id, &step.id);
      info!(flow = %flow.id, step = %step.id, "entering step");

      let general_output = match self.run_elements(
        &mut runtime,
        &mut ctx,
        input,
        flow,
        step,
        &step.logic_elements,
      ) {
        Ok(output) => output,
        Err(error) => {
          next_step = Some(self.divert_to_error_step(&runtime, &ctx, flow, step, error)?);
          continue;
        }
      };

      let final_output = match self.run_elements(
        &mut runtime,
        &mut ctx,
        input,
        flow,
        step,
        &step.final_elements,
      ) {
        Ok(output) => output,
        Err(error) => {
          next_step = Some(self.divert_to_error_step(&runtime, &ctx, flow, step, error)?);
          continue;
        }
      };

      // Final elements override the logic elements' routing intent.
      let result = final_output.or(general_output);

      self.drain_post_step_tasks(&mut runtime, &ctx, &flow.id, &step.id);

      match result {
        Some(output) => {
          match output.action {
            Action::Route => {
              ctx.current_step = output.next_route.clone();
              next_step = flow.fetch_step(&output.next_route);
              if next_step.is_none() {
                return Err(EngineError::Resolution(format!(
                  "Invalid Route {}",
                  output.next_route
                )));
              }
              debug!(flow = %flow.id, step = %step.id, target = %output.next_route, "routing");
            }
            Action::Await => {
              ctx.set_state(ContextState::Await)?;
              ctx.current_step = output.next_route.clone();
              info!(flow = %flow.id, step = %step.id, resume_at = %output.next_route, "awaiting");
            }
            Action::End => {
              ctx.set_state(ContextState::End)?;
              info!(flow = %flow.id, step = %step.id, "ended");
            }
            Action::Reject => {
              info!(flow = %flow.id, step = %step.id, "rejected");
            }
          }
          applied_result = Some(output);
        }
        None => {
          debug!(flow = %flow.id, step = %step.id, "step produced no output");
        }
      }
    }

    // Commit, release, and only then run the post-commit tasks.
    self.repository.save(runtime.transaction_id(), &ctx)?;
    if let Some(lock) = held.take() {
      self.lock_provider.release(&lock)?;
    }
    self.drain_post_commit_tasks(&mut runtime, &ctx, &flow.id);

    let mut output_values = runtime.take_output_values();
    for (key, value) in ctx.vars() {
      output_values.insert(key.clone(), OutputValue::text(value.clone()));
    }

    Ok(FlowOutputEvent {
      context_id: ctx.id.clone(),
      context_state: ctx.state().to_string(),
      action: applied_result.as_ref().map(|r| r.action),
      next_route: applied_result.map(|r| r.next_route).unwrap_or_default(),
      output_values,
    })
  }

  /// Runs one element list in order, returning the first output produced.
  fn run_elements(
    &self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    input: &InputEvent,
    flow: &Flow,
    step: &FlowStep,
    elements: &[DslMetadata],
  ) -> Result<Option<OutputEvent>> {
    for metadata in elements {
      runtime.auditor().execute(ctx, &flow.id, &step.id, &metadata.name);
      debug!(flow = %flow.id, step = %step.id, element = %metadata.name, "dispatching element");

      let mut instance = self.dsls.resolve(metadata).ok_or_else(|| {
        EngineError::Resolution(format!("Failed to resolve DSL {}", metadata.name))
      })?;

      // Hand the element its own copy so the registered definition stays
      // untouched no matter what the DSL does with the bag.
      let model = metadata.model.clone();

      match instance.execute(runtime, ctx, model, input) {
        Ok(None) => {}
        Ok(Some(output)) => {
          debug!(
            flow = %flow.id,
            step = %step.id,
            element = %metadata.name,
            action = %output.action,
            "element produced output"
          );
          return Ok(Some(output));
        }
        Err(error) => return Err(error),
      }
    }
    Ok(None)
  }

  /// Resolves the error-step diversion for a failed step, or surfaces the
  /// error when the flow has no error step or the error step itself failed.
  fn divert_to_error_step<'f>(
    &self,
    runtime: &Runtime,
    ctx: &FlowContext,
    flow: &'f Flow,
    failed_step: &FlowStep,
    error: EngineError,
  ) -> Result<&'f FlowStep> {
    let error_step = match flow.error_step.as_deref() {
      Some(id) if failed_step.id != id => id,
      _ => return Err(error),
    };
    let Some(diversion) = flow.fetch_step(error_step) else {
      return Err(error);
    };
    runtime
      .auditor()
      .error(ctx, &flow.id, &failed_step.id, "", &error);
    warn!(flow = %flow.id, step = %failed_step.id, %error, "step failed, diverting to error step");
    Ok(diversion)
  }

  fn drain_post_step_tasks(
    &self,
    runtime: &mut Runtime,
    ctx: &FlowContext,
    flow_id: &str,
    step_id: &str,
  ) {
    for task in runtime.take_post_step_tasks() {
      self.auditor.execute_post_step(ctx, flow_id, step_id);
      match std::panic::catch_unwind(AssertUnwindSafe(move || task())) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
          self.auditor.error(ctx, flow_id, step_id, "", &error);
          warn!(flow = %flow_id, step = %step_id, %error, "post-step task failed");
        }
        Err(panic) => {
          let error = EngineError::Task(panic_message(panic));
          self.auditor.error(ctx, flow_id, step_id, "", &error);
          warn!(flow = %flow_id, step = %step_id, %error, "post-step task panicked");
        }
      }
    }
  }

  fn drain_post_commit_tasks(&self, runtime: &mut Runtime, ctx: &FlowContext, flow_id: &str) {
    for task in runtime.take_post_commit_tasks() {
      self.auditor.execute_post_commit(ctx, flow_id);
      match std::panic::catch_unwind(AssertUnwindSafe(move || task())) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => {
          self.auditor.error(ctx, flow_id, "", "", &error);
          warn!(flow = %flow_id, %error, "post-commit task failed");
        }
        Err(panic) => {
          let error = EngineError::Task(panic_message(panic));
          self.auditor.error(ctx, flow_id, "", "", &error);
          warn!(flow = %flow_id, %error, "post-commit task panicked");
        }
      }
    }
  }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
  if let Some(s) = panic.downcast_ref::<&str>() {
    (*s).to_string()
  } else if let Some(s) = panic.downcast_ref::<String>() {
    s.clone()
  } else {
    "unidentified panic".to_string()
  }
}
