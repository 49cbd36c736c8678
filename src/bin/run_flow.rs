//! CLI: Run a flow from an XML flow document.
//!
//! Loads the document, registers the built-in DSL vocabulary, executes the
//! named flow once with in-memory collaborators, and prints the result.
//!
//! Usage: `run_flow [OPTIONS] <path-to-document> <flow-id>`
//! Example: run_flow tests/flows/hello.xml shouldRunHelloWorldAndEndRoute
//!
//! Pass `--context-id` to resume a paused context within this process run.
//! Set RUST_LOG=cdsl=trace for TRACE-level events.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use cdsl::context::{InMemoryContextRepository, NullAuditor};
use cdsl::dsl::register_builtin_dsls;
use cdsl::lock::InMemoryLockProvider;
use cdsl::registry::{DslRegistry, FlowRegistry, RegistryLoader};
use cdsl::{parse_document, FlowExecutor, InputEvent};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run a flow from an XML flow document.
#[derive(Parser, Debug)]
#[command(name = "run_flow")]
struct Args {
  /// Path to the XML flow document
  #[arg(value_name = "path-to-document")]
  document: PathBuf,

  /// Id of the flow to execute
  #[arg(value_name = "flow-id")]
  flow: String,

  /// Resume an existing context instead of creating a fresh one
  #[arg(long, value_name = "ID")]
  context_id: Option<String>,

  /// Enter at this step instead of the context's resume point
  #[arg(long, value_name = "STEP")]
  step: Option<String>,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();
  info!(document = %args.document.display(), flow = %args.flow, "run_flow starting");

  let source = match std::fs::read_to_string(&args.document) {
    Ok(s) => s,
    Err(e) => {
      eprintln!("Error reading {}: {}", args.document.display(), e);
      process::exit(1);
    }
  };

  let doc = match parse_document(&source) {
    Ok(d) => d,
    Err(e) => {
      eprintln!("Error parsing document: {e}");
      process::exit(1);
    }
  };

  let flows = Arc::new(FlowRegistry::new());
  let dsls = Arc::new(DslRegistry::new());
  register_builtin_dsls(&dsls);

  if let Err(e) = RegistryLoader::new(flows.clone(), dsls.clone()).load_document(&doc) {
    eprintln!("Error loading document: {e}");
    process::exit(1);
  }

  let Some(flow) = flows.get(&args.flow) else {
    eprintln!("Flow {} is not defined in {}", args.flow, args.document.display());
    process::exit(1);
  };

  let executor = FlowExecutor::new(
    Arc::new(InMemoryLockProvider::new()),
    Arc::new(InMemoryContextRepository::new()),
    Arc::new(NullAuditor),
    dsls,
  );

  let mut input = InputEvent::new();
  if let Some(context_id) = args.context_id {
    input = input.with_context_id(context_id);
  }
  if let Some(step) = args.step {
    input = input.with_requested_step(step);
  }

  let output = match executor.execute(&flow, &input) {
    Ok(o) => o,
    Err(e) => {
      eprintln!("Flow error: {e}");
      process::exit(1);
    }
  };

  println!("Flow execution completed.");
  println!("  Context: {}", output.context_id);
  println!("  State: {}", output.context_state);
  if let Some(action) = output.action {
    if output.next_route.is_empty() {
      println!("  Action: {action}");
    } else {
      println!("  Action: {action} -> {}", output.next_route);
    }
  }
  let mut keys: Vec<_> = output.output_values.keys().collect();
  keys.sort();
  for key in keys {
    println!("  {key} = {:?}", output.output_values[key].value);
  }
}
