//! The DSL element contract and the built-in vocabulary.

use crate::context::{FlowContext, Runtime};
use crate::errors::Result;
use crate::registry::DslRegistry;
use crate::types::{AttrModel, InputEvent, OutputEvent};

mod aml_check;
mod await_step;
mod collect_customer_info;
mod document_verification;
mod end_route;
mod fail;
mod final_decision;
mod risk_assessment;
#[cfg(test)]
mod risk_assessment_test;
mod route_to;
mod sanctions_check;
mod say_hello;
#[cfg(test)]
mod say_hello_test;
mod set_state;
mod set_var;
#[cfg(test)]
mod set_var_test;
mod validate_customer_info;

pub use aml_check::AmlCheck;
pub use await_step::Await;
pub use collect_customer_info::CollectCustomerInfo;
pub use document_verification::DocumentVerification;
pub use end_route::EndRoute;
pub use fail::Fail;
pub use final_decision::FinalDecision;
pub use risk_assessment::RiskAssessment;
pub use route_to::RouteTo;
pub use sanctions_check::SanctionsCheck;
pub use say_hello::SayHello;
pub use set_state::SetState;
pub use set_var::SetVar;
pub use validate_customer_info::ValidateCustomerInfo;

/// One verb in the flow vocabulary.
///
/// Instances are constructed fresh per dispatch and receive their own copy of
/// the attribute model, so both may be mutated freely. A DSL touches durable
/// state only through the context and publishes results only through the
/// runtime.
///
/// Returning `Ok(None)` means "done, continue with the next element";
/// returning an output stops the element list and hands the action to the
/// executor; returning an error lets the executor decide recovery.
pub trait Dsl: Send {
  fn execute(
    &mut self,
    runtime: &mut Runtime,
    ctx: &mut FlowContext,
    model: AttrModel,
    input: &InputEvent,
  ) -> Result<Option<OutputEvent>>;

  /// Static check run at registry-load time against the element's model as
  /// written in the flow document. The default accepts everything.
  fn validate(&self, _model: &AttrModel) -> Result<()> {
    Ok(())
  }
}

/// Registers the full built-in vocabulary on `registry`.
pub fn register_builtin_dsls(registry: &DslRegistry) {
  registry.register("setState", || Box::new(SetState));
  registry.register("setVar", || Box::new(SetVar));
  registry.register("routeTo", || Box::new(RouteTo));
  registry.register("await", || Box::new(Await));
  registry.register("endRoute", || Box::new(EndRoute));
  registry.register("sayHello", || Box::new(SayHello));
  registry.register("collectCustomerInfo", || Box::new(CollectCustomerInfo));
  registry.register("validateCustomerInfo", || Box::new(ValidateCustomerInfo));
  registry.register("riskAssessment", || Box::new(RiskAssessment));
  registry.register("documentVerification", || Box::new(DocumentVerification));
  registry.register("sanctionsCheck", || Box::new(SanctionsCheck));
  registry.register("amlCheck", || Box::new(AmlCheck));
  registry.register("finalDecision", || Box::new(FinalDecision));
}
