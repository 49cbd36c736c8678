//! Tests for `loader`.

use std::sync::Arc;

use crate::definition::parse_document;
use crate::dsl::register_builtin_dsls;
use crate::registry::{DslRegistry, FlowRegistry, RegistryLoader};
use crate::types::AttrValue;

fn registries() -> (Arc<FlowRegistry>, Arc<DslRegistry>) {
  let flows = Arc::new(FlowRegistry::new());
  let dsls = Arc::new(DslRegistry::new());
  register_builtin_dsls(&dsls);
  (flows, dsls)
}

#[test]
fn loads_flows_with_element_order_intact() {
  let (flows, dsls) = registries();
  let doc = parse_document(
    r#"<cdsl><flow id="f" defaultStep="init">
      <step id="init">
        <setState val="Alive"/>
        <sayHello name="Go"/>
        <routeTo target="end"/>
      </step>
      <step id="end">
        <endRoute/>
        <finally><setState val="End"/></finally>
      </step>
    </flow></cdsl>"#,
  )
  .unwrap();

  RegistryLoader::new(flows.clone(), dsls)
    .load_document(&doc)
    .unwrap();

  let flow = flows.get("f").unwrap();
  let init = flow.fetch_step("init").unwrap();
  let names: Vec<_> = init.logic_elements.iter().map(|e| e.name.as_str()).collect();
  assert_eq!(names, vec!["setState", "sayHello", "routeTo"]);
  assert_eq!(init.logic_elements[1].model.text("name"), Some("Go"));

  let end = flow.fetch_step("end").unwrap();
  assert_eq!(end.logic_elements.len(), 1);
  assert_eq!(end.final_elements.len(), 1);
  assert_eq!(end.final_elements[0].model.text("val"), Some("End"));
}

#[test]
fn nested_elements_land_in_the_model() {
  let (flows, dsls) = registries();
  let doc = parse_document(
    r#"<cdsl><flow id="f" defaultStep="s">
      <step id="s">
        <sayHello name="x">greeting text<tone kind="warm"/></sayHello>
        <endRoute/>
      </step>
    </flow></cdsl>"#,
  )
  .unwrap();
  RegistryLoader::new(flows.clone(), dsls)
    .load_document(&doc)
    .unwrap();

  let flow = flows.get("f").unwrap();
  let model = &flow.fetch_step("s").unwrap().logic_elements[0].model;
  assert_eq!(model.text("name"), Some("x"));
  assert_eq!(model.text("content"), Some("greeting text"));
  let tone = model.get("tone").and_then(AttrValue::as_map).unwrap();
  assert_eq!(tone.get("kind").and_then(AttrValue::as_text), Some("warm"));
}

#[test]
fn unresolvable_element_aborts_registration() {
  let (flows, dsls) = registries();
  let doc = parse_document(
    r#"<cdsl><flow id="f" defaultStep="s">
      <step id="s"><noSuchThing/></step>
    </flow></cdsl>"#,
  )
  .unwrap();

  let err = RegistryLoader::new(flows.clone(), dsls)
    .load_document(&doc)
    .unwrap_err();
  assert!(err.to_string().contains("noSuchThing"));
  assert!(flows.get("f").is_none());
}
