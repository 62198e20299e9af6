//! Browser tests for the JavaScript-facing API.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use graph_physics_wasm::GraphPhysicsWasm;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn kernel(config: &str) -> GraphPhysicsWasm {
    let config = js_sys::JSON::parse(config).unwrap();
    GraphPhysicsWasm::new(config).ok().unwrap()
}

#[wasm_bindgen_test]
fn default_config_from_undefined() {
    let mut kernel = GraphPhysicsWasm::new(JsValue::UNDEFINED).ok().unwrap();
    kernel.add_node(0.0, 0.0);
    kernel.add_node(500.0, 0.0);

    assert!(kernel.tick().is_ok());

    assert_eq!(kernel.get_forces().len(), 4);
    assert_eq!(kernel.get_damping().len(), 2);
}

#[wasm_bindgen_test]
fn js_config_drives_springs() {
    let mut kernel = kernel(r#"{ "centralGravity": 0, "springConstant": 0.1 }"#);
    let a = kernel.add_node(0.0, 0.0);
    let b = kernel.add_node(300.0, 0.0);
    kernel.add_edge(a, b, 295.0);

    assert!(kernel.tick().is_ok());

    let view = kernel.get_forces_view().to_vec();
    assert!((view[0] - 0.5).abs() < 1e-4);
    assert!((view[2] + 0.5).abs() < 1e-4);
}

#[wasm_bindgen_test]
fn pocket_nodes_feel_no_gravity() {
    let mut kernel = kernel(r#"{ "centralGravity": 1 }"#);
    kernel.add_node(500.0, 500.0);
    kernel.add_node(-500.0, -500.0);
    kernel.set_pocket_sector(true);

    assert!(kernel.tick().is_ok());

    assert!(kernel.get_forces().iter().all(|f| *f == 0.0));
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    let config = js_sys::JSON::parse(r#"{ "centralGravity": "strong" }"#).unwrap();
    assert!(GraphPhysicsWasm::new(config).is_err());
}

#[wasm_bindgen_test]
fn edges_wait_for_missing_nodes() {
    let mut kernel = GraphPhysicsWasm::new(JsValue::NULL).ok().unwrap();
    let a = kernel.add_node(0.0, 0.0);
    kernel.add_edge(a, 42, 10.0);
    assert!(kernel.get_neighbors(a).is_empty());

    assert!(kernel.add_node_with_id(42, 10.0, 0.0));
    assert_eq!(kernel.get_neighbors(a), vec![42]);
}
