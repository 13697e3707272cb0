#![cfg(target_arch = "wasm32")]
use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use laba_wasm::{abi_version, describe_notation, LabaStage};

wasm_bindgen_test_configure!(run_in_browser);

fn to_js(value: serde_json::Value) -> JsValue {
    value.serialize(&swb::Serializer::json_compatible()).unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults() {
    assert!(LabaStage::new(JsValue::UNDEFINED).is_ok());
    assert!(LabaStage::new(JsValue::NULL).is_ok());
}

#[wasm_bindgen_test]
fn invalid_config_errors() {
    assert!(LabaStage::new(to_js(json!({ "time_scale": 0.0 }))).is_err());
    assert!(LabaStage::new(JsValue::from_str("nope")).is_err());
}

#[wasm_bindgen_test]
fn animate_and_update_report_changes() {
    let mut stage = LabaStage::new(JsValue::NULL).unwrap();
    let t = stage
        .add_target(to_js(json!({ "width": 40.0, "height": 10.0 })))
        .unwrap();
    let done = js_sys::Function::new_no_args("globalThis.__labaDone = true;");
    let id = stage.animate(t, "e0<d1".into(), 0.0, Some(done)).unwrap();
    assert!(stage.is_running(id));

    let out = stage.update_json(500.0).unwrap();
    let out: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(out["changes"][0]["channel"], "translationX");
    assert_eq!(out["changes"][0]["value"], -20.0);

    let obj = js_sys::Object::from(stage.update(1000.0).unwrap());
    let changes = js_sys::Reflect::get(&obj, &JsValue::from_str("changes")).unwrap();
    assert!(changes.is_object() || changes.is_array());
    assert!(!stage.is_running(id));
    let flag = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("__labaDone")).unwrap();
    assert_eq!(flag.as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn unknown_target_errors() {
    let mut stage = LabaStage::new(JsValue::NULL).unwrap();
    assert!(stage.animate(7, ">".into(), 0.0, None).is_err());
    assert!(stage.target_state(7).is_err());
    assert!(stage.reset_target(7).is_err());
}

#[wasm_bindgen_test]
fn play_accepts_routine_objects() {
    let mut stage = LabaStage::new(JsValue::NULL).unwrap();
    let t = stage.add_target(JsValue::UNDEFINED).unwrap();
    let id = stage
        .play(
            t,
            to_js(json!({ "intro": "f0d0", "notation": "x5d1", "repeat": true })),
            0.0,
        )
        .unwrap();
    stage.update(0.0).unwrap();
    assert!(stage.is_running(id));
    assert!(stage.stop(id));
    assert!(stage.play(t, JsValue::from_f64(1.0), 0.0).is_err());
}

#[wasm_bindgen_test]
fn describe_free_function() {
    let text = describe_notation("<".into(), 25.0, 0.0, 0).unwrap();
    assert_eq!(text, "Move left 25 units, ease in/out quad over 0.87 seconds.");
    let mut stage = LabaStage::new(JsValue::NULL).unwrap();
    let t = stage.add_target(JsValue::UNDEFINED).unwrap();
    assert_eq!(stage.describe(t, "".into()).unwrap(), "do nothing");
}
