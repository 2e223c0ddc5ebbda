#![cfg(target_arch = "wasm32")]
use vip25_reveal_core::RevealSettings;
use vip25_site_wasm::{abi_version, init_site, set_log_level};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn append(parent: &Element, id: &str, attrs: &[(&str, &str)]) -> Element {
    let el = document().create_element("div").unwrap();
    el.set_id(id);
    for (k, v) in attrs {
        el.set_attribute(k, v).unwrap();
    }
    parent.append_child(&el).unwrap();
    el
}

fn style(el: &Element, prop: &str) -> String {
    el.dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value(prop)
        .unwrap()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn init_hides_and_materializes_group() {
    let body: Element = document().body().unwrap().into();
    let legacy = append(&body, "w-legacy", &[("class", "reveal-left")]);
    let group = append(
        &body,
        "w-group",
        &[("data-animate-children", "zoom-in"), ("data-stagger", "120")],
    );
    let first = append(&group, "w-child-0", &[]);
    let second = append(&group, "w-child-1", &[]);
    let explicit = append(&group, "w-child-2", &[("data-delay", "500")]);

    let handle = init_site(JsValue::UNDEFINED).unwrap();
    assert!(handle.registered_count() >= 4);

    assert_eq!(legacy.get_attribute("data-animate").as_deref(), Some("fade-left"));
    assert_eq!(style(&legacy, "opacity"), "0");

    assert_eq!(first.get_attribute("data-animate").as_deref(), Some("zoom-in"));
    assert_eq!(first.get_attribute("data-delay").as_deref(), Some("0"));
    assert_eq!(second.get_attribute("data-delay").as_deref(), Some("120"));
    assert_eq!(explicit.get_attribute("data-delay").as_deref(), Some("500"));
    assert_eq!(style(&second, "transform"), "scale(0.94)");

    handle.teardown();
    assert_eq!(handle.pending_count(), 0);
}

#[wasm_bindgen_test]
fn partial_settings_are_accepted() {
    let settings = js_sys::JSON::parse(r#"{ "base_duration_ms": 400 }"#).unwrap();
    let handle = init_site(settings).unwrap();
    let echoed: RevealSettings =
        serde_wasm_bindgen::from_value(handle.settings().unwrap()).unwrap();
    assert_eq!(echoed.base_duration_ms, 400);
    assert_eq!(echoed.default_stagger_ms, 90);
    handle.teardown();
}

#[wasm_bindgen_test]
fn bad_root_margin_is_rejected() {
    let settings =
        js_sys::JSON::parse(r#"{ "observer": { "root_margin": "12em" } }"#).unwrap();
    assert!(init_site(settings).is_err());
}

#[wasm_bindgen_test]
fn log_level_parsing() {
    assert!(set_log_level("debug").is_ok());
    assert!(set_log_level("loud").is_err());
}
