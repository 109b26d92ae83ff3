// Browser tests for the bridge
// Run with: wasm-pack test --headless --chrome crates/wasm-bridge
#![cfg(target_arch = "wasm32")]

use page_fx_config::PageFxConfig;
use page_fx_wasm::instance_manager::InstanceManager;
use page_fx_wasm::PageFx;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn article() -> web_sys::Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_attribute("style", "position: absolute; top: 0; left: 0; width: 100%")
        .unwrap();
    root.set_inner_html(
        r##"<nav class="blog-sidebar">
              <a class="blog-sidebar-link" href="#intro">Intro</a>
              <a class="blog-sidebar-link" href="#design">Design</a>
            </nav>
            <button class="mobile-nav-toggle" aria-expanded="false"></button>
            <section id="intro" style="height: 3000px">Intro</section>
            <section id="design" style="height: 3000px">Design</section>"##,
    );
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

#[wasm_bindgen_test]
fn test_mount_inserts_and_unmount_removes_indicators() {
    let root = article();
    let mut fx = PageFx::new();

    fx.mount_with(JsValue::NULL).unwrap();
    assert!(fx.is_mounted());
    assert!(document().query_selector(".reading-progress").unwrap().is_some());
    assert!(document().query_selector(".back-to-top").unwrap().is_some());

    assert!(fx.unmount());
    assert!(!fx.is_mounted());
    assert!(document().query_selector(".reading-progress").unwrap().is_none());
    assert!(!fx.unmount());

    root.remove();
}

#[wasm_bindgen_test]
fn test_first_section_highlighted_on_mount() {
    let root = article();
    let mut fx = PageFx::new();
    fx.mount("{}").unwrap();

    let first = document()
        .query_selector(".blog-sidebar-link[href='#intro']")
        .unwrap()
        .unwrap();
    assert!(first.class_list().contains("active"));

    fx.unmount();
    root.remove();
}

#[wasm_bindgen_test]
fn test_drawer_toggle_sets_aria_expanded() {
    let root = article();
    let mut fx = PageFx::new();
    fx.mount("{}").unwrap();

    let toggle: web_sys::HtmlElement = document()
        .query_selector(".mobile-nav-toggle")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    toggle.click();

    assert_eq!(toggle.get_attribute("aria-expanded").as_deref(), Some("true"));
    let sidebar = document().query_selector(".blog-sidebar").unwrap().unwrap();
    assert!(sidebar.class_list().contains("active"));

    fx.unmount();
    root.remove();
}

#[wasm_bindgen_test]
fn test_invalid_config_is_rejected() {
    let mut fx = PageFx::new();
    assert!(fx.mount("{ not json").is_err());
    assert!(fx.mount(r#"{"logging": {"level": "loud"}}"#).is_err());
    assert!(!fx.is_mounted());
}

#[wasm_bindgen_test]
fn test_config_round_trips_through_instance() {
    let root = article();
    let mut fx = PageFx::new();
    fx.mount_presets(vec!["compaction".to_string()]).unwrap();

    let json = fx.config_json().unwrap();
    assert!(json.contains("compaction"));
    assert_eq!(fx.preset_names().length(), 7);

    fx.unmount();
    root.remove();
}

#[wasm_bindgen_test]
fn test_unmount_during_dispatch_is_refused() {
    let id = InstanceManager::create_instance(PageFxConfig::minimal()).unwrap();

    let nested = InstanceManager::with_instance_mut(&id, |_| InstanceManager::remove_instance(&id));
    assert_eq!(nested, Some(false));
    assert!(InstanceManager::instance_exists(&id));

    assert!(InstanceManager::remove_instance(&id));
    assert!(!InstanceManager::instance_exists(&id));
}
