use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::config::ConfigStore;
use crate::controller::{Controller, BASE_URL_INPUT};
use crate::render::Renderer;

pub const POST_CONTAINER: &str = "post-container";
pub const LOAD_BUTTON: &str = "load-posts";
pub const ADD_BUTTON: &str = "add-post";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = tracing_wasm::try_set_as_global_default();

    if let Err(e) = init() {
        tracing::warn!("Bootstrap skipped: {:?}", e);
    }
}

/// Wires the page controls and restores the last-used base URL. With a stored
/// URL the input is pre-filled and an initial load fires; with nothing stored,
/// no automatic load.
pub fn init() -> Result<Controller, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let config = ConfigStore::new()?;
    let saved = config.base_url();
    let renderer = Renderer::new(document.clone(), POST_CONTAINER)?;
    let controller = Controller::new(config, renderer, document.clone());

    wire_button(&document, LOAD_BUTTON, {
        let controller = controller.clone();
        move || controller.load_clicked()
    })?;
    wire_button(&document, ADD_BUTTON, {
        let controller = controller.clone();
        move || controller.add_clicked()
    })?;

    if let Some(saved) = saved {
        if let Some(input) = document.get_element_by_id(BASE_URL_INPUT) {
            if let Ok(input) = input.dyn_into::<web_sys::HtmlInputElement>() {
                input.set_value(&saved);
            }
        }
        tracing::info!("Restored base URL, loading posts");
        controller.load(saved);
    }

    Ok(controller)
}

fn wire_button(
    document: &Document,
    element_id: &str,
    on_click: impl FnMut() + 'static,
) -> Result<(), JsValue> {
    let button = document
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{element_id}")))?;
    let closure = Closure::<dyn FnMut()>::wrap(Box::new(on_click));
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    // The listener lives for the lifetime of the page.
    closure.forget();
    Ok(())
}
