#![cfg(target_arch = "wasm32")]

use postboard_web::app::{ADD_BUTTON, LOAD_BUTTON, POST_CONTAINER};
use postboard_web::controller::{BASE_URL_INPUT, CONTENT_INPUT, TITLE_INPUT};
use postboard_web::{api, app, ApiError, ConfigStore, Controller, Post, PostId, PostUpdate, Renderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlInputElement, Storage};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn storage() -> Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

fn clear_stored_url() {
    storage().remove_item("apiBaseUrl").unwrap();
}

/// Rebuilds the page skeleton the app expects: the three inputs, the two
/// action buttons, and the post container.
fn setup_page() {
    let document = document();
    let body = document.body().unwrap();
    for id in [BASE_URL_INPUT, TITLE_INPUT, CONTENT_INPUT, LOAD_BUTTON, ADD_BUTTON, POST_CONTAINER]
    {
        if let Some(stale) = document.get_element_by_id(id) {
            stale.remove();
        }
        let tag = match id {
            LOAD_BUTTON | ADD_BUTTON => "button",
            POST_CONTAINER => "div",
            _ => "input",
        };
        let element = document.create_element(tag).unwrap();
        element.set_id(id);
        body.append_child(&element).unwrap();
    }
}

fn input(id: &str) -> HtmlInputElement {
    document().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn container() -> Element {
    document().get_element_by_id(POST_CONTAINER).unwrap()
}

fn post(id: i64, title: &str, content: &str) -> Post {
    Post { id: PostId::Number(id), title: title.into(), content: content.into() }
}

#[wasm_bindgen_test]
fn config_store_round_trip() {
    clear_stored_url();
    let config = ConfigStore::new().unwrap();
    assert_eq!(config.base_url(), None);

    config.set_base_url("http://x/api");
    assert_eq!(config.base_url().as_deref(), Some("http://x/api"));

    config.set_base_url("http://y/api");
    assert_eq!(config.base_url().as_deref(), Some("http://y/api"));
}

#[wasm_bindgen_test]
fn render_is_one_block_per_post_in_server_order() {
    clear_stored_url();
    setup_page();
    let controller = app::init().unwrap();

    controller.render_posts(&[post(1, "A", "B"), post(2, "C", "D")]);

    let container = container();
    assert_eq!(container.child_element_count(), 2);
    let first = container.first_element_child().unwrap();
    assert_eq!(first.query_selector("h2").unwrap().unwrap().text_content().unwrap(), "A");
    assert_eq!(first.query_selector("p").unwrap().unwrap().text_content().unwrap(), "B");
    let second = first.next_element_sibling().unwrap();
    assert_eq!(second.query_selector("h2").unwrap().unwrap().text_content().unwrap(), "C");

    // Delete and Update controls on every block.
    assert_eq!(first.query_selector_all("button").unwrap().length(), 2);
}

#[wasm_bindgen_test]
fn render_is_a_full_rebuild() {
    clear_stored_url();
    setup_page();
    let controller = app::init().unwrap();

    controller.render_posts(&[post(1, "A", "B"), post(2, "C", "D")]);
    controller.render_posts(&[post(3, "E", "F")]);

    let container = container();
    assert_eq!(container.child_element_count(), 1);
    let only = container.first_element_child().unwrap();
    assert_eq!(only.query_selector("h2").unwrap().unwrap().text_content().unwrap(), "E");
}

#[wasm_bindgen_test]
fn render_injects_text_not_markup() {
    clear_stored_url();
    setup_page();
    let controller = app::init().unwrap();

    controller.render_posts(&[post(1, "<b>bold</b>", "<script>alert(1)</script>")]);

    let block = container().first_element_child().unwrap();
    assert_eq!(
        block.query_selector("h2").unwrap().unwrap().text_content().unwrap(),
        "<b>bold</b>"
    );
    assert_eq!(
        block.query_selector("p").unwrap().unwrap().text_content().unwrap(),
        "<script>alert(1)</script>"
    );
    assert!(container().query_selector("script").unwrap().is_none());
}

#[wasm_bindgen_test]
async fn empty_update_patch_is_rejected_before_any_request() {
    // Blank or cancelled prompts produce an empty patch; update_post must
    // refuse it without issuing a request. The invalid host would make any
    // fetch fail with a Network error, so a Validation error proves the guard
    // ran first.
    let patch = PostUpdate::from_input(Some("   "), None);
    assert!(patch.is_empty());

    let err = api::update_post("http://nowhere.invalid", &PostId::Number(1), &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)), "got {err}");
}

#[wasm_bindgen_test]
async fn failed_delete_leaves_display_unchanged() {
    clear_stored_url();
    setup_page();
    let controller = app::init().unwrap();
    controller.render_posts(&[post(1, "A", "B")]);

    let err = api::delete_post("http://127.0.0.1:1", &PostId::Number(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err}");

    let container = container();
    assert_eq!(container.child_element_count(), 1);
    let block = container.first_element_child().unwrap();
    assert_eq!(block.query_selector("h2").unwrap().unwrap().text_content().unwrap(), "A");
}

#[wasm_bindgen_test]
fn reload_rereads_the_input_field() {
    clear_stored_url();
    setup_page();
    let controller = app::init().unwrap();

    // A URL edited while a mutation was in flight wins over the one the
    // mutation ran against.
    input(BASE_URL_INPUT).set_value("http://edited/api");
    controller.reload("http://stale/api".into());
    assert_eq!(storage().get_item("apiBaseUrl").unwrap().as_deref(), Some("http://edited/api"));

    // Without the input field the mutation's own URL is the best available.
    document().get_element_by_id(BASE_URL_INPUT).unwrap().remove();
    controller.reload("http://fallback/api".into());
    assert_eq!(storage().get_item("apiBaseUrl").unwrap().as_deref(), Some("http://fallback/api"));
}

#[wasm_bindgen_test]
fn rendered_buttons_do_not_keep_the_controller_alive() {
    clear_stored_url();
    setup_page();
    let config = ConfigStore::new().unwrap();
    let renderer = Renderer::new(document(), POST_CONTAINER).unwrap();
    let controller = Controller::new(config, renderer, document());
    let weak = controller.downgrade();

    controller.render_posts(&[post(1, "A", "B")]);
    assert!(weak.upgrade().is_some());

    drop(controller);
    assert!(weak.upgrade().is_none());
}

#[wasm_bindgen_test]
fn init_prefills_stored_base_url() {
    setup_page();
    storage().set_item("apiBaseUrl", "http://saved").unwrap();

    app::init().unwrap();

    assert_eq!(input(BASE_URL_INPUT).value(), "http://saved");
}

#[wasm_bindgen_test]
fn init_without_stored_url_stays_idle() {
    clear_stored_url();
    setup_page();

    app::init().unwrap();

    assert_eq!(input(BASE_URL_INPUT).value(), "");
    assert_eq!(container().child_element_count(), 0);
}
