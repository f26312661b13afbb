use std::rc::{Rc, Weak};

use tracing::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlInputElement};

use crate::api::{self, PostId, PostUpdate};
use crate::config::ConfigStore;
use crate::render::Renderer;

pub const BASE_URL_INPUT: &str = "api-base-url";
pub const TITLE_INPUT: &str = "post-title";
pub const CONTENT_INPUT: &str = "post-content";

struct Inner {
    config: ConfigStore,
    renderer: Renderer,
    document: Document,
}

/// Orchestrates user-triggered actions. Each action is a one-shot linear task
/// spawned on the browser's event loop; overlapping actions are allowed and
/// each triggers its own reload, so the last response to land wins the final
/// render. Network and decode failures are logged and the display keeps its
/// prior (possibly stale) state; the only user-visible failure is the empty
/// update payload.
#[derive(Clone)]
pub struct Controller {
    inner: Rc<Inner>,
}

impl Controller {
    pub fn new(config: ConfigStore, renderer: Renderer, document: Document) -> Controller {
        Controller { inner: Rc::new(Inner { config, renderer, document }) }
    }

    /// Persists the base URL, fetches the full list, and rebuilds the display.
    pub fn load(&self, base_url: String) {
        self.inner.config.set_base_url(&base_url);
        let this = self.clone();
        spawn_local(async move {
            match api::list_posts(&base_url).await {
                Ok(posts) => this.render_posts(&posts),
                Err(e) => error!("Error loading posts: {}", e),
            }
        });
    }

    /// Full rebuild of the display, one block per post in the given order.
    pub fn render_posts(&self, posts: &[api::Post]) {
        if let Err(e) = self.inner.renderer.render(posts, self) {
            error!("Render failed: {:?}", e);
        }
    }

    /// Triggers a Load with the URL currently in the input field, the way the
    /// page re-reads it after every mutation. When the field is unavailable
    /// the URL the mutation ran against is used instead.
    pub fn reload(&self, fallback: String) {
        match self.input_value(BASE_URL_INPUT) {
            Some(url) => self.load(url),
            None => self.load(fallback),
        }
    }

    pub fn downgrade(&self) -> WeakController {
        WeakController { inner: Rc::downgrade(&self.inner) }
    }

    /// Creates a post, then reloads the full list rather than inserting
    /// locally.
    pub fn add(&self, base_url: String, title: String, content: String) {
        let this = self.clone();
        spawn_local(async move {
            match api::create_post(&base_url, &title, &content).await {
                Ok(post) => {
                    info!("Post added: {}", post.id);
                    this.reload(base_url);
                }
                Err(e) => error!("Error adding post: {}", e),
            }
        });
    }

    pub fn delete(&self, base_url: String, id: PostId) {
        let this = self.clone();
        spawn_local(async move {
            match api::delete_post(&base_url, &id).await {
                Ok(()) => {
                    info!("Post deleted: {}", id);
                    this.reload(base_url);
                }
                Err(e) => error!("Error deleting post: {}", e),
            }
        });
    }

    /// Prompts for replacement title and content, then sends only the fields
    /// the user actually provided. An empty patch aborts with an alert before
    /// any request is issued.
    pub fn update(&self, base_url: String, id: PostId) {
        let patch = PostUpdate::from_input(
            self.prompt("Enter the new title: ").as_deref(),
            self.prompt("Enter the new content: ").as_deref(),
        );
        if patch.is_empty() {
            self.alert("Title and content cannot be empty");
            return;
        }
        let this = self.clone();
        spawn_local(async move {
            match api::update_post(&base_url, &id, &patch).await {
                Ok(post) => {
                    info!("Post updated: {}", post.id);
                    this.reload(base_url);
                }
                Err(e) => error!("Error updating post: {}", e),
            }
        });
    }

    pub(crate) fn load_clicked(&self) {
        if let Some(base_url) = self.input_value(BASE_URL_INPUT) {
            self.load(base_url);
        }
    }

    pub(crate) fn add_clicked(&self) {
        let (Some(base_url), Some(title), Some(content)) = (
            self.input_value(BASE_URL_INPUT),
            self.input_value(TITLE_INPUT),
            self.input_value(CONTENT_INPUT),
        ) else {
            return;
        };
        self.add(base_url, title, content);
    }

    pub(crate) fn delete_clicked(&self, id: PostId) {
        if let Some(base_url) = self.input_value(BASE_URL_INPUT) {
            self.delete(base_url, id);
        }
    }

    pub(crate) fn update_clicked(&self, id: PostId) {
        if let Some(base_url) = self.input_value(BASE_URL_INPUT) {
            self.update(base_url, id);
        }
    }

    fn input_value(&self, element_id: &str) -> Option<String> {
        let Some(element) = self.inner.document.get_element_by_id(element_id) else {
            error!("Missing input element #{element_id}");
            return None;
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Some(input.value()),
            Err(_) => {
                error!("#{element_id} is not an input element");
                None
            }
        }
    }

    fn prompt(&self, message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok().flatten()
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Handle held by rendered button closures. The renderer lives inside the
/// controller, so a strong reference from the buttons back to the controller
/// would form a cycle; the weak handle breaks it.
#[derive(Clone)]
pub struct WeakController {
    inner: Weak<Inner>,
}

impl WeakController {
    pub fn upgrade(&self) -> Option<Controller> {
        self.inner.upgrade().map(|inner| Controller { inner })
    }
}
