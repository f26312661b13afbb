use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::api::Post;
use crate::controller::Controller;

/// Full-rebuild renderer for the post list. Every render clears the container
/// and reconstructs one block per post, in the order given. Titles and
/// contents are injected as text nodes, never as markup.
pub struct Renderer {
    document: Document,
    container: Element,
    // Button closures from the previous render, kept alive until the next
    // rebuild replaces them.
    callbacks: RefCell<Vec<Closure<dyn FnMut()>>>,
}

impl Renderer {
    pub fn new(document: Document, container_id: &str) -> Result<Renderer, JsValue> {
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{container_id}")))?;
        Ok(Renderer { document, container, callbacks: RefCell::new(Vec::new()) })
    }

    pub fn render(&self, posts: &[Post], controller: &Controller) -> Result<(), JsValue> {
        self.container.set_inner_html("");
        let mut callbacks = self.callbacks.borrow_mut();
        callbacks.clear();

        for post in posts {
            let block = self.document.create_element("div")?;
            block.set_class_name("post");

            let text = self.document.create_element("div")?;
            text.set_class_name("text-content");
            let title = self.document.create_element("h2")?;
            title.set_text_content(Some(&post.title));
            let content = self.document.create_element("p")?;
            content.set_text_content(Some(&post.content));
            text.append_child(&title)?;
            text.append_child(&content)?;

            let buttons = self.document.create_element("div")?;
            buttons.set_class_name("button-group");

            let delete = self.button("Delete", {
                let controller = controller.downgrade();
                let id = post.id.clone();
                move || {
                    if let Some(controller) = controller.upgrade() {
                        controller.delete_clicked(id.clone())
                    }
                }
            }, &mut callbacks)?;
            let update = self.button("Update", {
                let controller = controller.downgrade();
                let id = post.id.clone();
                move || {
                    if let Some(controller) = controller.upgrade() {
                        controller.update_clicked(id.clone())
                    }
                }
            }, &mut callbacks)?;
            buttons.append_child(&delete)?;
            buttons.append_child(&update)?;

            block.append_child(&text)?;
            block.append_child(&buttons)?;
            self.container.append_child(&block)?;
        }
        Ok(())
    }

    fn button(
        &self,
        label: &str,
        on_click: impl FnMut() + 'static,
        callbacks: &mut Vec<Closure<dyn FnMut()>>,
    ) -> Result<Element, JsValue> {
        let button = self.document.create_element("button")?;
        button.set_text_content(Some(label));
        let closure = Closure::<dyn FnMut()>::wrap(Box::new(on_click));
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        callbacks.push(closure);
        Ok(button)
    }
}
