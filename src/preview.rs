// Live markdown editor: a textarea placed in front of a target element,
// re-rendering the target on every keystroke.

use crate::chat::markdown;
use crate::config::PreviewConfig;
use crate::error::{describe_js, SetupError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlTextAreaElement, Node};

/// Returns `false` when the page has no target element to preview into.
pub fn attach(document: &Document, config: &PreviewConfig) -> Result<bool, SetupError> {
    let target = match document.get_element_by_id(&config.target_id) {
        Some(target) => target,
        None => {
            log::debug!("no '{}' element, markdown preview disabled", config.target_id);
            return Ok(false);
        }
    };
    let parent = target
        .parent_node()
        .ok_or_else(|| SetupError::Detached(config.target_id.clone()))?;

    let editor = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| SetupError::WrongElement("textarea".to_string()))?;
    editor.style().set_property("width", "100%")?;
    editor.style().set_property("height", "300px")?;
    editor.set_value(&config.initial_text);
    render_into(&target, &config.initial_text);

    let anchor: Node = target.clone().into();
    let source = editor.clone();
    let on_input = Closure::<dyn FnMut()>::new(move || {
        render_into(&target, &source.value());
    });
    editor.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
    on_input.forget();

    parent.insert_before(&editor, Some(&anchor))?;
    Ok(true)
}

fn render_into(target: &Element, src: &str) {
    target.set_inner_html(&markdown::render(src));
    if let Err(e) = markdown::highlight_code_blocks(target) {
        log::warn!("failed to highlight preview: {}", describe_js(&e));
    }
}
