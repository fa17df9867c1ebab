// Bindings to the page's `marked` and `highlight.js` globals.

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = marked, js_name = parse)]
    fn marked_parse(src: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = marked, js_name = setOptions)]
    fn marked_set_options(options: &Object) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = hljs, js_name = highlightElement)]
    fn hljs_highlight_element(block: &Element) -> Result<(), JsValue>;
}

/// Line breaks become `<br>`, GitHub flavoured extensions on.
pub fn configure() {
    let options = Object::new();
    let _ = Reflect::set(&options, &"breaks".into(), &JsValue::TRUE);
    let _ = Reflect::set(&options, &"gfm".into(), &JsValue::TRUE);
    if let Err(e) = marked_set_options(&options) {
        log::warn!("marked unavailable, replies will be shown as plain text: {:?}", e);
    }
}

/// Markdown to HTML. Without `marked` on the page the text is escaped and
/// shown as is.
pub fn render(src: &str) -> String {
    match marked_parse(src).map(|html| html.as_string()) {
        Ok(Some(html)) => html,
        _ => escape_html(src),
    }
}

pub fn highlight_code_blocks(root: &Element) -> Result<(), JsValue> {
    let blocks = root.query_selector_all("pre code")?;
    for i in 0..blocks.length() {
        let block = match blocks.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            Some(block) => block,
            None => continue,
        };
        if let Err(e) = hljs_highlight_element(&block) {
            log::debug!("highlight.js unavailable: {:?}", e);
            break;
        }
    }
    Ok(())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
