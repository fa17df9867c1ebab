// Chat panel rendering. The session only talks to the `ChatView` trait; the
// DOM implementation builds the same bubbles the stylesheet expects.

use crate::chat::markdown;
use crate::config::ChatConfig;
use crate::error::{describe_js, SetupError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    pub fn container_class(self) -> &'static str {
        match self {
            Sender::User => "message-container user-message",
            Sender::Assistant => "message-container ai-message",
        }
    }

    pub fn bubble_class(self) -> &'static str {
        match self {
            Sender::User => "glass-effect rounded-lg p-3 bg-[rgba(155,135,245,0.1)]",
            Sender::Assistant => "glass-effect rounded-lg p-3 bg-[rgba(255,255,255,0.05)]",
        }
    }

    fn avatar(self) -> &'static str {
        match self {
            Sender::User => USER_AVATAR,
            Sender::Assistant => ASSISTANT_AVATAR,
        }
    }
}

pub trait ChatView {
    /// Appends a bubble. User text is shown verbatim, assistant text is
    /// rendered as markdown.
    fn add_message(&self, text: &str, sender: Sender);

    fn show_typing(&self);

    /// No-op when no indicator is showing.
    fn hide_typing(&self);

    fn set_input_enabled(&self, enabled: bool);

    fn clear_input(&self);
}

const TYPING_INDICATOR_ID: &str = "typing-indicator";
const DIMMED_CLASS: &str = "opacity-50";
const NAME_CLASS: &str = "text-sm text-[rgb(155,135,245)] mb-1";

const USER_AVATAR: &str = r#"<div class="avatar">
    <svg viewBox="0 0 24 24" fill="rgb(142 129 199)">
        <path d="M12 2C6.48 2 2 6.48 2 12s4.48 10 10 10 10-4.48 10-10S17.52 2 12 2zm0 3c1.66 0 3 1.34 3 3s-1.34 3-3 3-3-1.34-3-3 1.34-3 3-3zm0 14.2c-2.5 0-4.71-1.28-6-3.22.03-1.99 4-3.08 6-3.08 1.99 0 5.97 1.09 6 3.08-1.29 1.94-3.5 3.22-6 3.22z"/>
    </svg>
</div>"#;

const ASSISTANT_AVATAR: &str = r#"<div class="avatar">
    <svg viewBox="0 0 24 24" fill="rgb(110 89 165)">
        <path d="M13.5 2c-5.629 0-10.212 4.436-10.475 10h-3.025l4.537 5.917 4.463-5.917h-3.025c.26-3.902 3.508-7 7.525-7 4.178 0 7.573 3.393 7.573 7.571 0 4.178-3.395 7.571-7.573 7.571-2.339 0-4.437-1.060-5.844-2.727l-2.242 2.242c1.997 1.996 4.751 3.232 7.789 3.232 6.081 0 11.027-4.946 11.027-11.027s-4.946-11.027-11.027-11.027z"/>
        <path d="M15.414 11h-3.414v-3.414l-4.414 4.414 4.414 4.414v-3.414h3.414l4.414-4.414z"/>
    </svg>
</div>"#;

pub struct DomChatView {
    document: Document,
    messages: Element,
    input: HtmlInputElement,
    button: HtmlButtonElement,
    user_name: String,
    assistant_name: String,
}

impl DomChatView {
    /// Looks up the message list, the input and the form's submit button.
    pub fn from_document(document: &Document, config: &ChatConfig) -> Result<Self, SetupError> {
        let messages = element_by_id(document, &config.messages_id)?;
        let input = element_by_id(document, &config.input_id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| SetupError::WrongElement(config.input_id.clone()))?;
        let button = element_by_id(document, &config.form_id)?
            .query_selector("button")?
            .ok_or_else(|| SetupError::MissingElement(format!("{} button", config.form_id)))?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| SetupError::WrongElement(format!("{} button", config.form_id)))?;
        Ok(DomChatView {
            document: document.clone(),
            messages,
            input,
            button,
            user_name: config.user_name.clone(),
            assistant_name: config.assistant_name.clone(),
        })
    }

    pub fn input_value(&self) -> String {
        self.input.value()
    }

    fn div(&self, class: &str) -> Result<Element, JsValue> {
        let div = self.document.create_element("div")?;
        div.set_class_name(class);
        Ok(div)
    }

    // container > content(avatar, bubble(name, ...)); returns (container, bubble)
    fn bubble(&self, sender: Sender, bubble_class: &str) -> Result<(Element, Element), JsValue> {
        let container = self.div(sender.container_class())?;
        let content = self.div("message-content")?;
        content.set_inner_html(sender.avatar());

        let bubble = self.div(bubble_class)?;
        let name = self.div(NAME_CLASS)?;
        let display_name = match sender {
            Sender::User => self.user_name.as_str(),
            Sender::Assistant => self.assistant_name.as_str(),
        };
        name.set_text_content(Some(display_name));
        bubble.append_child(&name)?;

        content.append_child(&bubble)?;
        container.append_child(&content)?;
        Ok((container, bubble))
    }

    fn push(&self, container: &Element) -> Result<(), JsValue> {
        self.messages.append_child(container)?;
        self.messages.set_scroll_top(self.messages.scroll_height());
        Ok(())
    }

    fn try_add_message(&self, text: &str, sender: Sender) -> Result<(), JsValue> {
        let (container, bubble) = self.bubble(sender, sender.bubble_class())?;
        let body = self.div("markdown-content")?;
        match sender {
            Sender::User => body.set_text_content(Some(text)),
            Sender::Assistant => {
                body.set_inner_html(&markdown::render(text));
                markdown::highlight_code_blocks(&body)?;
            }
        }
        bubble.append_child(&body)?;
        self.push(&container)
    }

    fn try_show_typing(&self) -> Result<(), JsValue> {
        let (container, bubble) = self.bubble(Sender::Assistant, "glass-effect rounded-lg p-3")?;
        container.set_id(TYPING_INDICATOR_ID);
        let dots = self.div("typing-indicator")?;
        for _ in 0..3 {
            let dot = self.div("typing-dot")?;
            dots.append_child(&dot)?;
        }
        bubble.append_child(&dots)?;
        self.push(&container)
    }

    fn try_set_input_enabled(&self, enabled: bool) -> Result<(), JsValue> {
        self.input.set_disabled(!enabled);
        self.button.set_disabled(!enabled);
        for list in [self.input.class_list(), self.button.class_list()] {
            if enabled {
                list.remove_1(DIMMED_CLASS)?;
            } else {
                list.add_1(DIMMED_CLASS)?;
            }
        }
        Ok(())
    }
}

impl ChatView for DomChatView {
    fn add_message(&self, text: &str, sender: Sender) {
        if let Err(e) = self.try_add_message(text, sender) {
            log::warn!("failed to render message: {}", describe_js(&e));
        }
    }

    fn show_typing(&self) {
        if let Err(e) = self.try_show_typing() {
            log::warn!("failed to show typing indicator: {}", describe_js(&e));
        }
    }

    fn hide_typing(&self) {
        if let Some(indicator) = self.document.get_element_by_id(TYPING_INDICATOR_ID) {
            indicator.remove();
        }
    }

    fn set_input_enabled(&self, enabled: bool) {
        if let Err(e) = self.try_set_input_enabled(enabled) {
            log::warn!("failed to toggle chat input: {}", describe_js(&e));
        }
    }

    fn clear_input(&self) {
        self.input.set_value("");
    }
}

pub(crate) fn element_by_id(document: &Document, id: &str) -> Result<Element, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SetupError::MissingElement(id.to_string()))
}
