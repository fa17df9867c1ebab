// Error types for page setup and the chat transport. Setup errors end up at
// the wasm boundary as a JsValue, chat errors are logged and never shown to
// the user verbatim.

use std::fmt;
use wasm_bindgen::{JsCast, JsValue};

/// Errors that can occur while wiring the page together.
#[derive(Debug)]
pub enum SetupError {
    /// No global `window` / `document` (not running in a page).
    NoWindow,
    /// No element with this id in the document.
    MissingElement(String),
    /// An element exists but is not of the expected kind.
    WrongElement(String),
    /// An element exists but hangs outside the document tree.
    Detached(String),
    /// The canvas refused to hand out a 2d context.
    NoContext,
    /// The JSON passed to `start` could not be parsed.
    Config(serde_json::Error),
    /// The config parsed but holds values the page cannot use.
    InvalidConfig(String),
    /// A DOM call threw.
    Dom(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NoWindow => write!(f, "No window or document available"),
            SetupError::MissingElement(id) => write!(f, "No element with id '{}'", id),
            SetupError::WrongElement(id) => write!(f, "Element '{}' has an unexpected type", id),
            SetupError::Detached(id) => write!(f, "Element '{}' has no parent node", id),
            SetupError::NoContext => write!(f, "Failed to get a 2d context from the canvas"),
            SetupError::Config(e) => write!(f, "Invalid page config: {}", e),
            SetupError::InvalidConfig(msg) => write!(f, "Invalid page config: {}", msg),
            SetupError::Dom(msg) => write!(f, "DOM call failed: {}", msg),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JsValue> for SetupError {
    fn from(value: JsValue) -> Self {
        SetupError::Dom(describe_js(&value))
    }
}

impl From<SetupError> for JsValue {
    fn from(e: SetupError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

/// Errors that can occur while talking to the chat service.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatError {
    /// The request never produced a response.
    Network(String),
    /// The service answered with a non-success status.
    Rejected { status: u16, reason: String },
    /// The response body was not the expected JSON.
    Decode(String),
    /// A successful response without a `reply` field.
    MissingReply,
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatError::Network(msg) => write!(f, "Chat request failed: {}", msg),
            ChatError::Rejected { status, reason } => {
                write!(f, "Chat service returned {}: {}", status, reason)
            }
            ChatError::Decode(msg) => write!(f, "Unreadable chat response: {}", msg),
            ChatError::MissingReply => write!(f, "Chat response has no reply"),
        }
    }
}

impl std::error::Error for ChatError {}

impl From<JsValue> for ChatError {
    fn from(value: JsValue) -> Self {
        ChatError::Network(describe_js(&value))
    }
}

// Thrown values are usually Error objects, sometimes plain strings.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}
