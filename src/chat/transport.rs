// Request/response messaging with the remote chat service.

use crate::error::ChatError;
use futures::future::{FutureExt, LocalBoxFuture};
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub trait ChatTransport {
    /// Sends one user message and resolves to the assistant's reply.
    fn send<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<String, ChatError>>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct ChatReply {
    reply: Option<String>,
}

pub fn encode_request(message: &str) -> Result<String, ChatError> {
    serde_json::to_string(&ChatRequest { message }).map_err(|e| ChatError::Decode(e.to_string()))
}

/// Turns a response status and body into the reply text.
///
/// A rejected request reports the service's own `reply` when the body
/// carries one and `rejected_text` otherwise.
pub fn interpret_response(
    ok: bool,
    status: u16,
    body: &str,
    rejected_text: &str,
) -> Result<String, ChatError> {
    let parsed = serde_json::from_str::<ChatReply>(body);
    if !ok {
        let reason = parsed
            .ok()
            .and_then(|r| r.reply)
            .unwrap_or_else(|| rejected_text.to_string());
        return Err(ChatError::Rejected { status, reason });
    }
    parsed
        .map_err(|e| ChatError::Decode(e.to_string()))?
        .reply
        .ok_or(ChatError::MissingReply)
}

/// POSTs `{"message": ...}` as JSON to a fixed endpoint with `fetch`.
pub struct FetchTransport {
    endpoint: String,
    rejected_text: String,
}

impl FetchTransport {
    pub fn new(endpoint: &str, rejected_text: &str) -> Self {
        FetchTransport {
            endpoint: endpoint.to_string(),
            rejected_text: rejected_text.to_string(),
        }
    }

    /// JSON POST of `{"message": ...}` to the configured endpoint.
    pub fn build_request(&self, message: &str) -> Result<Request, ChatError> {
        let body = encode_request(message)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&self.endpoint, &opts)?;
        request.headers().set("Content-Type", "application/json")?;
        Ok(request)
    }

    async fn post(&self, message: &str) -> Result<String, ChatError> {
        let request = self.build_request(message)?;
        let window = web_sys::window().ok_or_else(|| ChatError::Network("no window".to_string()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        log::debug!("chat service answered {}", response.status());

        let text = JsFuture::from(response.text()?).await?;
        let text = text.as_string().unwrap_or_default();
        interpret_response(response.ok(), response.status(), &text, &self.rejected_text)
    }
}

impl ChatTransport for FetchTransport {
    fn send<'a>(&'a self, message: &'a str) -> LocalBoxFuture<'a, Result<String, ChatError>> {
        self.post(message).boxed_local()
    }
}
