// Chat panel: sends what the user types to the chat service and shows the
// reply as a bubble. The session only owns the waiting flag; rendering and
// networking sit behind the ChatView and ChatTransport traits.

pub mod markdown;
pub mod transport;
pub mod view;

pub use transport::{ChatTransport, FetchTransport};
pub use view::{ChatView, DomChatView, Sender};

use crate::error::ChatError;
use std::cell::Cell;

/// What became of one submitted message.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Empty text, or a request was already pending.
    Ignored,
    Answered,
    /// The user was shown the apology instead of a reply.
    Failed(ChatError),
}

pub struct ChatSession<T, V> {
    transport: T,
    view: V,
    waiting: Cell<bool>,
    apology_text: String,
}

impl<T: ChatTransport, V: ChatView> ChatSession<T, V> {
    pub fn new(transport: T, view: V, apology_text: &str) -> Self {
        ChatSession {
            transport,
            view,
            waiting: Cell::new(false),
            apology_text: apology_text.to_string(),
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting.get()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Sends `raw` (trimmed) and renders the outcome.
    ///
    /// Input stays disabled until the request settles, whichever way it
    /// settles, and is cleared afterwards.
    pub async fn submit(&self, raw: &str) -> Submission {
        let message = raw.trim();
        if message.is_empty() || self.waiting.get() {
            return Submission::Ignored;
        }

        let outcome = {
            let _lock = InputLock::acquire(&self.waiting, &self.view);
            self.view.add_message(message, Sender::User);
            self.view.show_typing();

            let result = self.transport.send(message).await;
            self.view.hide_typing();

            match result {
                Ok(reply) => {
                    self.view.add_message(&reply, Sender::Assistant);
                    Submission::Answered
                }
                Err(e) => {
                    log::error!("{}", e);
                    self.view.add_message(&self.apology_text, Sender::Assistant);
                    Submission::Failed(e)
                }
            }
        };

        self.view.clear_input();
        outcome
    }
}

// Holds the input disabled for as long as it lives.
struct InputLock<'a, V: ChatView> {
    waiting: &'a Cell<bool>,
    view: &'a V,
}

impl<'a, V: ChatView> InputLock<'a, V> {
    fn acquire(waiting: &'a Cell<bool>, view: &'a V) -> Self {
        waiting.set(true);
        view.set_input_enabled(false);
        InputLock { waiting, view }
    }
}

impl<'a, V: ChatView> Drop for InputLock<'a, V> {
    fn drop(&mut self) {
        self.view.set_input_enabled(true);
        self.waiting.set(false);
    }
}
