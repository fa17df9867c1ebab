// Application context: builds the chat panel and the particle background
// from one config and hooks them to the browser's events.

use crate::chat::{self, ChatSession, DomChatView, FetchTransport, Submission};
use crate::chat::view::element_by_id;
use crate::config::PageConfig;
use crate::error::{describe_js, SetupError};
use crate::field::ParticleField;
use crate::logger::Timer;
use crate::preview;
use crate::surface::CanvasSurface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlCanvasElement, Window};

type Field = ParticleField<CanvasSurface>;
type Chat = ChatSession<FetchTransport, DomChatView>;

/// Handle to a running page. The frame loop and event handlers keep
/// running whether or not JS holds on to it.
#[wasm_bindgen]
pub struct Page {
    field: Rc<RefCell<Field>>,
    chat: Rc<Chat>,
}

#[wasm_bindgen]
impl Page {
    pub fn particle_count(&self) -> usize {
        self.field.borrow().particles().len()
    }

    /// Current positions flattened as `[x0, y0, x1, y1, ...]`.
    pub fn particle_positions(&self) -> Vec<f64> {
        self.field
            .borrow()
            .particles()
            .iter()
            .flat_map(|p| p.pos.iter().copied())
            .collect()
    }

    pub fn is_waiting(&self) -> bool {
        self.chat.is_waiting()
    }
}

pub fn start(config: PageConfig) -> Result<Page, SetupError> {
    let window = web_sys::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoWindow)?;

    chat::markdown::configure();
    let view = DomChatView::from_document(&document, &config.chat)?;
    let transport = FetchTransport::new(&config.chat.endpoint, &config.chat.rejected_text);
    let chat = Rc::new(ChatSession::new(transport, view, &config.chat.apology_text));
    listen_for_submit(&document, &config.chat.form_id, chat.clone())?;

    let field = Rc::new(RefCell::new(build_field(&window, &document, &config)?));
    listen_for_resize(&window, field.clone())?;
    run_frame_loop(&window, field.clone())?;

    if let Some(preview) = &config.preview {
        preview::attach(&document, preview)?;
    }

    log::info!(
        "page started: {} particles, chat at {}",
        field.borrow().particles().len(),
        config.chat.endpoint
    );
    Ok(Page { field, chat })
}

fn build_field(window: &Window, document: &Document, config: &PageConfig) -> Result<Field, SetupError> {
    let canvas = element_by_id(document, &config.canvas_id)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SetupError::WrongElement(config.canvas_id.clone()))?;
    let surface = CanvasSurface::new(canvas)?;
    let (width, height) = viewport_size(window);
    Ok(ParticleField::initialize(
        surface,
        width,
        height,
        config.field.clone(),
        &mut rand::thread_rng(),
    ))
}

fn viewport_size(window: &Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v.max(0.0) as u32)
            .unwrap_or(0)
    };
    (dimension(window.inner_width()), dimension(window.inner_height()))
}

fn listen_for_submit(document: &Document, form_id: &str, chat: Rc<Chat>) -> Result<(), SetupError> {
    let form = element_by_id(document, form_id)?;
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let text = chat.view().input_value();
        let chat = chat.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match chat.submit(&text).await {
                Submission::Ignored => log::trace!("submit ignored"),
                Submission::Answered => log::debug!("reply rendered"),
                Submission::Failed(_) => {}
            }
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

fn listen_for_resize(window: &Window, field: Rc<RefCell<Field>>) -> Result<(), SetupError> {
    let source = window.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let (width, height) = viewport_size(&source);
        log::debug!("viewport resized to {}x{}", width, height);
        field.borrow_mut().on_viewport_resize(width, height);
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

// The callback re-schedules itself every frame through the shared slot, so
// the closure stays alive for as long as the page does.
fn run_frame_loop(window: &Window, field: Rc<RefCell<Field>>) -> Result<(), SetupError> {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    let scheduler = window.clone();

    *slot.borrow_mut() = Some(Closure::new(move || {
        {
            let _timer = Timer::new("ParticleField::advance_frame");
            field.borrow_mut().advance_frame();
        }
        if let Some(callback) = next.borrow().as_ref() {
            if let Err(e) = scheduler.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("failed to schedule frame: {}", describe_js(&e));
            }
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
