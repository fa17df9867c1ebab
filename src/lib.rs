mod utils;

pub mod chat;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod logger;
pub mod page;
pub mod particle;
pub mod preview;
pub mod surface;

use config::PageConfig;
use logger::Timer;
use page::Page;
use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Entry point for the hosting page. `config_json` overrides any subset of
/// the default settings.
#[wasm_bindgen]
pub fn start(config_json: Option<String>) -> Result<Page, JsValue> {
    utils::set_panic_hook();
    let config = match config_json {
        Some(json) => PageConfig::from_json(&json)?,
        None => PageConfig::default(),
    };
    logger::init(config.log_level);
    let _timer = Timer::new("start");
    Ok(page::start(config)?)
}
