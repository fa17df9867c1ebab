// `log` backend that forwards records to the browser console, plus a
// console.time span for profiling hot paths.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line: JsValue = format!("[{}] {}", record.target(), record.args()).into();
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug => console::log_1(&line),
            Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger. Calling it again only changes the level.
pub fn init(level: LevelFilter) {
    // a second set_logger fails, the first logger stays in place
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

// Times its own lifetime with console.time / console.timeEnd while trace
// logging is on, does nothing otherwise.
pub struct Timer<'a> {
    name: Option<&'a str>,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        if log::log_enabled!(Level::Trace) {
            console::time_with_label(name);
            Timer { name: Some(name) }
        } else {
            Timer { name: None }
        }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        if let Some(name) = self.name {
            console::time_end_with_label(name);
        }
    }
}
