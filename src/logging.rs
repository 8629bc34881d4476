//! Console logger behind the `log` facade.
//!
//! In the browser, records go to `console.log` / `console.warn` /
//! `console.error` through wasm-bindgen imports. Native builds (unit tests)
//! write to stderr instead.

use std::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(target_arch = "wasm32")]
mod console {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console, js_name = log)]
        pub fn log(s: &str);
        #[wasm_bindgen(js_namespace = console, js_name = warn)]
        pub fn warn(s: &str);
        #[wasm_bindgen(js_namespace = console, js_name = error)]
        pub fn error(s: &str);
    }
}

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
        let line = format_line(record.level(), record.target(), record.args());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    match level {
        Level::Error => console::error(line),
        Level::Warn => console::warn(line),
        _ => console::log(line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Same `[interview]` prefix the generated scripts use, so worker and page
/// output interleave readably in the console.
fn format_line(level: Level, target: &str, args: &fmt::Arguments) -> String {
    format!("[interview] {} {}: {}", level, target, args)
}

/// Parse a level name ("debug", "warn", "off", ...). Unknown names mean `Info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Install the console logger. Safe to call repeatedly: later calls only
/// adjust the max level. Returns true on the first successful install.
pub fn install(level: LevelFilter) -> bool {
    let installed = log::set_logger(&LOGGER).is_ok();
    log::set_max_level(level);
    installed
}
