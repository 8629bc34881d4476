//! Character interview card generator, in-browser WASM server.
//!
//! Exports `handle_request(method, path, query, body)` for the Web Worker
//! bridge to call. Uses `matchit` for URL routing, the same router engine
//! that powers Axum. Every response is an HTML fragment for HTMX to swap in;
//! the session (selection, answers, locks, identity) lives in worker memory
//! and is gone on reload.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod data_uri;
pub mod error;
pub mod html;
pub mod logging;
pub mod questions;
pub mod routes;
pub mod session;

/// Process an HTTP-like request and return an HTML fragment.
///
/// Called from JavaScript (Web Worker) via wasm-bindgen.
///
/// # Arguments
/// * `method`: HTTP method ("GET" or "POST")
/// * `path`  : URL path (e.g., "/api/card/draw")
/// * `query` : Query string. Unused by current routes but accepted for GET.
/// * `body`  : Form-encoded (or JSON) request body. Empty for GET.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, query: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/card", "card_page").ok();
    router.insert("/api/card/region", "card_region").ok();
    router.insert("/api/card/draw", "card_draw").ok();
    router.insert("/api/card/reshuffle", "card_reshuffle").ok();
    router.insert("/api/card/lock", "card_lock").ok();
    router.insert("/api/card/answer", "card_answer").ok();
    router.insert("/api/card/name", "card_name").ok();
    router.insert("/api/card/image", "card_image").ok();
    router.insert("/api/card/export", "card_export").ok();
    router.insert("/api/card/export/complete", "card_export_complete").ok();
    router.insert("/api/card/export/failed", "card_export_failed").ok();

    router.insert("/api/config", "config").ok();
    router.insert("/api/questions", "questions").ok();

    log::debug!("{} {}", method, path);

    match router.at(path) {
        Ok(matched) => match (*matched.value, method) {
            ("card_page", "GET") => routes::card::handle_page_get(query),
            ("card_region", "GET") => routes::card::handle_region_get(query),

            ("card_draw", "POST") => routes::card::handle_draw_post(body),
            ("card_reshuffle", "POST") => routes::card::handle_reshuffle_post(body),
            ("card_lock", "POST") => routes::card::handle_lock_post(body),
            ("card_answer", "POST") => routes::card::handle_answer_post(body),
            ("card_name", "POST") => routes::card::handle_name_post(body),
            ("card_image", "POST") => routes::card::handle_image_post(body),
            ("card_export", "POST") => routes::card::handle_export_post(body),
            ("card_export_complete", "POST") => routes::card::handle_export_complete_post(body),
            ("card_export_failed", "POST") => routes::card::handle_export_failed_post(body),

            ("config", "POST") => routes::settings::handle_config_post(body),
            ("questions", "POST") => routes::settings::handle_questions_post(body),

            _ => method_not_allowed(),
        },
        Err(_) => not_found(),
    }
}

/// Install the console logger at `level` ("debug", "info", "warn", ...).
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = logging::parse_level(level);
    if logging::install(filter) {
        log::info!("logging initialized at {}", filter);
    }
}

fn not_found() -> String {
    r#"<span class="text-red-600">404 — route not found</span>"#.to_string()
}

fn method_not_allowed() -> String {
    r#"<span class="text-red-600">405 — method not allowed</span>"#.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::{reset_session, with_session};

    #[test]
    fn returns_404_for_unknown_route() {
        let html = handle_request("GET", "/api/nonexistent", "", "");
        assert!(html.contains("404"));
    }

    #[test]
    fn returns_405_for_wrong_method() {
        let html = handle_request("GET", "/api/card/draw", "", "");
        assert!(html.contains("405"));
        let html = handle_request("POST", "/api/card", "", "");
        assert!(html.contains("405"));
    }

    #[test]
    fn routes_card_page() {
        reset_session();
        let html = handle_request("GET", "/api/card", "", "");
        assert!(html.contains("キャラインタビュー"));
        assert!(html.contains("ランダム6問（全体）"));
        assert!(!html.contains("PNG出力"));
        reset_session();
    }

    #[test]
    fn routes_draw_and_region() {
        reset_session();
        let html = handle_request("POST", "/api/card/draw", "", "source=all");
        assert_eq!(html.matches("<textarea").count(), 6);
        let region = handle_request("GET", "/api/card/region", "", "");
        assert!(region.contains(r#"id="interview-card""#));
        reset_session();
    }

    #[test]
    fn routes_reshuffle_on_empty_card_is_first_draw() {
        reset_session();
        handle_request("POST", "/api/card/reshuffle", "", "source=curated");
        assert_eq!(with_session(|s| s.selected.len()), 6);
        reset_session();
    }

    #[test]
    fn routes_export_noop_without_card() {
        reset_session();
        assert!(handle_request("POST", "/api/card/export", "", "").is_empty());
        reset_session();
    }

    #[test]
    fn routes_export_sequence() {
        reset_session();
        handle_request("POST", "/api/card/draw", "", "source=curated");
        handle_request("POST", "/api/card/name", "", "name=Alice");
        let html = handle_request("POST", "/api/card/export", "", "");
        assert!(html.contains("html2canvas"));
        let html = handle_request("POST", "/api/card/export/failed", "", "ticket=1&msg=boom");
        assert!(html.contains("boom"));
        assert!(!with_session(|s| s.capture_mode()));
        reset_session();
    }

    #[test]
    fn routes_config() {
        reset_session();
        let html = handle_request("POST", "/api/config", "", r#"{"locks_enabled": false}"#);
        assert!(html.contains("Configuration updated"));
        reset_session();
    }

    #[test]
    fn routes_questions() {
        reset_session();
        let html = handle_request("POST", "/api/questions", "", r#"["A","B","C","D","E","F","G"]"#);
        assert!(html.contains("Loaded 7 questions"));
        handle_request("POST", "/api/card/draw", "", "source=all");
        assert!(with_session(|s| s.selected.iter().all(|q| q.len() == 1)));
        reset_session();
    }

    #[test]
    fn init_logging_is_idempotent() {
        init_logging("debug");
        init_logging("warn");
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}
