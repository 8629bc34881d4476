//! `/api/config` and `/api/questions`: runtime configuration and a
//! replacement question pool, both as JSON.
//!
//! Bodies may be raw JSON or a form field (`config=` / `questions=`).
//! Rejected input leaves the current value in place.

use crate::config::CardConfig;
use crate::questions::QuestionPool;
use crate::routes::util::json_payload;
use crate::session::state::with_session_mut;

/// Handle POST /api/config
pub fn handle_config_post(body: &str) -> String {
    let json = json_payload(body, "config");
    match CardConfig::from_json(&json) {
        Ok(config) => {
            with_session_mut(|s| s.apply_config(config));
            r#"<span class="text-emerald-600">Configuration updated</span>"#.to_string()
        }
        Err(e) => {
            log::warn!("config rejected: {}", e);
            format!(r#"<span class="text-red-600">{}</span>"#, crate::html::escape(&e.to_string()))
        }
    }
}

/// Handle POST /api/questions
pub fn handle_questions_post(body: &str) -> String {
    let json = json_payload(body, "questions");
    match QuestionPool::from_json(&json) {
        Ok(pool) => {
            let len = pool.len();
            with_session_mut(|s| s.replace_pool(pool));
            format!(r#"<span class="text-emerald-600">Loaded {} questions</span>"#, len)
        }
        Err(e) => {
            log::warn!("question pool rejected: {}", e);
            format!(r#"<span class="text-red-600">{}</span>"#, crate::html::escape(&e.to_string()))
        }
    }
}
