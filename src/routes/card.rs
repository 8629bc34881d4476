//! `/api/card/*` routes: drawing questions, editing the card, and export.
//!
//! Each handler mutates the thread-local session and returns the fragment
//! for the element it targets (see `session::card` for the nesting).

use crate::questions::Source;
use crate::routes::util::{get_param, parse_form_body};
use crate::session::card::{render_card_region, render_notice, render_page, render_workspace};
use crate::session::export::{render_capture_script, render_download_script};
use crate::session::state::{with_session, with_session_mut, Session};

fn source_param(params: &[(String, String)]) -> Source {
    Source::parse(get_param(params, "source").unwrap_or(""))
}

/// `answer_{slot}` fields posted by the card's textareas.
fn slot_answers(params: &[(String, String)]) -> Vec<(usize, &str)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            let slot = key.strip_prefix("answer_")?.parse().ok()?;
            Some((slot, value.as_str()))
        })
        .collect()
}

fn ticket_param(params: &[(String, String)]) -> Option<u32> {
    get_param(params, "ticket").and_then(|t| t.trim().parse().ok())
}

// ── GET /api/card ──────────────────────────────────────────────────

/// Handle GET /api/card: the whole interview page.
pub fn handle_page_get(_query: &str) -> String {
    with_session(render_page)
}

/// Handle GET /api/card/region: just the card.
pub fn handle_region_get(_query: &str) -> String {
    with_session(render_card_region)
}

// ── POST /api/card/draw ────────────────────────────────────────────

/// Handle POST /api/card/draw
/// Body params:
///   - source=all|curated → full reshuffle, clears answers and locks
pub fn handle_draw_post(body: &str) -> String {
    let params = parse_form_body(body);
    let source = source_param(&params);
    with_session_mut(|s| {
        s.draw(source);
        render_workspace(s)
    })
}

// ── POST /api/card/reshuffle ───────────────────────────────────────

/// Handle POST /api/card/reshuffle
/// Body params:
///   - source=all|curated → replace unlocked questions, answers kept
///   - answer_{slot}={text} → pending card answers, stored first
pub fn handle_reshuffle_post(body: &str) -> String {
    let params = parse_form_body(body);
    let source = source_param(&params);
    with_session_mut(|s| {
        s.apply_slot_answers(slot_answers(&params));
        s.reshuffle_unlocked(source);
        render_workspace(s)
    })
}

// ── POST /api/card/lock ────────────────────────────────────────────

/// Handle POST /api/card/lock
/// Body params:
///   - q={question text} → toggle that question's lock
///   - answer_{slot}={text} → pending card answers, stored first
pub fn handle_lock_post(body: &str) -> String {
    let params = parse_form_body(body);
    let question = get_param(&params, "q").unwrap_or("");
    with_session_mut(|s| {
        s.apply_slot_answers(slot_answers(&params));
        s.toggle_lock(question);
        render_card_region(s)
    })
}

// ── POST /api/card/answer ──────────────────────────────────────────

/// Handle POST /api/card/answer
/// Body params:
///   - q={question text}&answer_{slot}={text} (or `answer={text}`)
///
/// The textarea posts with `hx-swap="none"`, so nothing is returned on
/// success; re-rendering would steal focus mid-typing.
pub fn handle_answer_post(body: &str) -> String {
    let params = parse_form_body(body);
    let question = get_param(&params, "q").unwrap_or("");
    let answer = get_param(&params, "answer")
        .or_else(|| slot_answers(&params).first().map(|&(_, text)| text))
        .unwrap_or("");
    if question.is_empty() {
        return r#"<span class="text-red-600">Missing q parameter</span>"#.to_string();
    }
    with_session_mut(|s| s.set_answer(question, answer));
    String::new()
}

// ── POST /api/card/name ────────────────────────────────────────────

/// Handle POST /api/card/name: body `name={text}`.
pub fn handle_name_post(body: &str) -> String {
    let params = parse_form_body(body);
    let name = get_param(&params, "name").unwrap_or("");
    with_session_mut(|s| {
        s.set_name(name);
        render_card_region(s)
    })
}

// ── POST /api/card/image ───────────────────────────────────────────

/// Handle POST /api/card/image: body `image={data URI}`.
/// An empty value is a no-op; an invalid one keeps the previous image and
/// shows a notice above the card.
pub fn handle_image_post(body: &str) -> String {
    let params = parse_form_body(body);
    let uri = get_param(&params, "image").unwrap_or("");
    with_session_mut(|s| match s.set_image(uri) {
        Ok(_) => render_card_region(s),
        Err(e) => {
            log::warn!("image rejected: {}", e);
            format!("{}{}", render_notice(&e.to_string()), render_card_region(s))
        }
    })
}

// ── POST /api/card/export ──────────────────────────────────────────

/// Handle POST /api/card/export
/// Body params:
///   - answer_{slot}={text} → pending card answers, stored before capture
///
/// Enters capture mode and returns the static card plus the rasterize
/// script. Empty when there is no card yet.
pub fn handle_export_post(body: &str) -> String {
    let params = parse_form_body(body);
    with_session_mut(|s| {
        s.apply_slot_answers(slot_answers(&params));
        export_started(s)
    })
}

fn export_started(s: &mut Session) -> String {
    match s.begin_export() {
        Some(job) => format!(
            "{}{}",
            render_card_region(s),
            render_capture_script(&job, &s.config)
        ),
        None => String::new(),
    }
}

// ── POST /api/card/export/complete ─────────────────────────────────

/// Handle POST /api/card/export/complete
/// Body params:
///   - ticket={n}&png={data URL from the rasterizer}
///
/// Returns the interactive card (once no other export is pending) plus the
/// download script.
pub fn handle_export_complete_post(body: &str) -> String {
    let params = parse_form_body(body);
    let png = get_param(&params, "png").unwrap_or("");
    let Some(ticket) = ticket_param(&params) else {
        return with_session(|s| {
            format!("{}{}", render_notice("Missing ticket parameter"), render_card_region(s))
        });
    };
    with_session_mut(|s| match s.complete_export(ticket, png) {
        Ok(image) => format!("{}{}", render_card_region(s), render_download_script(&image)),
        Err(e) => {
            log::warn!("export #{} rejected: {}", ticket, e);
            format!("{}{}", render_notice(&e.to_string()), render_card_region(s))
        }
    })
}

// ── POST /api/card/export/failed ───────────────────────────────────

/// Handle POST /api/card/export/failed
/// Body params:
///   - ticket={n}&msg={rasterizer error}
pub fn handle_export_failed_post(body: &str) -> String {
    let params = parse_form_body(body);
    let msg = get_param(&params, "msg").unwrap_or("");
    let ticket = ticket_param(&params);
    with_session_mut(|s| {
        if let Some(t) = ticket {
            if let Err(e) = s.fail_export(t) {
                log::debug!("export failure report ignored: {}", e);
            }
        }
        let notice = if msg.is_empty() {
            "PNGの生成に失敗しました".to_string()
        } else {
            format!("PNGの生成に失敗しました: {}", msg)
        };
        format!("{}{}", render_notice(&notice), render_card_region(s))
    })
}
