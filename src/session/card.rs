//! Card rendering: HTML fragments for the page, workspace and card.
//!
//! Fragment nesting (outer → inner), each with the id HTMX targets:
//!
//! - `render_page` → `#interview-app`: header inputs plus the workspace.
//! - `render_workspace` → `#card-workspace`: draw/export buttons plus the
//!   card region. Returned by draw and reshuffle, since those change which
//!   buttons apply.
//! - `render_card_region` → inner HTML of `#interview-card-region`: the card
//!   itself (`#interview-card`, the rasterized element). Returned by name,
//!   image, lock and export routes so the name input keeps focus.
//!
//! In capture mode the card swaps textareas for static blocks and drops the
//! lock buttons so the exported PNG shows only content.

use crate::html::{escape, hx_vals};
use crate::questions::Source;
use crate::session::state::Session;

/// Requests that re-render the card carry every textarea with them, so text
/// still inside the answer debounce is stored before the swap discards it.
const INCLUDE_ANSWERS: &str = "#interview-card textarea";

/// Render the whole interview page fragment.
pub fn render_page(session: &Session) -> String {
    let mut html = String::with_capacity(8192);
    html.push_str(r#"<div id="interview-app" class="w-full max-w-5xl mx-auto">"#);
    html.push_str(
        r#"<h1 class="text-3xl font-bold text-center text-blue-600 mb-6">キャラインタビュー</h1>"#,
    );

    html.push_str(r#"<div class="flex flex-col md:flex-row gap-4 mb-6">"#);
    // FileReader hands the data URI to the image route; cancelling the
    // picker sends nothing.
    html.push_str(
        r#"<input type="file" accept="image/*" aria-label="キャラ画像" class="flex-1 text-sm text-gray-500 file:mr-4 file:py-2 file:px-4 file:rounded-full file:border-0 file:text-sm file:font-semibold file:bg-blue-50 file:text-blue-700 hover:file:bg-blue-100" onchange="(function(input) { var f = input.files[0]; if (!f) return; var r = new FileReader(); r.onloadend = function() { htmx.ajax('POST', '/api/card/image', {values: {image: r.result}, target: '#interview-card-region', swap: 'innerHTML'}); }; r.readAsDataURL(f); })(this)">"#,
    );
    html.push_str(&format!(
        r##"<input type="text" name="name" value="{}" placeholder="キャラ名を入力" aria-label="キャラ名" hx-post="/api/card/name" hx-trigger="input changed delay:200ms" hx-target="#interview-card-region" hx-swap="innerHTML" class="flex-1 px-4 py-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-400">"##,
        escape(&session.character.name)
    ));
    html.push_str("</div>");

    html.push_str(r#"<div id="card-workspace">"#);
    html.push_str(&render_workspace(session));
    html.push_str("</div>");

    html.push_str("</div>");
    html
}

fn draw_button(source: Source, label: &str, color: &str) -> String {
    format!(
        r##"<button type="button" hx-post="/api/card/draw" hx-vals="{vals}" hx-target="#card-workspace" hx-swap="innerHTML" class="flex-1 bg-{color}-500 hover:bg-{color}-600 text-white font-semibold py-2 rounded-lg shadow">{label}</button>"##,
        vals = hx_vals("source", source.as_str()),
        color = color,
        label = label,
    )
}

/// Button row plus the card region.
pub fn render_workspace(session: &Session) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(r#"<div class="flex flex-col md:flex-row gap-2 mb-6">"#);
    html.push_str(&draw_button(Source::All, "ランダム6問（全体）", "blue"));
    html.push_str(&draw_button(Source::Curated, "厳選6問（上位50）", "purple"));

    if session.has_selection() {
        if session.config.locks_enabled {
            html.push_str(&format!(
                r##"<button type="button" hx-post="/api/card/reshuffle" hx-vals="{}" hx-include="{}" hx-target="#card-workspace" hx-swap="innerHTML" class="flex-1 bg-amber-500 hover:bg-amber-600 text-white font-semibold py-2 rounded-lg shadow">ロック以外を入れ替え</button>"##,
                hx_vals("source", session.last_source.as_str()),
                INCLUDE_ANSWERS
            ));
        }
        html.push_str(&format!(
            r##"<button type="button" hx-post="/api/card/export" hx-include="{}" hx-target="#interview-card-region" hx-swap="innerHTML" class="flex-1 bg-green-500 hover:bg-green-600 text-white font-semibold py-2 rounded-lg shadow">PNG出力</button>"##,
            INCLUDE_ANSWERS
        ));
    }
    html.push_str("</div>");

    html.push_str(r#"<div id="interview-card-region">"#);
    html.push_str(&render_card_region(session));
    html.push_str("</div>");
    html
}

/// The card, or nothing before the first draw.
pub fn render_card_region(session: &Session) -> String {
    if !session.has_selection() {
        return String::new();
    }
    let capture = session.capture_mode();
    let mut html = String::with_capacity(4096);

    html.push_str(&format!(
        r#"<div id="interview-card" data-capture="{}" class="bg-white rounded-3xl shadow-2xl p-6 flex flex-row gap-6">"#,
        capture
    ));

    // Left column: portrait, name, first two questions
    html.push_str(r#"<div class="flex-1 flex flex-col gap-4 items-center">"#);
    match &session.character.image {
        Some(img) => html.push_str(&format!(
            r#"<img src="{}" alt="キャラ画像" class="w-48 h-48 rounded-xl shadow-md object-contain bg-gray-100">"#,
            escape(img.data_uri())
        )),
        None => html.push_str(
            r#"<div class="w-48 h-48 rounded-xl bg-gray-200 flex items-center justify-center text-gray-500">No Image</div>"#,
        ),
    }
    if !session.character.name.is_empty() {
        html.push_str(&format!(
            r#"<p class="text-2xl font-bold text-blue-600 text-center">{}</p>"#,
            escape(&session.character.name)
        ));
    }
    for (i, q) in session.left_questions().iter().enumerate() {
        html.push_str(&render_question(session, i, q, capture));
    }
    html.push_str("</div>");

    // Right column: remaining four
    html.push_str(r#"<div class="flex-1 flex flex-col gap-4">"#);
    let offset = session.left_questions().len();
    for (i, q) in session.right_questions().iter().enumerate() {
        html.push_str(&render_question(session, offset + i, q, capture));
    }
    html.push_str("</div>");

    html.push_str("</div>");
    html
}

fn render_question(session: &Session, slot: usize, question: &str, capture: bool) -> String {
    let locked = session.is_locked(question);
    let answer = escape(session.answer(question));
    let border = if locked { "border-amber-400" } else { "border-gray-200" };

    let mut html = String::with_capacity(1024);
    html.push_str(&format!(
        r#"<div class="bg-gray-50 p-3 rounded-lg border {} w-full" data-slot="{}">"#,
        border, slot
    ));
    html.push_str(r#"<div class="flex items-start justify-between gap-2 mb-2">"#);
    html.push_str(&format!(
        r#"<p class="font-semibold text-gray-800">{}</p>"#,
        escape(question)
    ));
    if session.config.locks_enabled && !capture {
        let (icon, label) = if locked {
            ("&#x1F512;", "ロック解除")
        } else {
            ("&#x1F513;", "ロック")
        };
        html.push_str(&format!(
            r##"<button type="button" class="lock-toggle shrink-0 text-lg" aria-pressed="{}" aria-label="{}" hx-post="/api/card/lock" hx-vals="{}" hx-include="{}" hx-target="#interview-card-region" hx-swap="innerHTML">{}</button>"##,
            locked,
            label,
            hx_vals("q", question),
            INCLUDE_ANSWERS,
            icon
        ));
    }
    html.push_str("</div>");

    if capture {
        html.push_str(&format!(
            r#"<div class="w-full p-2 border border-gray-300 rounded-lg whitespace-pre-wrap break-words">{}</div>"#,
            answer
        ));
    } else {
        // The parser drops one newline straight after `<textarea>`; the
        // extra one keeps an answer's own leading newline.
        html.push_str(&format!(
            r#"<textarea name="answer_{}" rows="2" placeholder="ここに回答を入力" hx-post="/api/card/answer" hx-trigger="input changed delay:300ms, change" hx-vals="{}" hx-swap="none" class="w-full p-2 border border-gray-300 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-400">
{}</textarea>"#,
            slot,
            hx_vals("q", question),
            answer
        ));
    }

    html.push_str("</div>");
    html
}

/// Non-fatal notification shown above the card.
pub fn render_notice(message: &str) -> String {
    format!(
        r#"<div role="alert" class="mb-4 px-4 py-2 rounded-lg bg-red-50 border border-red-200"><span class="text-red-600">{}</span></div>"#,
        escape(message)
    )
}
