//! Session state and its transitions.
//!
//! One [`Session`] holds everything a card needs: the active pool, config,
//! character identity, selection, lock and answer stores, and in-flight
//! exports. The route layer reaches it through `thread_local!` + `RefCell`,
//! which is sound because the WASM worker is single-threaded; each request
//! runs to completion before the next one starts.

use std::cell::RefCell;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::CardConfig;
use crate::error::Result;
use crate::questions::{QuestionPool, Source};
use crate::session::export::{self, ExportQueue, ExportedImage, PendingExport};
use crate::session::identity::Character;
use crate::session::selection;
use crate::session::store::{AnswerStore, LockStore};

/// Slots rendered in the left column, under the portrait.
pub const LEFT_COLUMN_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct Session {
    pub pool: QuestionPool,
    pub config: CardConfig,
    pub character: Character,
    pub selected: Vec<String>,
    pub answers: AnswerStore,
    pub locks: LockStore,
    pub exports: ExportQueue,
    /// Source of the latest draw; partial reshuffles reuse it.
    pub last_source: Source,
    rng: StdRng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic session for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            pool: QuestionPool::builtin(),
            config: CardConfig::default(),
            character: Character::default(),
            selected: Vec::new(),
            answers: AnswerStore::default(),
            locks: LockStore::default(),
            exports: ExportQueue::default(),
            last_source: Source::All,
            rng,
        }
    }

    pub fn has_selection(&self) -> bool {
        !self.selected.is_empty()
    }

    pub fn is_selected(&self, question: &str) -> bool {
        self.selected.iter().any(|q| q == question)
    }

    /// Lock flag as seen by rendering and reshuffles: always false when the
    /// lock feature is off.
    pub fn is_locked(&self, question: &str) -> bool {
        self.config.locks_enabled && self.locks.is_locked(question)
    }

    pub fn answer(&self, question: &str) -> &str {
        self.answers.get(question)
    }

    pub fn capture_mode(&self) -> bool {
        self.exports.is_capturing()
    }

    pub fn left_questions(&self) -> &[String] {
        &self.selected[..self.selected.len().min(LEFT_COLUMN_LEN)]
    }

    pub fn right_questions(&self) -> &[String] {
        &self.selected[self.selected.len().min(LEFT_COLUMN_LEN)..]
    }

    /// Full reshuffle: new card from `source`, answers and locks discarded.
    pub fn draw(&mut self, source: Source) {
        self.selected = selection::full_reshuffle(self.pool.source(source), &mut self.rng);
        self.answers.clear();
        self.locks.clear();
        self.last_source = source;
        log::debug!("draw source={} selected={:?}", source.as_str(), self.selected);
    }

    /// Partial reshuffle: replace unlocked slots from `source`, answers kept.
    pub fn reshuffle_unlocked(&mut self, source: Source) {
        let locks_enabled = self.config.locks_enabled;
        let locks = &self.locks;
        self.selected = selection::reshuffle(
            self.pool.source(source),
            &self.selected,
            |q| locks_enabled && locks.is_locked(q),
            &mut self.rng,
        );
        self.last_source = source;
        log::debug!("reshuffle source={} selected={:?}", source.as_str(), self.selected);
    }

    /// Flip the lock on a question currently on the card. Returns the new
    /// flag, or `None` when the question is not selected or locks are off.
    pub fn toggle_lock(&mut self, question: &str) -> Option<bool> {
        if !self.config.locks_enabled || !self.is_selected(question) {
            log::warn!("ignoring lock toggle for {:?}", question);
            return None;
        }
        Some(self.locks.toggle(question))
    }

    /// Store an answer for a question on the card. Returns false (and stores
    /// nothing) for questions not on the card.
    pub fn set_answer(&mut self, question: &str, answer: &str) -> bool {
        if !self.is_selected(question) {
            log::warn!("ignoring answer for unselected question {:?}", question);
            return false;
        }
        self.answers.set(question, answer);
        true
    }

    /// Store answers keyed by card slot, as the card's textareas post them.
    /// Slots past the end of the card are skipped. Returns how many were stored.
    pub fn apply_slot_answers<'a, I>(&mut self, answers: I) -> usize
    where
        I: IntoIterator<Item = (usize, &'a str)>,
    {
        let mut stored = 0;
        for (slot, text) in answers {
            let Some(question) = self.selected.get(slot).cloned() else {
                log::warn!("ignoring answer for empty slot {}", slot);
                continue;
            };
            self.answers.set(&question, text);
            stored += 1;
        }
        stored
    }

    pub fn set_name(&mut self, name: &str) {
        self.character.name = name.to_string();
    }

    /// Returns whether the image changed. Errors leave the previous image.
    pub fn set_image(&mut self, data_uri: &str) -> Result<bool> {
        let changed = self.character.set_image(data_uri)?;
        if let Some(img) = self.character.image.as_ref().filter(|_| changed) {
            log::debug!("image set mime={} bytes={}", img.mime(), img.byte_len());
        }
        Ok(changed)
    }

    pub fn apply_config(&mut self, config: CardConfig) {
        log::debug!("config applied: {:?}", config);
        self.config = config;
    }

    /// Swap the question pool. The current card stays as-is until the next
    /// draw or reshuffle.
    pub fn replace_pool(&mut self, pool: QuestionPool) {
        log::debug!("question pool replaced: {} entries", pool.len());
        self.pool = pool;
    }

    /// Start an export. `None` when there is no card to capture.
    pub fn begin_export(&mut self) -> Option<PendingExport> {
        if !self.has_selection() {
            return None;
        }
        let filename = export::export_filename(&self.character.name, &self.config.fallback_filename);
        let job = self.exports.begin(filename);
        log::info!("export #{} started: {}", job.ticket, job.filename);
        Some(job)
    }

    /// Finish an export with the rasterizer's PNG. The ticket is consumed
    /// even if the PNG turns out to be invalid.
    pub fn complete_export(&mut self, ticket: u32, png_data_url: &str) -> Result<ExportedImage> {
        let job = self.exports.take(ticket)?;
        let (width, height) = export::png_dimensions(png_data_url)?;
        log::info!("export #{} done: {} {}x{}", job.ticket, job.filename, width, height);
        Ok(ExportedImage {
            filename: job.filename,
            data_url: png_data_url.trim().to_string(),
            width,
            height,
        })
    }

    /// Abandon an export after a rasterizer failure.
    pub fn fail_export(&mut self, ticket: u32) -> Result<PendingExport> {
        let job = self.exports.take(ticket)?;
        log::warn!("export #{} failed: {}", job.ticket, job.filename);
        Ok(job)
    }
}

thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::new());
}

/// Execute a closure with read access to the session.
pub fn with_session<F, R>(f: F) -> R
where
    F: FnOnce(&Session) -> R,
{
    SESSION.with(|s| f(&s.borrow()))
}

/// Execute a closure with mutable access to the session.
pub fn with_session_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut Session) -> R,
{
    SESSION.with(|s| f(&mut s.borrow_mut()))
}

/// Replace the entire session.
pub fn replace_session(session: Session) {
    SESSION.with(|s| {
        *s.borrow_mut() = session;
    });
}

/// Fresh session with the built-in pool and default config.
pub fn reset_session() {
    replace_session(Session::new());
}
