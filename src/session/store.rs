//! Per-question lock flags and answers, keyed by question text.
//!
//! Entries are created lazily and never compacted: a question that leaves
//! the card keeps its entry, which is simply not looked up until the question
//! is drawn again.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LockStore {
    flags: HashMap<String, bool>,
}

impl LockStore {
    pub fn is_locked(&self, question: &str) -> bool {
        self.flags.get(question).copied().unwrap_or(false)
    }

    /// Flip the flag for exactly this question. Returns the new value.
    pub fn toggle(&mut self, question: &str) -> bool {
        let flag = self.flags.entry(question.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn clear(&mut self) {
        self.flags.clear();
    }

    /// Number of retained entries, orphans included.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerStore {
    answers: HashMap<String, String>,
}

impl AnswerStore {
    /// Answer text for a question, empty if never answered.
    pub fn get(&self, question: &str) -> &str {
        self.answers.get(question).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, question: &str, answer: &str) {
        self.answers.insert(question.to_string(), answer.to_string());
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locks_default_unlocked() {
        let locks = LockStore::default();
        assert!(!locks.is_locked("Q1"));
        assert!(locks.is_empty());
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut locks = LockStore::default();
        assert!(locks.toggle("Q1"));
        assert!(locks.is_locked("Q1"));
        assert!(!locks.toggle("Q1"));
        assert!(!locks.is_locked("Q1"));
        // The entry stays around even when unlocked.
        assert_eq!(locks.len(), 1);
    }

    #[test]
    fn toggle_is_per_exact_text() {
        let mut locks = LockStore::default();
        locks.toggle("Q1");
        assert!(!locks.is_locked("Q1 "));
        assert!(!locks.is_locked("q1"));
    }

    #[test]
    fn answers_default_empty_and_overwrite() {
        let mut answers = AnswerStore::default();
        assert_eq!(answers.get("Q1"), "");
        answers.set("Q1", "first");
        answers.set("Q1", "line one\nline two");
        assert_eq!(answers.get("Q1"), "line one\nline two");
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let mut answers = AnswerStore::default();
        answers.set("Q1", "a");
        answers.clear();
        assert!(answers.is_empty());

        let mut locks = LockStore::default();
        locks.toggle("Q1");
        locks.clear();
        assert!(!locks.is_locked("Q1"));
    }
}
