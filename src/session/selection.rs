//! Question selection: full draws and lock-aware partial reshuffles.
//!
//! Both functions are pure over their inputs and take the RNG explicitly, so
//! tests can pin a seed. The session layer decides which to call and what
//! side effects (clearing answers/locks) go with it.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

/// Number of questions on a card.
pub const SELECTION_SIZE: usize = 6;

/// Candidates in pool order with repeats and `exclude`d entries removed.
fn distinct_candidates(candidates: &[String], exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(candidates.len());
    candidates
        .iter()
        .filter(|q| !exclude.contains(q.as_str()) && seen.insert(q.as_str()))
        .cloned()
        .collect()
}

/// Split slot indices into (locked, unlocked), both in slot order.
pub fn partition_slots<F>(selection: &[String], is_locked: F) -> (Vec<usize>, Vec<usize>)
where
    F: Fn(&str) -> bool,
{
    (0..selection.len()).partition(|&i| is_locked(&selection[i]))
}

/// Discard the previous selection and draw up to six distinct questions.
pub fn full_reshuffle<R: Rng + ?Sized>(candidates: &[String], rng: &mut R) -> Vec<String> {
    let mut shuffled = distinct_candidates(candidates, &HashSet::new());
    shuffled.shuffle(rng);
    shuffled.truncate(SELECTION_SIZE);
    shuffled
}

/// Replace every unlocked slot of `current` with a question not already on
/// the card. Locked slots keep their question and index.
///
/// When fewer fresh candidates exist than unlocked slots, the trailing
/// unlocked slots keep their stale question. An empty `current` is a first
/// draw and behaves like [`full_reshuffle`].
pub fn reshuffle<R, F>(candidates: &[String], current: &[String], is_locked: F, rng: &mut R) -> Vec<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    if current.is_empty() {
        return full_reshuffle(candidates, rng);
    }

    let mut next: Vec<String> = current.iter().take(SELECTION_SIZE).cloned().collect();

    let on_card: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut available = distinct_candidates(candidates, &on_card);
    available.shuffle(rng);
    let mut fresh = available.into_iter();

    let (_, unlocked) = partition_slots(&next, &is_locked);
    for idx in unlocked {
        match fresh.next() {
            Some(q) => next[idx] = q,
            None => break,
        }
    }

    // Short card (small pool at first draw): top up from what's left.
    while next.len() < SELECTION_SIZE {
        match fresh.next() {
            Some(q) => next.push(q),
            None => break,
        }
    }

    next
}
