//! Greedy layout search.
//!
//! Kana are placed one at a time in frequency order. Each placement takes the
//! free slot that minimises the predicted time of the pending trigrams
//! containing the kana; a trigram leaves the pending set once it can be typed.
//! No placement is ever revisited.

mod score;

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::corpus::TrigramEntry;
use crate::kana::{classify, is_modifier_kana, Modifier, PUNCTUATION};
use crate::layout::{
    validate_key_assignment, validate_layout, KeyPosition, KeySlot, Layout, LayoutValidationError,
    KEY_COUNT,
};
use crate::settings::settings;
use crate::timing::StrokeTimer;

pub use score::{score_layout, trigram_tail, LayoutScore, TailTiming};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Kana restricted to base slots; every other kana avoids them.
    pub base_kana_count: usize,
    /// Modifier keys, seeded before any kana is placed.
    pub pinned: [(Modifier, KeyPosition); 4],
    /// Kana moved to `early_kana_index` in the placement order.
    pub early_kana: Option<char>,
    pub early_kana_index: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        let cfg = &settings().search;
        SearchOptions {
            base_kana_count: cfg.base_kana_count,
            pinned: cfg.pinned.modifiers(),
            early_kana: Some(cfg.early_kana),
            early_kana_index: cfg.early_kana_index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{requested} base kana requested but only {available} base slots remain after the modifier keys")]
    BaseSlotsExhausted { requested: usize, available: usize },
    #[error("no slot left for {kana}")]
    NoCandidate { kana: char },
    #[error(transparent)]
    Validation(#[from] LayoutValidationError),
}

/// An empty slot a kana could take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlacementCandidate {
    pub position: KeyPosition,
    pub slot: KeySlot,
}

/// Empty slots where `kana` keeps its key legal, position-major then in slot
/// order. Kana already on the layout, and anything that is not a plain kana,
/// get none.
pub fn placement_candidates(layout: &Layout, kana: char) -> Vec<PlacementCandidate> {
    if classify(kana).is_none() || layout.locate(kana).is_some() {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (position, key) in layout.keys() {
        for slot in KeySlot::ALL {
            if key.get(slot).is_none() && validate_key_assignment(&key.with(slot, kana)).is_ok() {
                out.push(PlacementCandidate { position, slot });
            }
        }
    }
    out
}

/// Drop the pending trigrams containing `kana` that `layout` can now type.
/// Returns how many were dropped.
fn prune_typable(
    pending: &mut Vec<&TrigramEntry>,
    layout: &Layout,
    kana: char,
    timer: &dyn StrokeTimer,
) -> usize {
    let before = pending.len();
    pending.retain(|t| {
        !(t.trigram.contains(kana) && trigram_tail(layout, &t.trigram, timer).is_some())
    });
    before - pending.len()
}

/// The placement order: modifiers and repeats dropped, `early_kana` moved to
/// `early_kana_index` (clamped to the end).
fn placement_order(kana_order: &[char], options: &SearchOptions) -> Vec<char> {
    let mut seen = HashSet::new();
    let mut order: Vec<char> = kana_order
        .iter()
        .copied()
        .filter(|&k| !is_modifier_kana(k) && seen.insert(k))
        .collect();
    if let Some(early) = options.early_kana {
        if let Some(i) = order.iter().position(|&k| k == early) {
            order.remove(i);
            order.insert(options.early_kana_index.min(order.len()), early);
        }
    }
    order
}

/// Build a layout greedily from `kana_order` (most frequent first) and the
/// trigram corpus.
pub fn search_layout(
    kana_order: &[char],
    trigrams: &[TrigramEntry],
    timer: &dyn StrokeTimer,
    options: &SearchOptions,
) -> Result<Layout, SearchError> {
    let available = KEY_COUNT - Modifier::ALL.len();
    if options.base_kana_count > available {
        return Err(SearchError::BaseSlotsExhausted {
            requested: options.base_kana_count,
            available,
        });
    }

    let _span = debug_span!(
        "search_layout",
        kanas = kana_order.len(),
        trigrams = trigrams.len()
    )
    .entered();

    let mut layout = Layout::with_modifiers(options.pinned)?;
    let top: HashSet<char> = kana_order
        .iter()
        .copied()
        .filter(|k| !PUNCTUATION.contains(k) && !is_modifier_kana(*k))
        .take(options.base_kana_count)
        .collect();
    let order = placement_order(kana_order, options);
    let mut pending: Vec<&TrigramEntry> = trigrams.iter().collect();

    for kana in order {
        let in_top = top.contains(&kana);
        let candidates: Vec<PlacementCandidate> = placement_candidates(&layout, kana)
            .into_iter()
            .filter(|c| (c.slot == KeySlot::Base) == in_top)
            .collect();
        let Some(&first) = candidates.first() else {
            return Err(SearchError::NoCandidate { kana });
        };

        let related: Vec<&TrigramEntry> = pending
            .iter()
            .copied()
            .filter(|t| t.trigram.contains(kana))
            .collect();
        let mut best = first;
        let mut best_cost = f64::INFINITY;
        for candidate in &candidates {
            let mut trial = layout;
            trial.assign(candidate.position, candidate.slot, kana);
            let cost: f64 = related
                .iter()
                .filter_map(|t| {
                    trigram_tail(&trial, &t.trigram, timer)
                        .map(|tail| tail.millis * t.count as f64)
                })
                .sum();
            if cost < best_cost {
                best_cost = cost;
                best = *candidate;
            }
        }

        layout.assign(best.position, best.slot, kana);
        debug!(
            %kana,
            candidates = candidates.len(),
            position = best.position.index(),
            slot = %best.slot,
            cost = best_cost,
            "placed"
        );

        let typable = prune_typable(&mut pending, &layout, kana, timer);
        if typable > 0 {
            debug!(%kana, typable, remaining = pending.len(), "pruned");
        }
    }

    Ok(validate_layout(layout)?)
}
