use std::cell::Cell;

use super::*;
use crate::kana::{plain_kanas, SMALL_VOWELS};
use crate::layout::fixtures::{EXAMPLE_LAYOUT, TOP26_KANAS};
use crate::stroke::Keystroke;

fn pos(i: u8) -> KeyPosition {
    KeyPosition::new(i).unwrap()
}

fn options() -> SearchOptions {
    SearchOptions {
        base_kana_count: 26,
        pinned: [
            (Modifier::Ya, pos(11)),
            (Modifier::Yu, pos(12)),
            (Modifier::Yo, pos(17)),
            (Modifier::Dakuten, pos(18)),
        ],
        early_kana: Some('ひ'),
        early_kana_index: 41,
    }
}

fn entry(trigram: &str, count: u64) -> TrigramEntry {
    TrigramEntry {
        trigram: trigram.to_string(),
        count,
    }
}

fn flat(_: [Keystroke; 3]) -> f64 {
    100.0
}

fn order_with(extra: &[char]) -> Vec<char> {
    TOP26_KANAS.iter().chain(extra).copied().collect()
}

#[test]
fn default_options_follow_settings() {
    assert_eq!(SearchOptions::default(), options());
}

#[test]
fn rejects_more_base_kana_than_slots() {
    let opts = SearchOptions {
        base_kana_count: 27,
        ..options()
    };
    let err = search_layout(&TOP26_KANAS, &[], &flat, &opts).unwrap_err();
    assert_eq!(
        err,
        SearchError::BaseSlotsExhausted {
            requested: 27,
            available: 26
        }
    );
}

#[test]
fn candidates_respect_key_rules() {
    let layout = Layout::with_modifiers(options().pinned).unwrap();
    // Contraction kana: 26 free base slots and every direct-shift slot.
    assert_eq!(placement_candidates(&layout, 'ち').len(), 26 + 30);
    // Ordinary kana also fit both planes of non-modifier keys.
    assert_eq!(placement_candidates(&layout, 'よ').len(), 26 + 52 + 30);
    assert!(placement_candidates(&layout, 'ゃ').is_empty());
    assert!(placement_candidates(&layout, 'が').is_empty());
    assert!(placement_candidates(&EXAMPLE_LAYOUT, 'か').is_empty());
}

#[test]
fn candidates_are_position_major() {
    let mut layout = Layout::with_modifiers(options().pinned).unwrap();
    layout.assign(pos(0), KeySlot::Base, 'し');
    let first: Vec<PlacementCandidate> =
        placement_candidates(&layout, 'よ').into_iter().take(3).collect();
    // し holds key 0's planes shut.
    assert_eq!(
        first,
        vec![
            PlacementCandidate {
                position: pos(0),
                slot: KeySlot::DirectShift
            },
            PlacementCandidate {
                position: pos(1),
                slot: KeySlot::Base
            },
            PlacementCandidate {
                position: pos(1),
                slot: KeySlot::ShiftA
            },
        ]
    );
}

#[test]
fn placement_order_moves_early_kana() {
    let mut opts = options();
    assert_eq!(
        placement_order(&['あ', 'ひ', 'ゃ', 'い', 'あ', 'う'], &opts),
        vec!['あ', 'い', 'う', 'ひ']
    );
    opts.early_kana_index = 1;
    assert_eq!(
        placement_order(&['あ', 'い', 'う', 'ひ'], &opts),
        vec!['あ', 'ひ', 'い', 'う']
    );
    opts.early_kana = None;
    assert_eq!(placement_order(&['ひ', 'あ'], &opts), vec!['ひ', 'あ']);
}

#[test]
fn ties_keep_first_candidate() {
    let layout = search_layout(&order_with(&['よ', 'ち']), &[], &flat, &options()).unwrap();
    let bases: Vec<char> = layout.keys().filter_map(|(_, k)| k.base).collect();
    assert_eq!(bases[0], 'い');
    assert_eq!(layout.get(pos(10), KeySlot::Base), Some('な'));
    assert_eq!(layout.get(pos(29), KeySlot::Base), Some('あ'));
    assert_eq!(layout.locate('よ'), Some((pos(0), KeySlot::ShiftA)));
    // Key 0 now has a plane, so ち skips to the next key's direct shift.
    assert_eq!(layout.locate('ち'), Some((pos(1), KeySlot::DirectShift)));
}

#[test]
fn cheapest_candidate_wins() {
    // Keys further right are cheaper to finish on.
    let timer = |w: [Keystroke; 3]| 100.0 - w[2].position.index() as f64;
    let trigrams = [entry("いうよ", 1)];
    let layout = search_layout(&order_with(&['よ']), &trigrams, &timer, &options()).unwrap();
    assert_eq!(layout.locate('い'), Some((pos(0), KeySlot::Base)));
    assert_eq!(layout.locate('う'), Some((pos(1), KeySlot::Base)));
    assert_eq!(layout.locate('よ'), Some((pos(29), KeySlot::DirectShift)));
}

#[test]
fn only_trigrams_containing_the_kana_are_costed() {
    // が is typed from か, but the trigram never names か.
    let timer = |w: [Keystroke; 3]| 100.0 - w[2].position.index() as f64;
    let with = search_layout(&TOP26_KANAS, &[entry("いうが", 1)], &timer, &options()).unwrap();
    let without = search_layout(&TOP26_KANAS, &[], &timer, &options()).unwrap();
    assert_eq!(with.locate('か'), Some((pos(3), KeySlot::Base)));
    assert_eq!(with, without);
}

#[test]
fn typable_trigram_is_timed_for_one_placement_then_dropped() {
    let calls = Cell::new(0);
    let timer = |_: [Keystroke; 3]| {
        calls.set(calls.get() + 1);
        100.0
    };
    search_layout(&TOP26_KANAS, &[entry("いうか", 1)], &timer, &options()).unwrap();
    // い and う leave it untypable, ん is unrelated. か tries 23 free base
    // slots with one tail stroke each, and the commit is timed once more.
    assert_eq!(calls.get(), 24);
}

#[test]
fn pruning_drops_typable_trigrams_with_the_kana() {
    let trigrams = [entry("いうか", 1), entry("いうが", 1), entry("かぁか", 1)];
    let mut pending: Vec<&TrigramEntry> = trigrams.iter().collect();
    let dropped = prune_typable(&mut pending, &EXAMPLE_LAYOUT, 'か', &flat);
    assert_eq!(dropped, 1);
    let left: Vec<&str> = pending.iter().map(|t| t.trigram.as_str()).collect();
    // いうが is typable but does not contain か; かぁか has no ぁ yet.
    assert_eq!(left, vec!["いうが", "かぁか"]);
}

#[test]
fn unplaceable_kana_is_fatal() {
    let err = search_layout(&order_with(&['が']), &[], &flat, &options()).unwrap_err();
    assert_eq!(err, SearchError::NoCandidate { kana: 'が' });
}

#[test]
fn short_order_fails_final_validation() {
    let err = search_layout(&TOP26_KANAS[..20], &[], &flat, &options()).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Validation(LayoutValidationError::EmptyBase(_))
    ));
}

#[test]
fn pinned_collision_is_reported() {
    let mut opts = options();
    opts.pinned[1].1 = pos(11);
    let err = search_layout(&TOP26_KANAS, &[], &flat, &opts).unwrap_err();
    assert!(matches!(
        err,
        SearchError::Validation(LayoutValidationError::SlotOccupied { kana: 'ゅ', .. })
    ));
}

#[test]
fn full_alphabet_places_every_kana() {
    let rest: Vec<char> = plain_kanas()
        .filter(|k| !TOP26_KANAS.contains(k) && !SMALL_VOWELS.contains(k))
        .collect();
    let order = order_with(&rest);
    let layout = search_layout(&order, &[], &flat, &options()).unwrap();
    for kana in order {
        assert!(layout.locate(kana).is_some(), "{kana} not placed");
    }
    for (modifier, position) in options().pinned {
        assert_eq!(layout.modifier_position(modifier), Some(position));
    }
}

#[test]
fn tail_times_only_the_last_unit() {
    let tail = trigram_tail(&EXAMPLE_LAYOUT, "かがや", &flat).unwrap();
    // か[i] が[i l] や[w k]: the two や strokes are timed.
    assert_eq!(
        tail,
        TailTiming {
            millis: 200.0,
            strokes: 2
        }
    );
    assert_eq!(trigram_tail(&EXAMPLE_LAYOUT, "かが", &flat), None);
    assert_eq!(trigram_tail(&EXAMPLE_LAYOUT, "かがぁ", &flat), None);
}

#[test]
fn score_counts_typable_trigrams() {
    let trigrams = [entry("いうか", 10), entry("がぁぁ", 5)];
    let score = score_layout(&EXAMPLE_LAYOUT, &trigrams, &flat);
    assert_eq!(
        score,
        LayoutScore {
            score: 600_000,
            strokes_per_minute: 600.0,
            total_seconds: 1,
            total_count: 10,
        }
    );
}

#[test]
fn score_is_zero_when_nothing_is_typable() {
    let score = score_layout(&EXAMPLE_LAYOUT, &[entry("ぁぁぁ", 3)], &flat);
    assert_eq!(score.score, 0);
    assert_eq!(score.strokes_per_minute, 0.0);
    assert_eq!(score.total_count, 0);
    assert_eq!(score_layout(&EXAMPLE_LAYOUT, &[], &flat).score, 0);
}
