use serde::Serialize;
use tracing::{debug, debug_span};

use crate::corpus::TrigramEntry;
use crate::layout::Layout;
use crate::stroke::text_to_strokes;
use crate::timing::StrokeTimer;

/// Time spent typing the final unit of a trigram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailTiming {
    pub millis: f64,
    pub strokes: usize,
}

/// Timing of the last unit of `trigram`, or `None` while some unit has no
/// chain on `layout` (or there is no third unit to time).
///
/// Every keystroke of the third unit is timed with the two keystrokes before
/// it, which may belong to earlier units.
pub fn trigram_tail(layout: &Layout, trigram: &str, timer: &dyn StrokeTimer) -> Option<TailTiming> {
    let strokes = text_to_strokes(layout, trigram).ok()?;
    let mut tail = TailTiming {
        millis: 0.0,
        strokes: 0,
    };
    for window in strokes.windows(3) {
        if window[2].unit < 2 {
            continue;
        }
        tail.millis += timer.trigram_millis([window[0].stroke, window[1].stroke, window[2].stroke]);
        tail.strokes += 1;
    }
    (tail.strokes > 0).then_some(tail)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutScore {
    /// Typed trigram occurrences per minute.
    pub score: u64,
    /// Tail keystrokes per minute, two decimals.
    pub strokes_per_minute: f64,
    /// Total tail time, whole seconds.
    pub total_seconds: u64,
    /// Occurrences of the typable trigrams.
    pub total_count: u64,
}

/// Score `layout` over the typable trigrams; untypable ones are ignored.
pub fn score_layout(
    layout: &Layout,
    trigrams: &[TrigramEntry],
    timer: &dyn StrokeTimer,
) -> LayoutScore {
    let _span = debug_span!("score_layout", trigrams = trigrams.len()).entered();

    let mut total_ms = 0.0;
    let mut total_count = 0u64;
    let mut total_strokes = 0u64;
    for entry in trigrams {
        let Some(tail) = trigram_tail(layout, &entry.trigram, timer) else {
            continue;
        };
        total_count += entry.count;
        total_ms += tail.millis * entry.count as f64;
        total_strokes += tail.strokes as u64 * entry.count;
    }

    let seconds = total_ms / 1000.0;
    let (score, strokes_per_minute) = if seconds > 0.0 {
        (
            (total_count as f64 / seconds * 60_000.0).round() as u64,
            (total_strokes as f64 * 60.0 / seconds * 100.0).round() / 100.0,
        )
    } else {
        (0, 0.0)
    };

    debug!(score, total_count, seconds, "layout scored");
    LayoutScore {
        score,
        strokes_per_minute,
        total_seconds: seconds.round() as u64,
        total_count,
    }
}
