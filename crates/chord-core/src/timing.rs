//! Stroke timing.
//!
//! The search and the scorer only see `StrokeTimer`: the predicted time to
//! complete the last keystroke of a three-keystroke window. `FingerTimer` is
//! a heuristic implementation driven by `[timing]` settings; measured models
//! plug in through the same trait or a closure.

use crate::layout::KeyPosition;
use crate::settings::{settings, TimingSettings};
use crate::stroke::Keystroke;

pub trait StrokeTimer {
    /// Milliseconds to type `window[2]` after `window[0]` and `window[1]`.
    fn trigram_millis(&self, window: [Keystroke; 3]) -> f64;
}

impl<F> StrokeTimer for F
where
    F: Fn([Keystroke; 3]) -> f64,
{
    fn trigram_millis(&self, window: [Keystroke; 3]) -> f64 {
        self(window)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hand {
    Left,
    Right,
}

/// Finger index 0..8 from the left pinky; the index fingers cover two columns.
fn finger(pos: KeyPosition) -> u8 {
    match pos.column() {
        0 => 0,
        1 => 1,
        2 => 2,
        3 | 4 => 3,
        5 | 6 => 4,
        7 => 5,
        8 => 6,
        _ => 7,
    }
}

fn hand(pos: KeyPosition) -> Hand {
    if pos.column() < 5 {
        Hand::Left
    } else {
        Hand::Right
    }
}

/// Heuristic timing from finger and hand movement.
#[derive(Debug, Clone)]
pub struct FingerTimer {
    cfg: TimingSettings,
}

impl Default for FingerTimer {
    fn default() -> Self {
        FingerTimer::new(settings().timing.clone())
    }
}

impl FingerTimer {
    pub fn new(cfg: TimingSettings) -> Self {
        FingerTimer { cfg }
    }

    fn transition(&self, prev: Keystroke, next: Keystroke) -> f64 {
        let cfg = &self.cfg;
        let mut ms = 0.0;
        if prev.position == next.position {
            ms += cfg.same_key_ms;
        } else if finger(prev.position) == finger(next.position) {
            let rows = prev.position.row().abs_diff(next.position.row()) as f64;
            ms += cfg.same_finger_ms + cfg.row_step_ms * rows;
        } else if hand(prev.position) != hand(next.position) {
            ms -= cfg.alternation_bonus_ms;
        }
        if prev.shift != next.shift {
            ms += cfg.shift_change_ms;
        }
        ms
    }
}

impl StrokeTimer for FingerTimer {
    fn trigram_millis(&self, [a, b, c]: [Keystroke; 3]) -> f64 {
        // The earlier transition still holds the hand in place, at half weight.
        let ms = self.cfg.press_ms + self.transition(b, c) + 0.5 * self.transition(a, b);
        ms.max(self.cfg.floor_ms)
    }
}
