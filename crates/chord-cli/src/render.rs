//! Text rendering of layouts and keystroke chains.

use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use chord_engine::layout::{KeyPosition, Layout};
use chord_engine::stroke::TaggedStroke;

const CELL_WIDTH: usize = 5;

fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

fn slot(kana: Option<char>) -> String {
    kana.map(String::from).unwrap_or_else(|| "・".to_string())
}

/// Three rows of ten keys. Each key shows its symbol, then base kana, then
/// shift-plane A and B, then the direct-shift kana.
pub fn render_layout(layout: &Layout) -> String {
    let mut out = String::new();
    let positions: Vec<KeyPosition> = KeyPosition::all().collect();
    for row in positions.chunks(10) {
        let mut lines = [String::new(), String::new(), String::new(), String::new()];
        for &pos in row {
            let key = layout.key(pos);
            lines[0].push_str(&pad(&pos.symbol().to_string(), CELL_WIDTH));
            lines[1].push_str(&pad(&slot(key.base), CELL_WIDTH));
            lines[2].push_str(&pad(
                &format!("{}{}", slot(key.shift_a), slot(key.shift_b)),
                CELL_WIDTH,
            ));
            lines[3].push_str(&pad(&slot(key.direct_shift), CELL_WIDTH));
        }
        for line in lines {
            let _ = writeln!(out, "{}", line.trim_end());
        }
        out.push('\n');
    }
    out
}

/// Keystroke symbols grouped by unit, e.g. `ps x r` for きゃっと.
pub fn render_strokes(strokes: &[TaggedStroke]) -> String {
    let mut out = String::new();
    let mut unit = None;
    for tagged in strokes {
        if unit.is_some() && unit != Some(tagged.unit) {
            out.push(' ');
        }
        unit = Some(tagged.unit);
        out.push(tagged.stroke.symbol());
    }
    out
}

#[cfg(test)]
mod tests {
    use chord_engine::layout::fixtures::EXAMPLE_LAYOUT;
    use chord_engine::stroke::text_to_strokes;

    use super::*;

    #[test]
    fn grid_aligns_wide_kana() {
        let text = render_layout(&EXAMPLE_LAYOUT);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3 * 5);
        assert!(lines[0].starts_with("q    w    e"));
        assert!(lines[1].starts_with("ま   す   て"));
        // す holds や in plane B only.
        assert!(lines[2].starts_with("・・ ・や ・ゆ"));
        assert_eq!(lines[4], "");
    }

    #[test]
    fn strokes_grouped_by_unit() {
        let strokes = text_to_strokes(&EXAMPLE_LAYOUT, "きゃっと").unwrap();
        assert_eq!(render_strokes(&strokes), "ps x r");
    }
}
