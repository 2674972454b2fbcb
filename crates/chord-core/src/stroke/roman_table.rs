//! IME roman-table export.
//!
//! Each row maps an input string to either a final `output` or a `nextInput`
//! that stays in the buffer and may combine with the next keystroke. Two-stroke
//! rows are keyed by the pending kana followed by the second key's symbol,
//! which is how the IME sees the buffer after the first press.

use serde::{Deserialize, Serialize};

use super::{first_stroke, resolve_pair, FirstStroke, Keystroke};
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomanRow {
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(
        rename = "nextInput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_input: Option<String>,
}

impl RomanRow {
    fn output(input: String, output: impl Into<String>) -> RomanRow {
        RomanRow {
            input,
            output: Some(output.into()),
            next_input: None,
        }
    }

    fn next_input(input: String, kana: char) -> RomanRow {
        RomanRow {
            input,
            output: None,
            next_input: Some(kana.to_string()),
        }
    }
}

/// The full roman table of `layout`: unshifted single strokes, shifted single
/// strokes, then every composing two-stroke chain.
pub fn export_roman_table(layout: &Layout) -> Vec<RomanRow> {
    let mut rows = Vec::new();

    for stroke in Keystroke::all() {
        let Some(first) = first_stroke(layout, stroke) else {
            continue;
        };
        let input = stroke.symbol().to_string();
        let row = match first {
            FirstStroke::Terminal(kana) => RomanRow::output(input, kana),
            // A shifted kana that nothing composes with is final on its own.
            FirstStroke::Pending(kana) if stroke.shift && !continues(layout, stroke) => {
                RomanRow::output(input, kana)
            }
            FirstStroke::Pending(kana) => RomanRow::next_input(input, kana),
        };
        rows.push(row);
    }

    for first in Keystroke::all() {
        let Some(FirstStroke::Pending(pending)) = first_stroke(layout, first) else {
            continue;
        };
        for second in Keystroke::all() {
            if let Some(out) = resolve_pair(layout, first, second) {
                rows.push(RomanRow::output(
                    format!("{pending}{}", second.symbol()),
                    out,
                ));
            }
        }
    }
    rows
}

fn continues(layout: &Layout, first: Keystroke) -> bool {
    Keystroke::all().any(|second| resolve_pair(layout, first, second).is_some())
}

/// The roman-table input that types `strokes`: a single key symbol, or the
/// pending kana followed by the second key's symbol.
pub fn roman_input(layout: &Layout, strokes: &[Keystroke]) -> Option<String> {
    match *strokes {
        [single] => Some(single.symbol().to_string()),
        [first, second] => {
            let pending = first_stroke(layout, first)?.kana();
            Some(format!("{pending}{}", second.symbol()))
        }
        _ => None,
    }
}

/// Tab-separated `input<TAB>output<TAB>nextInput` lines, one per row.
pub fn layout_to_roman_table_string(layout: &Layout) -> String {
    export_roman_table(layout)
        .into_iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\n",
                row.input,
                row.output.unwrap_or_default(),
                row.next_input.unwrap_or_default()
            )
        })
        .collect()
}
