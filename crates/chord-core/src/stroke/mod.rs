//! Kana-to-keystroke encoding.
//!
//! A kana unit is typed as one or two keystrokes, built from the first of the
//! unit's compositions (in preference order) that the layout can hold.

mod resolve;
mod roman_table;


use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::kana::{compositions, split_units, Composition, Modifier};
use crate::layout::{KeyPosition, KeySlot, Layout};

pub(crate) use resolve::{first_stroke, resolve_pair, FirstStroke};
pub use roman_table::{export_roman_table, layout_to_roman_table_string, roman_input, RomanRow};

/// One key press, with or without shift held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Keystroke {
    pub position: KeyPosition,
    pub shift: bool,
}

impl Keystroke {
    pub fn plain(position: KeyPosition) -> Keystroke {
        Keystroke {
            position,
            shift: false,
        }
    }

    pub fn shifted(position: KeyPosition) -> Keystroke {
        Keystroke {
            position,
            shift: true,
        }
    }

    /// The symbol the key emits, shifted when shift is held.
    pub fn symbol(self) -> char {
        if self.shift {
            self.position.shifted_symbol()
        } else {
            self.position.symbol()
        }
    }

    /// Every keystroke of the board: 30 unshifted, then 30 shifted.
    pub fn all() -> impl Iterator<Item = Keystroke> {
        KeyPosition::all()
            .map(Keystroke::plain)
            .chain(KeyPosition::all().map(Keystroke::shifted))
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A keystroke labelled with the index of the kana unit it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaggedStroke {
    pub stroke: Keystroke,
    pub unit: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrokeConversionError {
    #[error("{0:?} is not a kana unit")]
    UnknownKana(String),
    #[error("{kana:?} needs {missing}, which is not on the layout")]
    Missing { kana: String, missing: char },
}

/// Keystrokes producing `kana` (one unit) on `layout`. The first composition
/// whose kana are all on the layout wins.
pub fn strokes_for_kana(
    layout: &Layout,
    kana: &str,
) -> Result<Vec<Keystroke>, StrokeConversionError> {
    let comps = compositions(kana);
    let mut first_missing = None;
    for comp in &comps {
        match chain_for(layout, comp) {
            Ok(chain) => return Ok(chain),
            Err(missing) => {
                first_missing.get_or_insert(missing);
            }
        }
    }

    debug!(kana, ?comps, "unit not on layout");
    match first_missing {
        Some(missing) => Err(StrokeConversionError::Missing {
            kana: kana.to_string(),
            missing,
        }),
        None => Err(StrokeConversionError::UnknownKana(kana.to_string())),
    }
}

/// Segment `text` into units, encode each, and concatenate the chains.
pub fn text_to_strokes(
    layout: &Layout,
    text: &str,
) -> Result<Vec<TaggedStroke>, StrokeConversionError> {
    let mut out = Vec::new();
    for (unit, kana) in split_units(text).into_iter().enumerate() {
        for stroke in strokes_for_kana(layout, kana)? {
            out.push(TaggedStroke { stroke, unit });
        }
    }
    Ok(out)
}

/// The chain typing `comp`, or the first kana it needs that the layout lacks.
///
/// Source keys are pressed unshifted whatever slot the source sits in; only a
/// foreign-sound consonant off the base slot is pressed with shift.
fn chain_for(layout: &Layout, comp: &Composition) -> Result<Vec<Keystroke>, char> {
    let find = |kana: char| layout.locate(kana).ok_or(kana);
    let modifier_key = |m: Modifier| {
        layout
            .modifier_position(m)
            .map(Keystroke::plain)
            .ok_or(m.as_char())
    };
    let source_then = |source: char, m: Modifier| -> Result<Vec<Keystroke>, char> {
        let (pos, _) = find(source)?;
        Ok(vec![Keystroke::plain(pos), modifier_key(m)?])
    };

    match *comp {
        Composition::Plain(kana) => {
            let (pos, slot) = find(kana)?;
            Ok(match slot {
                KeySlot::Base => vec![Keystroke::plain(pos)],
                KeySlot::DirectShift => vec![Keystroke::shifted(pos)],
                KeySlot::ShiftA => vec![Keystroke::plain(pos), modifier_key(Modifier::Yu)?],
                KeySlot::ShiftB => vec![Keystroke::plain(pos), modifier_key(Modifier::Yo)?],
            })
        }
        Composition::SemiVoiced { source, modifier }
        | Composition::Contracted {
            base: source,
            small: modifier,
        } => source_then(source, modifier),
        Composition::Voiced { source } => source_then(source, Modifier::Dakuten),
        Composition::VoicedByContraction { base } => source_then(base, Modifier::Ya),
        Composition::Foreign { consonant, vowel } => {
            let (pos, slot) = find(consonant)?;
            let (vowel_pos, _) = find(vowel)?;
            let first = if slot == KeySlot::Base {
                Keystroke::plain(pos)
            } else {
                Keystroke::shifted(pos)
            };
            Ok(vec![first, Keystroke::shifted(vowel_pos)])
        }
    }
}
