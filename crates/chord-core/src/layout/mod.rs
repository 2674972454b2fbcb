//! Key positions, slots and layouts.
//!
//! A `Layout` is a fixed array of 30 `KeyAssignment`s, each holding up to four
//! kana. It is a plain value: copying it is how the search tries a candidate
//! without touching the committed layout.

pub mod fixtures;
mod validate;

pub use validate::{
    validate_key_assignment, validate_layout, KeyViolation, LayoutValidationError,
};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kana::{classify, is_small_vowel, Modifier};

pub const KEY_COUNT: usize = 30;

const KEY_SYMBOLS: [char; KEY_COUNT] = [
    'q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', //
    'a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';', //
    'z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '/',
];

const SHIFTED_KEY_SYMBOLS: [char; KEY_COUNT] = [
    'Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P', //
    'A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L', ':', //
    'Z', 'X', 'C', 'V', 'B', 'N', 'M', '<', '>', '?',
];

/// A physical key, 0..30, row-major over three rows of ten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct KeyPosition(u8);

impl KeyPosition {
    pub const fn new(index: u8) -> Option<KeyPosition> {
        if (index as usize) < KEY_COUNT {
            Some(KeyPosition(index))
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = KeyPosition> {
        (0..KEY_COUNT as u8).map(KeyPosition)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn symbol(self) -> char {
        KEY_SYMBOLS[self.index()]
    }

    pub fn shifted_symbol(self) -> char {
        SHIFTED_KEY_SYMBOLS[self.index()]
    }

    /// Inverse of `symbol` / `shifted_symbol`; the flag is true for a shifted symbol.
    pub fn from_symbol(symbol: char) -> Option<(KeyPosition, bool)> {
        if let Some(i) = KEY_SYMBOLS.iter().position(|&s| s == symbol) {
            return Some((KeyPosition(i as u8), false));
        }
        SHIFTED_KEY_SYMBOLS
            .iter()
            .position(|&s| s == symbol)
            .map(|i| (KeyPosition(i as u8), true))
    }

    /// Row 0..3 from the top.
    pub fn row(self) -> usize {
        self.index() / 10
    }

    /// Column 0..10 from the left.
    pub fn column(self) -> usize {
        self.index() % 10
    }
}

impl TryFrom<u8> for KeyPosition {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        KeyPosition::new(index).ok_or_else(|| format!("key position out of range: {index}"))
    }
}

impl From<KeyPosition> for u8 {
    fn from(pos: KeyPosition) -> u8 {
        pos.0
    }
}

impl fmt::Display for KeyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySlot {
    /// Single unshifted press.
    #[serde(rename = "oneStroke")]
    Base,
    /// Press, then the ゅ key.
    #[serde(rename = "shift1")]
    ShiftA,
    /// Press, then the ょ key.
    #[serde(rename = "shift2")]
    ShiftB,
    /// Press with shift held.
    #[serde(rename = "normalShift")]
    DirectShift,
}

impl KeySlot {
    pub const ALL: [KeySlot; 4] = [
        KeySlot::Base,
        KeySlot::ShiftA,
        KeySlot::ShiftB,
        KeySlot::DirectShift,
    ];

    pub fn is_plane(self) -> bool {
        matches!(self, KeySlot::ShiftA | KeySlot::ShiftB)
    }
}

impl fmt::Display for KeySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeySlot::Base => "base",
            KeySlot::ShiftA => "shift-plane A",
            KeySlot::ShiftB => "shift-plane B",
            KeySlot::DirectShift => "direct-shift",
        };
        f.write_str(name)
    }
}

/// The four slots of one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyAssignment {
    #[serde(rename = "oneStroke", default, skip_serializing_if = "Option::is_none")]
    pub base: Option<char>,
    #[serde(rename = "shift1", default, skip_serializing_if = "Option::is_none")]
    pub shift_a: Option<char>,
    #[serde(rename = "shift2", default, skip_serializing_if = "Option::is_none")]
    pub shift_b: Option<char>,
    #[serde(rename = "normalShift", default, skip_serializing_if = "Option::is_none")]
    pub direct_shift: Option<char>,
}

impl KeyAssignment {
    pub const EMPTY: KeyAssignment = KeyAssignment {
        base: None,
        shift_a: None,
        shift_b: None,
        direct_shift: None,
    };

    pub const fn base(kana: char) -> KeyAssignment {
        KeyAssignment {
            base: Some(kana),
            ..KeyAssignment::EMPTY
        }
    }

    pub const fn with_shift_a(self, kana: char) -> KeyAssignment {
        KeyAssignment {
            shift_a: Some(kana),
            ..self
        }
    }

    pub const fn with_shift_b(self, kana: char) -> KeyAssignment {
        KeyAssignment {
            shift_b: Some(kana),
            ..self
        }
    }

    pub const fn with_direct_shift(self, kana: char) -> KeyAssignment {
        KeyAssignment {
            direct_shift: Some(kana),
            ..self
        }
    }

    pub fn get(&self, slot: KeySlot) -> Option<char> {
        match slot {
            KeySlot::Base => self.base,
            KeySlot::ShiftA => self.shift_a,
            KeySlot::ShiftB => self.shift_b,
            KeySlot::DirectShift => self.direct_shift,
        }
    }

    pub fn set(&mut self, slot: KeySlot, kana: Option<char>) {
        match slot {
            KeySlot::Base => self.base = kana,
            KeySlot::ShiftA => self.shift_a = kana,
            KeySlot::ShiftB => self.shift_b = kana,
            KeySlot::DirectShift => self.direct_shift = kana,
        }
    }

    /// Copy of this key with `kana` placed in `slot`.
    pub fn with(&self, slot: KeySlot, kana: char) -> KeyAssignment {
        let mut next = *self;
        next.set(slot, Some(kana));
        next
    }

    /// Occupied slots in slot order.
    pub fn kanas(&self) -> impl Iterator<Item = (KeySlot, char)> + '_ {
        KeySlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|k| (slot, k)))
    }

    pub fn slot_of(&self, kana: char) -> Option<KeySlot> {
        self.kanas().find(|&(_, k)| k == kana).map(|(slot, _)| slot)
    }

    pub fn is_empty(&self) -> bool {
        self.kanas().next().is_none()
    }

    /// The modifier on the base slot, if this is a modifier key.
    pub fn modifier(&self) -> Option<Modifier> {
        self.base.and_then(Modifier::from_char)
    }

    /// The kana a shift-held press of this key selects: the direct-shift kana,
    /// else the first plane kana a held shift can reach without a plane
    /// selector (a foreign-sound consonant or a small vowel).
    pub fn shifted_kana(&self) -> Option<char> {
        self.direct_shift.or_else(|| {
            [self.shift_a, self.shift_b].into_iter().flatten().find(|&k| {
                is_small_vowel(k) || classify(k).is_some_and(|info| info.gairaion)
            })
        })
    }

    /// The small vowel a shift-held second press composes with: the
    /// direct-shift kana, then the planes, then the base slot.
    pub fn small_vowel(&self) -> Option<char> {
        [self.direct_shift, self.shift_a, self.shift_b, self.base]
            .into_iter()
            .flatten()
            .find(|&k| is_small_vowel(k))
    }

    /// The youon-eligible kana on this key, in any slot.
    pub fn contraction_kana(&self) -> Option<char> {
        self.kanas()
            .map(|(_, k)| k)
            .find(|&k| classify(k).is_some_and(|info| info.youon))
    }

    /// The kana whose voiced form ゛ produces on this key: the base kana when
    /// it voices, otherwise the first voiceable kana in the other slots.
    pub fn voiced_owner(&self) -> Option<char> {
        self.kanas()
            .map(|(_, k)| k)
            .find(|&k| classify(k).is_some_and(|info| info.is_dakuon()))
    }

    /// The semi-voiced kana `modifier` produces on this key, base slot first.
    pub fn semi_voiced_for(&self, modifier: Modifier) -> Option<char> {
        self.kanas()
            .find_map(|(_, k)| classify(k).and_then(|info| info.handakuon_for(modifier)))
    }
}

/// Assignment of kana to all 30 keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<KeyPosition, KeyAssignment>",
    into = "BTreeMap<KeyPosition, KeyAssignment>"
)]
pub struct Layout {
    keys: [KeyAssignment; KEY_COUNT],
}

impl Default for Layout {
    fn default() -> Self {
        Layout::empty()
    }
}

impl Layout {
    pub const fn empty() -> Layout {
        Layout {
            keys: [KeyAssignment::EMPTY; KEY_COUNT],
        }
    }

    pub const fn from_keys(keys: [KeyAssignment; KEY_COUNT]) -> Layout {
        Layout { keys }
    }

    /// Empty layout with the four modifier kana on the given base slots.
    pub fn with_modifiers(
        pinned: [(Modifier, KeyPosition); 4],
    ) -> Result<Layout, LayoutValidationError> {
        let mut layout = Layout::empty();
        for (modifier, pos) in pinned {
            if let Some(existing) = layout.key(pos).base {
                return Err(LayoutValidationError::SlotOccupied {
                    kana: modifier.as_char(),
                    position: pos,
                    occupied_by: existing,
                });
            }
            layout.assign(pos, KeySlot::Base, modifier.as_char());
        }
        Ok(layout)
    }

    pub fn key(&self, pos: KeyPosition) -> &KeyAssignment {
        &self.keys[pos.index()]
    }

    pub fn key_mut(&mut self, pos: KeyPosition) -> &mut KeyAssignment {
        &mut self.keys[pos.index()]
    }

    pub fn keys(&self) -> impl Iterator<Item = (KeyPosition, &KeyAssignment)> {
        KeyPosition::all().zip(self.keys.iter())
    }

    pub fn assign(&mut self, pos: KeyPosition, slot: KeySlot, kana: char) {
        self.key_mut(pos).set(slot, Some(kana));
    }

    pub fn get(&self, pos: KeyPosition, slot: KeySlot) -> Option<char> {
        self.key(pos).get(slot)
    }

    /// Where `kana` sits, if anywhere.
    pub fn locate(&self, kana: char) -> Option<(KeyPosition, KeySlot)> {
        self.keys()
            .find_map(|(pos, key)| key.slot_of(kana).map(|slot| (pos, slot)))
    }

    /// The key whose base slot holds `modifier`.
    pub fn modifier_position(&self, modifier: Modifier) -> Option<KeyPosition> {
        let kana = modifier.as_char();
        self.keys()
            .find(|(_, key)| key.base == Some(kana))
            .map(|(pos, _)| pos)
    }

    /// Every placed kana with its position and slot.
    pub fn placements(&self) -> impl Iterator<Item = (KeyPosition, KeySlot, char)> + '_ {
        self.keys()
            .flat_map(|(pos, key)| key.kanas().map(move |(slot, k)| (pos, slot, k)))
    }
}

impl TryFrom<BTreeMap<KeyPosition, KeyAssignment>> for Layout {
    type Error = String;

    fn try_from(map: BTreeMap<KeyPosition, KeyAssignment>) -> Result<Self, Self::Error> {
        // KeyPosition's own conversion already rejects indices >= 30.
        let mut layout = Layout::empty();
        for (pos, key) in map {
            *layout.key_mut(pos) = key;
        }
        Ok(layout)
    }
}

impl From<Layout> for BTreeMap<KeyPosition, KeyAssignment> {
    fn from(layout: Layout) -> Self {
        layout.keys().map(|(pos, key)| (pos, *key)).collect()
    }
}

/// Parse a layout from its JSON interchange form.
pub fn layout_from_json(json: &str) -> Result<Layout, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a layout to its JSON interchange form.
pub fn layout_to_json(layout: &Layout) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(layout)
}
