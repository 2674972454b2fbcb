//! Forward resolution: what a one- or two-keystroke chain produces. The roman
//! table is generated from these rules.

use super::Keystroke;
use crate::kana::{classify, Modifier};
use crate::layout::{KeyAssignment, Layout};

/// Result of the first keystroke of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FirstStroke {
    /// Output immediately; nothing can follow (a standalone ゃ/ゅ/ょ).
    Terminal(char),
    /// Output unless a following keystroke composes with it.
    Pending(char),
}

impl FirstStroke {
    pub(crate) fn kana(self) -> char {
        match self {
            FirstStroke::Terminal(k) | FirstStroke::Pending(k) => k,
        }
    }
}

pub(crate) fn first_stroke(layout: &Layout, stroke: Keystroke) -> Option<FirstStroke> {
    let key = layout.key(stroke.position);
    if stroke.shift {
        return key.shifted_kana().map(FirstStroke::Pending);
    }
    let base = key.base?;
    match Modifier::from_char(base) {
        Some(m) if m.is_small_ya() => Some(FirstStroke::Terminal(base)),
        _ => Some(FirstStroke::Pending(base)),
    }
}

/// The composite kana produced by `first` followed by `second`, if they compose.
pub(crate) fn resolve_pair(layout: &Layout, first: Keystroke, second: Keystroke) -> Option<String> {
    let Some(FirstStroke::Pending(pending)) = first_stroke(layout, first) else {
        return None;
    };
    let target = layout.key(second.position);

    if second.shift {
        if let Some(vowel) = target.small_vowel() {
            let foreign = classify(pending).is_some_and(|info| info.gairaion);
            return foreign.then(|| format!("{pending}{vowel}"));
        }
        if target.shifted_kana().is_some() {
            return None;
        }
    }

    let modifier = target.modifier()?;
    if first.shift {
        compose(pending, modifier)
    } else {
        postfix(layout.key(first.position), modifier)
    }
}

/// Postfix `modifier` after an unshifted press: the whole key is searched
/// (shift-omission), so a kana in any slot can own the composition.
fn postfix(key: &KeyAssignment, modifier: Modifier) -> Option<String> {
    if key.modifier().is_some() {
        return None;
    }
    match modifier {
        Modifier::Yu | Modifier::Yo => {
            let plane = if modifier == Modifier::Yu {
                key.shift_a
            } else {
                key.shift_b
            };
            if let Some(kana) = plane {
                return Some(kana.to_string());
            }
            if let Some(base) = key.contraction_kana() {
                return Some(format!("{base}{}", modifier.as_char()));
            }
            key.semi_voiced_for(modifier).map(String::from)
        }
        Modifier::Ya => match key.contraction_kana() {
            Some(base) => Some(format!("{base}ゃ")),
            None => voiced_of(key.voiced_owner()?),
        },
        Modifier::Dakuten => voiced_of(key.voiced_owner()?),
    }
}

/// Postfix `modifier` after a shifted press: only the pending kana composes.
fn compose(pending: char, modifier: Modifier) -> Option<String> {
    let info = classify(pending)?;
    if modifier == Modifier::Dakuten {
        return info.dakuon.map(String::from);
    }
    if info.youon {
        return Some(format!("{pending}{}", modifier.as_char()));
    }
    if modifier == Modifier::Ya {
        return info.dakuon.map(String::from);
    }
    info.handakuon_for(modifier).map(String::from)
}

fn voiced_of(kana: char) -> Option<String> {
    classify(kana)?.dakuon.map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::ROMAN_TABLE_LAYOUT;
    use crate::layout::{KeyPosition, KeySlot};

    fn press(symbol: char) -> Keystroke {
        let (position, shift) = KeyPosition::from_symbol(symbol).unwrap();
        Keystroke { position, shift }
    }

    fn pair(a: char, b: char) -> Option<String> {
        resolve_pair(&ROMAN_TABLE_LAYOUT, press(a), press(b))
    }

    #[test]
    fn first_strokes() {
        let layout = &ROMAN_TABLE_LAYOUT;
        assert_eq!(first_stroke(layout, press('i')), Some(FirstStroke::Pending('か')));
        assert_eq!(first_stroke(layout, press('s')), Some(FirstStroke::Terminal('ゃ')));
        assert_eq!(first_stroke(layout, press('l')), Some(FirstStroke::Pending('゛')));
        assert_eq!(first_stroke(layout, press('A')), Some(FirstStroke::Pending('ぁ')));
        assert_eq!(first_stroke(layout, press('I')), None);
    }

    #[test]
    fn planes_and_contractions() {
        assert_eq!(pair('a', 'd').as_deref(), Some("や"));
        assert_eq!(pair('a', 'k').as_deref(), Some("あ"));
        assert_eq!(pair('p', 's').as_deref(), Some("きゃ"));
        assert_eq!(pair('p', 'k').as_deref(), Some("きょ"));
        // る holds ち on direct shift: the unshifted press still contracts.
        assert_eq!(pair('v', 's').as_deref(), Some("ちゃ"));
        assert_eq!(pair('V', 's').as_deref(), Some("ちゃ"));
    }

    #[test]
    fn voicing_with_shift_omission() {
        assert_eq!(pair('i', 'l').as_deref(), Some("が"));
        assert_eq!(pair('i', 'L').as_deref(), Some("が"));
        assert_eq!(pair('i', 's').as_deref(), Some("が"));
        assert_eq!(pair('q', 'l').as_deref(), Some("ぱ"));
        // ん does not voice; へ on plane A owns the dakuten.
        assert_eq!(pair('g', 'l').as_deref(), Some("べ"));
        // な does not voice either; ひ on direct shift does.
        assert_eq!(pair('m', 'l').as_deref(), Some("び"));
        assert_eq!(pair('z', 'l'), None);
    }

    #[test]
    fn semi_voicing() {
        assert_eq!(pair(',', 'k').as_deref(), Some("ぱ"));
        assert_eq!(pair(',', 'd').as_deref(), Some("ぴ"));
    }

    #[test]
    fn foreign_sounds() {
        assert_eq!(pair('e', 'J').as_deref(), Some("てぃ"));
        assert_eq!(pair('V', 'H').as_deref(), Some("ちぇ"));
        // な is not a foreign-sound consonant.
        assert_eq!(pair('m', 'J'), None);
        // 、 on the ゅ key's direct shift is not a vowel.
        assert_eq!(pair('e', 'D'), None);
    }

    #[test]
    fn shifted_vowel_is_found_behind_direct_shift_kana() {
        let mut layout = Layout::empty();
        let pos = |i| KeyPosition::new(i).unwrap();
        layout.assign(pos(0), KeySlot::Base, 'て');
        layout.assign(pos(1), KeySlot::Base, 'ー');
        layout.assign(pos(1), KeySlot::ShiftA, 'ぃ');
        layout.assign(pos(1), KeySlot::DirectShift, '、');
        layout.assign(pos(2), KeySlot::Base, 'ぇ');
        // A lone shifted press still types the direct-shift kana.
        assert_eq!(first_stroke(&layout, press('W')), Some(FirstStroke::Pending('、')));
        assert_eq!(resolve_pair(&layout, press('q'), press('W')).as_deref(), Some("てぃ"));
        assert_eq!(resolve_pair(&layout, press('q'), press('E')).as_deref(), Some("てぇ"));
    }

    #[test]
    fn modifier_keys_do_not_compose() {
        assert_eq!(pair('s', 'l'), None);
        assert_eq!(pair('l', 'l'), None);
    }
}
