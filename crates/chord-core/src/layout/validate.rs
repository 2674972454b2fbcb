use std::collections::HashMap;

use super::{KeyAssignment, KeyPosition, KeySlot, Layout};
use crate::kana::{classify, is_modifier_kana, Modifier};

/// A per-key legality rule broken by a single key's slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KeyViolation {
    #[error("{0} is not a kana this keyboard can hold")]
    UnknownKana(char),
    #[error("modifier {0} must sit in the base slot, found in {1}")]
    ModifierOutsideBase(char, KeySlot),
    #[error("a modifier key cannot hold shift-plane kana")]
    PlaneOnModifierKey,
    #[error("{0} appears twice on the key")]
    RepeatedKana(char),
    #[error("contraction kana {0} cannot sit in a shift plane")]
    ContractionInPlane(char),
    #[error("key holding contraction kana {0} cannot use its shift planes")]
    PlaneOnContractionKey(char),
    #[error("contraction kana {0} and {1} share a key")]
    MultipleContractionKana(char, char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutValidationError {
    #[error("illegal key assignment{}: {violation}", at_position(.position))]
    IllegalKey {
        position: Option<KeyPosition>,
        violation: KeyViolation,
    },
    #[error("{kana} placed twice: {} and {}", describe(.first), describe(.second))]
    DuplicateKana {
        kana: char,
        first: (KeyPosition, KeySlot),
        second: (KeyPosition, KeySlot),
    },
    #[error("cannot pin {kana} on key {position}: already holds {occupied_by}")]
    SlotOccupied {
        kana: char,
        position: KeyPosition,
        occupied_by: char,
    },
    #[error("modifier {0} is not placed on any base slot")]
    MissingModifier(char),
    #[error("key {0} has no base kana")]
    EmptyBase(KeyPosition),
}

fn at_position(position: &Option<KeyPosition>) -> String {
    position.map(|p| format!(" at key {p}")).unwrap_or_default()
}

fn describe(&(position, slot): &(KeyPosition, KeySlot)) -> String {
    format!("key {position} ({slot})")
}

/// Check one key's four slots against the per-key rules.
///
/// Rules, in order:
/// 1. every kana is a plain kana or a modifier kana;
/// 2. a modifier kana only sits in the base slot;
/// 3. a modifier key holds nothing in shift planes A/B;
/// 4. no kana repeats within the key;
/// 5. a youon-eligible kana never sits in plane A/B;
/// 6. a key holding a youon-eligible kana leaves planes A/B empty;
/// 7. at most one youon-eligible kana per key.
///
/// Rules 5–7 keep postfix ゃ/ゅ/ょ unambiguous: on a contraction key they
/// always contract, elsewhere ゅ/ょ select a plane.
pub fn validate_key_assignment(key: &KeyAssignment) -> Result<(), LayoutValidationError> {
    check_key(key).map_err(|violation| LayoutValidationError::IllegalKey {
        position: None,
        violation,
    })
}

fn check_key(key: &KeyAssignment) -> Result<(), KeyViolation> {
    for (slot, kana) in key.kanas() {
        if is_modifier_kana(kana) {
            if slot != KeySlot::Base {
                return Err(KeyViolation::ModifierOutsideBase(kana, slot));
            }
        } else if classify(kana).is_none() {
            return Err(KeyViolation::UnknownKana(kana));
        }
    }

    if key.modifier().is_some() && (key.shift_a.is_some() || key.shift_b.is_some()) {
        return Err(KeyViolation::PlaneOnModifierKey);
    }

    let kanas: Vec<(KeySlot, char)> = key.kanas().collect();
    for (i, &(_, kana)) in kanas.iter().enumerate() {
        if kanas[i + 1..].iter().any(|&(_, other)| other == kana) {
            return Err(KeyViolation::RepeatedKana(kana));
        }
    }

    let mut contraction: Option<char> = None;
    for &(slot, kana) in &kanas {
        if !classify(kana).is_some_and(|info| info.youon) {
            continue;
        }
        if slot.is_plane() {
            return Err(KeyViolation::ContractionInPlane(kana));
        }
        if let Some(first) = contraction {
            return Err(KeyViolation::MultipleContractionKana(first, kana));
        }
        contraction = Some(kana);
    }
    if let Some(kana) = contraction {
        if key.shift_a.is_some() || key.shift_b.is_some() {
            return Err(KeyViolation::PlaneOnContractionKey(kana));
        }
    }
    Ok(())
}

/// Check a finished layout: per-key rules, unique kana, each modifier on
/// exactly one base slot, every base slot populated. Returns the layout
/// unchanged on success.
pub fn validate_layout(layout: Layout) -> Result<Layout, LayoutValidationError> {
    for (pos, key) in layout.keys() {
        check_key(key).map_err(|violation| LayoutValidationError::IllegalKey {
            position: Some(pos),
            violation,
        })?;
    }

    let mut seen: HashMap<char, (KeyPosition, KeySlot)> = HashMap::new();
    for (pos, slot, kana) in layout.placements() {
        if let Some(&first) = seen.get(&kana) {
            return Err(LayoutValidationError::DuplicateKana {
                kana,
                first,
                second: (pos, slot),
            });
        }
        seen.insert(kana, (pos, slot));
    }

    // Modifiers outside the base slot were rejected per key and repeats as
    // duplicates, so presence is all that is left to check.
    for modifier in Modifier::ALL {
        if layout.modifier_position(modifier).is_none() {
            return Err(LayoutValidationError::MissingModifier(modifier.as_char()));
        }
    }

    if let Some((pos, _)) = layout.keys().find(|(_, key)| key.base.is_none()) {
        return Err(LayoutValidationError::EmptyBase(pos));
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::{EXAMPLE_LAYOUT, GREEDY_LAYOUT_20251211, ROMAN_TABLE_LAYOUT};

    fn pos(i: u8) -> KeyPosition {
        KeyPosition::new(i).unwrap()
    }

    fn key_err(key: KeyAssignment) -> KeyViolation {
        match validate_key_assignment(&key).unwrap_err() {
            LayoutValidationError::IllegalKey { violation, .. } => violation,
            other => panic!("expected IllegalKey, got {other:?}"),
        }
    }

    #[test]
    fn fixtures_are_valid() {
        for layout in [EXAMPLE_LAYOUT, ROMAN_TABLE_LAYOUT, GREEDY_LAYOUT_20251211] {
            assert_eq!(validate_layout(layout), Ok(layout));
        }
    }

    #[test]
    fn accepts_ordinary_keys() {
        let keys = [
            KeyAssignment::EMPTY,
            KeyAssignment::base('も').with_shift_a('せ').with_shift_b('あ'),
            KeyAssignment::base('ゅ').with_direct_shift('、'),
            KeyAssignment::base('る').with_direct_shift('ち'),
            KeyAssignment::base('ゅ').with_direct_shift('ひ'),
            KeyAssignment::EMPTY.with_direct_shift('。'),
        ];
        for key in keys {
            assert_eq!(validate_key_assignment(&key), Ok(()), "{key:?}");
        }
    }

    #[test]
    fn rejects_unknown_kana() {
        assert_eq!(
            key_err(KeyAssignment::base('が')),
            KeyViolation::UnknownKana('が')
        );
    }

    #[test]
    fn rejects_modifier_outside_base() {
        assert_eq!(
            key_err(KeyAssignment::base('か').with_direct_shift('゛')),
            KeyViolation::ModifierOutsideBase('゛', KeySlot::DirectShift)
        );
    }

    #[test]
    fn rejects_planes_on_modifier_key() {
        assert_eq!(
            key_err(KeyAssignment::base('ょ').with_shift_a('ね')),
            KeyViolation::PlaneOnModifierKey
        );
    }

    #[test]
    fn rejects_repeats() {
        assert_eq!(
            key_err(KeyAssignment::base('か').with_shift_b('か')),
            KeyViolation::RepeatedKana('か')
        );
    }

    #[test]
    fn rejects_contraction_conflicts() {
        assert_eq!(
            key_err(KeyAssignment::base('か').with_shift_a('き')),
            KeyViolation::ContractionInPlane('き')
        );
        assert_eq!(
            key_err(KeyAssignment::base('き').with_shift_b('ね')),
            KeyViolation::PlaneOnContractionKey('き')
        );
        assert_eq!(
            key_err(KeyAssignment::base('し').with_direct_shift('ち')),
            KeyViolation::MultipleContractionKana('し', 'ち')
        );
    }

    #[test]
    fn rejects_duplicates_across_keys() {
        let mut layout = EXAMPLE_LAYOUT;
        layout.assign(pos(0), KeySlot::ShiftA, 'か');
        let err = validate_layout(layout).unwrap_err();
        assert_eq!(
            err,
            LayoutValidationError::DuplicateKana {
                kana: 'か',
                first: (pos(0), KeySlot::ShiftA),
                second: (pos(7), KeySlot::Base),
            }
        );
    }

    #[test]
    fn rejects_missing_modifier() {
        let mut layout = EXAMPLE_LAYOUT;
        layout.assign(pos(18), KeySlot::Base, 'ぬ');
        layout.key_mut(pos(19)).shift_b = None;
        assert_eq!(
            validate_layout(layout),
            Err(LayoutValidationError::MissingModifier('゛'))
        );
    }

    #[test]
    fn rejects_empty_base() {
        let mut layout = EXAMPLE_LAYOUT;
        layout.key_mut(pos(29)).base = None;
        assert_eq!(
            validate_layout(layout),
            Err(LayoutValidationError::EmptyBase(pos(29)))
        );
    }

    #[test]
    fn names_position_of_illegal_key() {
        let mut layout = EXAMPLE_LAYOUT;
        layout.assign(pos(9), KeySlot::ShiftA, 'ぬ');
        layout.key_mut(pos(19)).shift_b = None;
        let err = validate_layout(layout).unwrap_err();
        assert_eq!(
            err,
            LayoutValidationError::IllegalKey {
                position: Some(pos(9)),
                violation: KeyViolation::PlaneOnContractionKey('き'),
            }
        );
        assert!(err.to_string().contains("at key 9"));
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let json = serde_json::to_string_pretty(&GREEDY_LAYOUT_20251211).unwrap();
        let parsed: Layout = serde_json::from_str(&json).unwrap();
        let validated = validate_layout(parsed).unwrap();
        assert_eq!(serde_json::to_string_pretty(&validated).unwrap(), json);
    }
}
