//! Kana classification registry.
//!
//! A fixed table of every plain kana the keyboard can hold, with its
//! phonological relations: voiced partner, semi-voiced variants (each bound to
//! the modifier key that produces it), contraction and foreign-sound
//! eligibility. The table is built once and never mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

/// The two punctuation kana. They are excluded from the search's base-slot set.
pub const PUNCTUATION: [char; 2] = ['、', '。'];

/// Small vowels that close a foreign-sound unit (てぃ, ふぁ).
pub const SMALL_VOWELS: [char; 5] = ['ぁ', 'ぃ', 'ぅ', 'ぇ', 'ぉ'];

/// Kana that may precede a small ゃ/ゅ/ょ, in table order.
pub const YOUON_KANAS: [char; 7] = ['き', 'し', 'ち', 'に', 'ひ', 'み', 'り'];

/// Kana that may precede a small vowel, in table order.
pub const GAIRAION_KANAS: [char; 11] = [
    'あ', 'い', 'う', 'え', 'お', 'し', 'ち', 'つ', 'て', 'と', 'ふ',
];

/// Structural kana living on the postfix modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// ゃ: contraction, or voicing on a key without a youon kana.
    Ya,
    /// ゅ: plane A selector, contraction, semi-voicing.
    Yu,
    /// ょ: plane B selector, contraction, semi-voicing.
    Yo,
    /// ゛: voicing.
    Dakuten,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [Modifier::Ya, Modifier::Yu, Modifier::Yo, Modifier::Dakuten];

    pub fn as_char(self) -> char {
        match self {
            Modifier::Ya => 'ゃ',
            Modifier::Yu => 'ゅ',
            Modifier::Yo => 'ょ',
            Modifier::Dakuten => '゛',
        }
    }

    pub fn from_char(c: char) -> Option<Modifier> {
        match c {
            'ゃ' => Some(Modifier::Ya),
            'ゅ' => Some(Modifier::Yu),
            'ょ' => Some(Modifier::Yo),
            '゛' => Some(Modifier::Dakuten),
            _ => None,
        }
    }

    /// ゃ/ゅ/ょ, the modifiers that also form contractions.
    pub fn is_small_ya(self) -> bool {
        !matches!(self, Modifier::Dakuten)
    }
}

pub fn is_modifier_kana(c: char) -> bool {
    Modifier::from_char(c).is_some()
}

pub fn is_small_vowel(c: char) -> bool {
    SMALL_VOWELS.contains(&c)
}

/// A semi-voiced variant and the modifier key that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemiVoiced {
    pub kana: char,
    pub modifier: Modifier,
}

/// Classification record for a plain kana.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KanaInfo {
    pub kana: char,
    pub dakuon: Option<char>,
    pub handakuon: &'static [SemiVoiced],
    pub youon: bool,
    pub gairaion: bool,
}

impl KanaInfo {
    const fn plain(kana: char) -> Self {
        KanaInfo {
            kana,
            dakuon: None,
            handakuon: &[],
            youon: false,
            gairaion: false,
        }
    }

    const fn voiced(self, dakuon: char) -> Self {
        KanaInfo {
            dakuon: Some(dakuon),
            ..self
        }
    }

    const fn semi_voiced(self, handakuon: &'static [SemiVoiced]) -> Self {
        KanaInfo { handakuon, ..self }
    }

    const fn youon(self) -> Self {
        KanaInfo {
            youon: true,
            ..self
        }
    }

    const fn gairaion(self) -> Self {
        KanaInfo {
            gairaion: true,
            ..self
        }
    }

    pub fn is_dakuon(&self) -> bool {
        self.dakuon.is_some()
    }

    pub fn is_handakuon(&self) -> bool {
        !self.handakuon.is_empty()
    }

    /// The semi-voiced variant produced by `modifier`, if any.
    pub fn handakuon_for(&self, modifier: Modifier) -> Option<char> {
        self.handakuon
            .iter()
            .find(|sv| sv.modifier == modifier)
            .map(|sv| sv.kana)
    }
}

// ひ+ゅ is the contraction ひゅ, so ぴ is typed from the は key instead.
const HA_SEMI: &[SemiVoiced] = &[
    SemiVoiced {
        kana: 'ぱ',
        modifier: Modifier::Yo,
    },
    SemiVoiced {
        kana: 'ぴ',
        modifier: Modifier::Yu,
    },
];
const FU_SEMI: &[SemiVoiced] = &[SemiVoiced {
    kana: 'ぷ',
    modifier: Modifier::Yo,
}];
const HE_SEMI: &[SemiVoiced] = &[SemiVoiced {
    kana: 'ぺ',
    modifier: Modifier::Yo,
}];
const HO_SEMI: &[SemiVoiced] = &[SemiVoiced {
    kana: 'ぽ',
    modifier: Modifier::Yo,
}];

const fn k(kana: char) -> KanaInfo {
    KanaInfo::plain(kana)
}

static KANA_TABLE: [KanaInfo; 55] = [
    k('あ').gairaion(),
    k('い').gairaion(),
    k('う').voiced('ゔ').gairaion(),
    k('え').gairaion(),
    k('お').gairaion(),
    k('か').voiced('が'),
    k('き').voiced('ぎ').youon(),
    k('く').voiced('ぐ'),
    k('け').voiced('げ'),
    k('こ').voiced('ご'),
    k('さ').voiced('ざ'),
    k('し').voiced('じ').youon().gairaion(),
    k('す').voiced('ず'),
    k('せ').voiced('ぜ'),
    k('そ').voiced('ぞ'),
    k('た').voiced('だ'),
    k('ち').voiced('ぢ').youon().gairaion(),
    k('つ').voiced('づ').gairaion(),
    k('て').voiced('で').gairaion(),
    k('と').voiced('ど').gairaion(),
    k('な'),
    k('に').youon(),
    k('ぬ'),
    k('ね'),
    k('の'),
    k('は').voiced('ば').semi_voiced(HA_SEMI),
    k('ひ').voiced('び').youon(),
    k('ふ').voiced('ぶ').semi_voiced(FU_SEMI).gairaion(),
    k('へ').voiced('べ').semi_voiced(HE_SEMI),
    k('ほ').voiced('ぼ').semi_voiced(HO_SEMI),
    // The ま row voices into the ぱ row on this keyboard.
    k('ま').voiced('ぱ'),
    k('み').voiced('ぴ').youon(),
    k('む').voiced('ぷ'),
    k('め').voiced('ぺ'),
    k('も').voiced('ぽ'),
    k('や'),
    k('ゆ'),
    k('よ'),
    k('ら'),
    k('り').youon(),
    k('る'),
    k('れ'),
    k('ろ'),
    k('わ'),
    k('を'),
    k('ん'),
    k('っ'),
    k('ー'),
    k('、'),
    k('。'),
    k('ぁ'),
    k('ぃ'),
    k('ぅ'),
    k('ぇ'),
    k('ぉ'),
];

struct Registry {
    by_kana: HashMap<char, KanaInfo>,
    voiced_sources: HashMap<char, char>,
    semi_voiced_sources: HashMap<char, (char, Modifier)>,
}

fn registry() -> &'static Registry {
    static INSTANCE: OnceLock<Registry> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let mut by_kana = HashMap::with_capacity(KANA_TABLE.len());
        let mut voiced_sources = HashMap::new();
        let mut semi_voiced_sources = HashMap::new();
        for info in &KANA_TABLE {
            by_kana.insert(info.kana, *info);
            if let Some(dakuon) = info.dakuon {
                voiced_sources.insert(dakuon, info.kana);
            }
            for sv in info.handakuon {
                semi_voiced_sources.insert(sv.kana, (info.kana, sv.modifier));
            }
        }
        Registry {
            by_kana,
            voiced_sources,
            semi_voiced_sources,
        }
    })
}

/// Look up a plain kana. Modifier kana and composite kana are not plain.
pub fn classify(kana: char) -> Option<&'static KanaInfo> {
    registry().by_kana.get(&kana)
}

/// Every plain kana, in table order.
pub fn plain_kanas() -> impl Iterator<Item = char> {
    KANA_TABLE.iter().map(|info| info.kana)
}

/// Kana with a voiced partner, in table order.
pub fn dakuon_kanas() -> Vec<char> {
    KANA_TABLE
        .iter()
        .filter(|info| info.is_dakuon())
        .map(|info| info.kana)
        .collect()
}

/// One way of producing a kana unit from plain kana and modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// A kana held directly in some slot.
    Plain(char),
    /// Semi-voiced form of `source` through `modifier` (は+ょ → ぱ).
    SemiVoiced { source: char, modifier: Modifier },
    /// Voiced form of `source` through ゛ (か → が).
    Voiced { source: char },
    /// Contraction of a youon kana with ゃ/ゅ/ょ (き → きゃ).
    Contracted { base: char, small: Modifier },
    /// ゃ requested on a non-youon base: the key voices the base instead.
    VoicedByContraction { base: char },
    /// Foreign sound: consonant followed by a small vowel (て → てぃ).
    Foreign { consonant: char, vowel: char },
}

impl Composition {
    /// Plain kana that must be on the layout for this composition.
    pub fn sources(&self) -> impl Iterator<Item = char> {
        let (first, second) = match *self {
            Composition::Plain(c) => (c, None),
            Composition::SemiVoiced { source, .. } => (source, None),
            Composition::Voiced { source } => (source, None),
            Composition::Contracted { base, .. } => (base, None),
            Composition::VoicedByContraction { base } => (base, None),
            Composition::Foreign { consonant, vowel } => (consonant, Some(vowel)),
        };
        std::iter::once(first).chain(second)
    }
}

/// All compositions producing `unit`, in preference order.
///
/// Semi-voicing is preferred over voicing, so ぱ resolves through は+ょ before
/// falling back to ま+゛. An empty result means `unit` is not a kana unit.
pub fn compositions(unit: &str) -> Vec<Composition> {
    let reg = registry();
    let mut chars = unit.chars();
    let mut out = Vec::new();
    let (Some(first), second, None) = (chars.next(), chars.next(), chars.next()) else {
        return out;
    };

    match second {
        None => {
            if reg.by_kana.contains_key(&first) || is_modifier_kana(first) {
                out.push(Composition::Plain(first));
            }
            if let Some(&(source, modifier)) = reg.semi_voiced_sources.get(&first) {
                out.push(Composition::SemiVoiced { source, modifier });
            }
            if let Some(&source) = reg.voiced_sources.get(&first) {
                out.push(Composition::Voiced { source });
            }
        }
        Some(second) => {
            let Some(info) = reg.by_kana.get(&first) else {
                return out;
            };
            match Modifier::from_char(second) {
                Some(small) if small.is_small_ya() => {
                    if info.youon {
                        out.push(Composition::Contracted { base: first, small });
                    } else if small == Modifier::Ya && info.is_dakuon() {
                        out.push(Composition::VoicedByContraction { base: first });
                    }
                }
                Some(_) => {}
                None => {
                    if info.gairaion && is_small_vowel(second) {
                        out.push(Composition::Foreign {
                            consonant: first,
                            vowel: second,
                        });
                    }
                }
            }
        }
    }
    out
}

/// Whether `first` + `second` form a single two-character unit.
pub fn is_digraph(first: char, second: char) -> bool {
    let Some(info) = classify(first) else {
        return false;
    };
    match Modifier::from_char(second) {
        Some(small) => small.is_small_ya() && info.youon,
        None => info.gairaion && is_small_vowel(second),
    }
}

/// Split text into kana units, taking a two-character unit whenever one
/// matches at the current position.
pub fn split_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut rest = text;
    while let Some(first) = rest.chars().next() {
        let first_len = first.len_utf8();
        let len = match rest[first_len..].chars().next() {
            Some(second) if is_digraph(first, second) => first_len + second.len_utf8(),
            _ => first_len,
        };
        units.push(&rest[..len]);
        rest = &rest[len..];
    }
    units
}
