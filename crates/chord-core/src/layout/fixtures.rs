//! Reference layouts.
//!
//! `EXAMPLE_LAYOUT` is the hand-made starting point, `ROMAN_TABLE_LAYOUT` a
//! variant exercising every postfix rule, and `GREEDY_LAYOUT_20251211` a
//! search result kept for regression comparison.

use super::{KeyAssignment as K, Layout};

/// The 26 most frequent kana (punctuation excluded) of the reference corpus.
pub const TOP26_KANAS: [char; 26] = [
    'い', 'う', 'ん', 'か', 'の', 'と', 'し', 'た', 'て', 'く', 'な', 'に', 'は', 'こ', 'る', 'っ',
    'す', 'き', 'ま', 'も', 'つ', 'お', 'ら', 'を', 'さ', 'あ',
];

pub const EXAMPLE_LAYOUT: Layout = Layout::from_keys([
    K::base('ま'),
    K::base('す').with_shift_b('や'),
    K::base('て').with_shift_b('ゆ'),
    K::base('と').with_shift_b('め'),
    K::base('つ'),
    K::base('さ'),
    K::base('し'),
    K::base('か').with_shift_a('よ'),
    K::base('こ').with_shift_a('ね'),
    K::base('き'),
    K::base('も').with_shift_a('せ').with_shift_b('あ'),
    K::base('ゃ'),
    K::base('ゅ').with_direct_shift('、'),
    K::base('う').with_shift_a('ろ').with_shift_b('ら'),
    K::base('ん').with_shift_a('へ'),
    K::base('く').with_shift_a('れ').with_shift_b('え'),
    K::base('い').with_shift_a('ほ'),
    K::base('ょ').with_direct_shift('。'),
    K::base('゛'),
    K::base('お').with_shift_a('け').with_shift_b('ぬ'),
    K::base('を').with_shift_a('そ'),
    K::base('っ').with_direct_shift('み'),
    K::base('に'),
    K::base('る').with_direct_shift('ち'),
    K::base('た').with_shift_a('わ').with_shift_b('む'),
    K::base('の').with_shift_a('ふ'),
    K::base('な').with_direct_shift('ひ'),
    K::base('は'),
    K::base('り'),
    K::base('ー'),
]);

pub const ROMAN_TABLE_LAYOUT: Layout = Layout::from_keys([
    K::base('ま'),
    K::base('す'),
    K::base('て').with_shift_b('ゆ'),
    K::base('と'),
    K::base('つ'),
    K::base('さ'),
    K::base('し'),
    K::base('か').with_shift_a('よ'),
    K::base('こ'),
    K::base('き'),
    K::base('も')
        .with_shift_a('や')
        .with_shift_b('あ')
        .with_direct_shift('ぁ'),
    K::base('ゃ'),
    K::base('ゅ').with_direct_shift('、'),
    K::base('う')
        .with_shift_a('ら')
        .with_shift_b('ろ')
        .with_direct_shift('ぅ'),
    K::base('ん').with_shift_a('へ').with_shift_b('わ'),
    K::base('く')
        .with_shift_a('れ')
        .with_shift_b('え')
        .with_direct_shift('ぇ'),
    K::base('い')
        .with_shift_a('め')
        .with_shift_b('ね')
        .with_direct_shift('ぃ'),
    K::base('ょ'),
    K::base('゛'),
    K::base('お')
        .with_shift_a('そ')
        .with_shift_b('ぬ')
        .with_direct_shift('ぉ'),
    K::base('を').with_shift_a('せ'),
    K::base('っ').with_direct_shift('み'),
    K::base('に').with_direct_shift('ふ'),
    K::base('る').with_direct_shift('ち'),
    K::base('た'),
    K::base('の').with_shift_a('け'),
    K::base('な').with_direct_shift('ひ'),
    K::base('は'),
    K::base('り').with_direct_shift('む'),
    K::base('ー').with_shift_b('ほ'),
]);

pub const GREEDY_LAYOUT_20251211: Layout = Layout::from_keys([
    K::base('ん')
        .with_shift_a('む')
        .with_shift_b('そ')
        .with_direct_shift('、'),
    K::base('い').with_shift_a('や').with_shift_b('ゆ'),
    K::base('の').with_shift_a('へ').with_direct_shift('。'),
    K::base('て').with_shift_a('ぬ'),
    K::base('さ'),
    K::base('な').with_shift_a('ほ'),
    K::base('せ'),
    K::base('と'),
    K::base('り'),
    K::base('っ').with_direct_shift('ち'),
    K::base('す').with_shift_a('よ'),
    K::base('ゃ'),
    K::base('ゅ').with_direct_shift('ひ'),
    K::base('る').with_shift_a('け'),
    K::base('は').with_direct_shift('み'),
    K::base('こ').with_shift_b('え'),
    K::base('う').with_shift_b('ま'),
    K::base('ょ'),
    K::base('゛'),
    K::base('た').with_shift_b('め'),
    K::base('つ').with_shift_a('も').with_shift_b('ろ'),
    K::base('あ').with_shift_a('ね').with_shift_b('わ'),
    K::base('ー').with_shift_a('ふ'),
    K::base('に'),
    K::base('ら'),
    K::base('か').with_shift_b('を'),
    K::base('く').with_shift_b('お'),
    K::base('れ'),
    K::base('き'),
    K::base('し'),
]);
