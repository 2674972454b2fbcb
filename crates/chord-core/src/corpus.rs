//! Frequency inputs for the search: trigram counts and a kana placement order.
//!
//! Trigram files are `trigram<TAB>count` lines, most frequent first. Blank
//! lines and lines starting with `#` are skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::kana::{compositions, is_modifier_kana, split_units};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrigramEntry {
    pub trigram: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorpusError {
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub fn parse_trigram_tsv(text: &str) -> Result<Vec<TrigramEntry>, CorpusError> {
    let mut entries = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let err = |reason: String| CorpusError::Parse {
            line: i + 1,
            reason,
        };
        let (trigram, count) = line
            .split_once('\t')
            .ok_or_else(|| err("expected trigram<TAB>count".to_string()))?;
        let count = count
            .trim()
            .parse::<u64>()
            .map_err(|e| err(format!("bad count {count:?}: {e}")))?;
        if trigram.is_empty() {
            return Err(err("empty trigram".to_string()));
        }
        entries.push(TrigramEntry {
            trigram: trigram.to_string(),
            count,
        });
    }
    Ok(entries)
}

/// Whitespace-separated kana, one placement per token.
pub fn parse_kana_order(text: &str) -> Vec<char> {
    text.split_whitespace()
        .filter_map(|token| {
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        })
        .collect()
}

/// Plain kana the corpus needs, by count-weighted frequency (descending, ties
/// by code point). A unit contributes the sources of its preferred
/// composition, so が counts toward か. Modifier kana are left out.
pub fn kana_by_frequency(trigrams: &[TrigramEntry]) -> Vec<char> {
    let mut counts: HashMap<char, u64> = HashMap::new();
    for entry in trigrams {
        for unit in split_units(&entry.trigram) {
            let Some(comp) = compositions(unit).into_iter().next() else {
                continue;
            };
            for kana in comp.sources().filter(|&k| !is_modifier_kana(k)) {
                *counts.entry(kana).or_default() += entry.count;
            }
        }
    }
    let mut order: Vec<(char, u64)> = counts.into_iter().collect();
    order.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    order.into_iter().map(|(k, _)| k).collect()
}
