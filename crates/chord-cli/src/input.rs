//! File inputs: layout JSON, trigram TSV, kana order.

use std::fs;
use std::path::Path;

use chord_engine::corpus::{parse_kana_order, parse_trigram_tsv, CorpusError, TrigramEntry};
use chord_engine::layout::{layout_from_json, validate_layout, Layout, LayoutValidationError};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path}: invalid layout JSON: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{path}: {source}")]
    Layout {
        path: String,
        source: LayoutValidationError,
    },
    #[error("{path}: {source}")]
    Corpus { path: String, source: CorpusError },
}

fn read(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Read and validate a layout file.
pub fn load_layout(path: &Path) -> Result<Layout, InputError> {
    let text = read(path)?;
    let layout = layout_from_json(&text).map_err(|source| InputError::Json {
        path: path.display().to_string(),
        source,
    })?;
    validate_layout(layout).map_err(|source| InputError::Layout {
        path: path.display().to_string(),
        source,
    })
}

/// Read a trigram TSV, keeping the first `limit` entries.
pub fn load_trigrams(path: &Path, limit: usize) -> Result<Vec<TrigramEntry>, InputError> {
    let text = read(path)?;
    let mut entries = parse_trigram_tsv(&text).map_err(|source| InputError::Corpus {
        path: path.display().to_string(),
        source,
    })?;
    entries.truncate(limit);
    Ok(entries)
}

pub fn load_kana_order(path: &Path) -> Result<Vec<char>, InputError> {
    Ok(parse_kana_order(&read(path)?))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use chord_engine::layout::fixtures::EXAMPLE_LAYOUT;
    use chord_engine::layout::layout_to_json;
    use tempfile::NamedTempFile;

    use super::*;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_valid_layout() {
        let file = temp_file(&layout_to_json(&EXAMPLE_LAYOUT).unwrap());
        assert_eq!(load_layout(file.path()).unwrap(), EXAMPLE_LAYOUT);
    }

    #[test]
    fn rejects_invalid_layout() {
        let file = temp_file(r#"{"0": {"oneStroke": "か"}}"#);
        let err = load_layout(file.path()).unwrap_err();
        assert!(matches!(err, InputError::Layout { .. }), "{err}");

        let file = temp_file("{not json");
        assert!(matches!(
            load_layout(file.path()).unwrap_err(),
            InputError::Json { .. }
        ));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_layout(&path).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn trigrams_are_truncated() {
        let file = temp_file("かきく\t3\nさしす\t2\nたちつ\t1\n");
        let entries = load_trigrams(file.path(), 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].trigram, "さしす");
    }

    #[test]
    fn corpus_errors_carry_path() {
        let file = temp_file("かきく 3\n");
        let err = load_trigrams(file.path(), 10).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn kana_order_reads_tokens() {
        let file = temp_file("い う\nん\n");
        assert_eq!(load_kana_order(file.path()).unwrap(), vec!['い', 'う', 'ん']);
    }
}
