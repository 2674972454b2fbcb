//! Global settings loaded from TOML, following the same OnceLock pattern as the
//! kana registry.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::kana::{classify, Modifier};
use crate::layout::KeyPosition;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub timing: TimingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub base_kana_count: usize,
    pub trigram_limit: usize,
    pub early_kana: char,
    pub early_kana_index: usize,
    pub pinned: PinnedSettings,
}

/// Base-slot positions of the four modifier keys.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PinnedSettings {
    pub ya: KeyPosition,
    pub yu: KeyPosition,
    pub yo: KeyPosition,
    pub dakuten: KeyPosition,
}

impl PinnedSettings {
    pub fn modifiers(&self) -> [(Modifier, KeyPosition); 4] {
        [
            (Modifier::Ya, self.ya),
            (Modifier::Yu, self.yu),
            (Modifier::Yo, self.yo),
            (Modifier::Dakuten, self.dakuten),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingSettings {
    pub press_ms: f64,
    pub same_key_ms: f64,
    pub same_finger_ms: f64,
    pub row_step_ms: f64,
    pub alternation_bonus_ms: f64,
    pub shift_change_ms: f64,
    pub floor_ms: f64,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_non_negative_ms {
        ($section:ident . $field:ident) => {
            if !(s.$section.$field >= 0.0) {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be a non-negative number of milliseconds".to_string(),
                });
            }
        };
    }

    check_positive_usize!(search.base_kana_count);
    check_positive_usize!(search.trigram_limit);

    let early = s.search.early_kana;
    if classify(early).is_none() {
        return Err(SettingsError::InvalidValue {
            field: "search.early_kana".to_string(),
            reason: format!("{early} is not a plain kana"),
        });
    }

    let pinned = s.search.pinned.modifiers();
    for (i, (modifier, pos)) in pinned.iter().enumerate() {
        if let Some((other, _)) = pinned[i + 1..].iter().find(|(_, p)| p == pos) {
            return Err(SettingsError::InvalidValue {
                field: "search.pinned".to_string(),
                reason: format!(
                    "{} and {} share key {pos}",
                    modifier.as_char(),
                    other.as_char()
                ),
            });
        }
    }

    check_non_negative_ms!(timing.press_ms);
    check_non_negative_ms!(timing.same_key_ms);
    check_non_negative_ms!(timing.same_finger_ms);
    check_non_negative_ms!(timing.row_step_ms);
    check_non_negative_ms!(timing.alternation_bonus_ms);
    check_non_negative_ms!(timing.shift_change_ms);
    check_non_negative_ms!(timing.floor_ms);

    Ok(())
}
