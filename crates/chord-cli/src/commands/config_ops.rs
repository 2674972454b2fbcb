use std::fs;

use chord_engine::settings;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: search.base_kana_count={}, search.trigram_limit={}, timing.press_ms={}",
        s.search.base_kana_count, s.search.trigram_limit, s.timing.press_ms
    );
}

/// Install a custom settings file before anything reads the defaults.
pub fn use_settings_file(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error in {file}: {}");
}
