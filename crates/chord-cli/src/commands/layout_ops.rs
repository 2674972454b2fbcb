use std::path::Path;

use chord_engine::layout::fixtures::{EXAMPLE_LAYOUT, GREEDY_LAYOUT_20251211, ROMAN_TABLE_LAYOUT};
use chord_engine::layout::{layout_to_json, Layout};
use chord_engine::stroke::{export_roman_table, layout_to_roman_table_string, text_to_strokes};

use crate::input::load_layout;
use crate::render::{render_layout, render_strokes};

fn open(file: &str) -> Layout {
    die!(load_layout(Path::new(file)), "Error: {}")
}

pub fn validate(file: &str) {
    let layout = open(file);
    let placed = layout.placements().count();
    println!("OK: {placed} kana placed");
}

pub fn show(file: &str) {
    print!("{}", render_layout(&open(file)));
}

pub fn encode(file: &str, text: &str, json: bool) {
    let layout = open(file);
    let strokes = die!(text_to_strokes(&layout, text), "Error: {}");
    if json {
        let out = die!(serde_json::to_string_pretty(&strokes), "Error: {}");
        println!("{out}");
    } else {
        println!("{}", render_strokes(&strokes));
    }
}

pub fn roman_table(file: &str, json: bool) {
    let layout = open(file);
    if json {
        let rows = export_roman_table(&layout);
        let out = die!(serde_json::to_string_pretty(&rows), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", layout_to_roman_table_string(&layout));
    }
}

/// Reference layouts by name.
pub fn fixture(name: &str) -> Option<Layout> {
    match name {
        "example" => Some(EXAMPLE_LAYOUT),
        "roman-table" => Some(ROMAN_TABLE_LAYOUT),
        "greedy-20251211" => Some(GREEDY_LAYOUT_20251211),
        _ => None,
    }
}

pub fn example(name: &str) {
    let layout = die!(
        fixture(name).ok_or("expected example, roman-table or greedy-20251211"),
        "Unknown layout {name:?}: {}"
    );
    let out = die!(layout_to_json(&layout), "Error: {}");
    println!("{out}");
}
