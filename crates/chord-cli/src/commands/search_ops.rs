use std::fs;
use std::path::Path;

use serde::Serialize;

use chord_engine::corpus::kana_by_frequency;
use chord_engine::layout::{layout_to_json, Layout};
use chord_engine::search::{score_layout, search_layout, LayoutScore, SearchOptions};
use chord_engine::settings::settings;
use chord_engine::timing::FingerTimer;

use crate::input::{load_kana_order, load_layout, load_trigrams};
use crate::render::render_layout;

#[derive(Serialize)]
struct SearchReport<'a> {
    layout: &'a Layout,
    score: &'a LayoutScore,
}

pub struct SearchArgs<'a> {
    pub trigrams: &'a str,
    pub kana_order: Option<&'a str>,
    pub limit: Option<usize>,
    pub output: Option<&'a str>,
    pub json: bool,
}

pub fn search(args: &SearchArgs) {
    let limit = args.limit.unwrap_or(settings().search.trigram_limit);
    let trigrams = die!(load_trigrams(Path::new(args.trigrams), limit), "Error: {}");
    let order = match args.kana_order {
        Some(file) => die!(load_kana_order(Path::new(file)), "Error: {}"),
        None => kana_by_frequency(&trigrams),
    };

    let timer = FingerTimer::default();
    let layout = die!(
        search_layout(&order, &trigrams, &timer, &SearchOptions::default()),
        "Search failed: {}"
    );
    let score = score_layout(&layout, &trigrams, &timer);

    if let Some(output) = args.output {
        let json = die!(layout_to_json(&layout), "Error: {}");
        die!(fs::write(output, json + "\n"), "Error writing {output}: {}");
    }
    if args.json {
        let report = SearchReport {
            layout: &layout,
            score: &score,
        };
        let out = die!(serde_json::to_string_pretty(&report), "Error: {}");
        println!("{out}");
    } else {
        print!("{}", render_layout(&layout));
        print_score(&score);
    }
}

pub fn score(file: &str, trigrams: &str, limit: Option<usize>, json: bool) {
    let layout = die!(load_layout(Path::new(file)), "Error: {}");
    let limit = limit.unwrap_or(settings().search.trigram_limit);
    let trigrams = die!(load_trigrams(Path::new(trigrams), limit), "Error: {}");
    let score = score_layout(&layout, &trigrams, &FingerTimer::default());
    if json {
        let out = die!(serde_json::to_string_pretty(&score), "Error: {}");
        println!("{out}");
    } else {
        print_score(&score);
    }
}

fn print_score(score: &LayoutScore) {
    println!("score:              {}", score.score);
    println!("strokes per minute: {:.2}", score.strokes_per_minute);
    println!("total seconds:      {}", score.total_seconds);
    println!("total count:        {}", score.total_count);
}
