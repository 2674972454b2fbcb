use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chord_cli::commands::search_ops::SearchArgs;
use chord_cli::commands::{config_ops, layout_ops, search_ops};

#[derive(Parser)]
#[command(name = "chordtool", about = "Chorded kana keyboard layout tool")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Write JSONL traces to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// Emit tracing output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a layout greedily from a trigram corpus
    Search {
        /// Trigram TSV (trigram<TAB>count, most frequent first)
        trigrams: String,
        /// Placement order file (whitespace-separated kana); derived from the corpus if omitted
        #[arg(long)]
        kana_order: Option<String>,
        /// Number of trigrams to keep (default: search.trigram_limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Write the layout JSON to this file
        #[arg(short, long)]
        output: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Score a layout against a trigram corpus
    Score {
        /// Layout JSON file
        layout: String,
        /// Trigram TSV
        trigrams: String,
        /// Number of trigrams to keep (default: search.trigram_limit)
        #[arg(long)]
        limit: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the keystrokes that type a kana text
    Encode {
        /// Layout JSON file
        layout: String,
        /// Kana text
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export the IME roman table of a layout
    RomanTable {
        /// Layout JSON file
        layout: String,
        /// Output as JSON instead of tab-separated text
        #[arg(long)]
        json: bool,
    },
    /// Validate a layout file
    Validate {
        /// Layout JSON file
        layout: String,
    },
    /// Print a layout as a key grid
    Show {
        /// Layout JSON file
        layout: String,
    },
    /// Print a reference layout as JSON
    Example {
        /// example, roman-table or greedy-20251211
        #[arg(default_value = "example")]
        name: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let _trace_guard = if cli.verbose || cli.log_dir.is_some() {
        chord_engine::init_tracing(cli.log_dir.as_deref())
    } else {
        None
    };
    if let Some(file) = &cli.settings {
        config_ops::use_settings_file(file);
    }

    match cli.command {
        Command::Search {
            trigrams,
            kana_order,
            limit,
            output,
            json,
        } => search_ops::search(&SearchArgs {
            trigrams: &trigrams,
            kana_order: kana_order.as_deref(),
            limit,
            output: output.as_deref(),
            json,
        }),
        Command::Score {
            layout,
            trigrams,
            limit,
            json,
        } => search_ops::score(&layout, &trigrams, limit, json),
        Command::Encode { layout, text, json } => layout_ops::encode(&layout, &text, json),
        Command::RomanTable { layout, json } => layout_ops::roman_table(&layout, json),
        Command::Validate { layout } => layout_ops::validate(&layout),
        Command::Show { layout } => layout_ops::show(&layout),
        Command::Example { name } => layout_ops::example(&name),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
