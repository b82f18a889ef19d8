//! Build a Portuguese -> Spanish lookup from a translation table and print it as JSON.
//! Run: cargo run --bin build_translations -- data/translations.csv '^topics$' [--lower]

use std::collections::BTreeMap;
use std::path::Path;

use cordata::data::translation::{build_translation_table, load_translation_rows};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let lowercase = args.iter().any(|arg| arg == "--lower");
    let positional: Vec<&String> = args.iter().skip(1).filter(|a| !a.starts_with("--")).collect();

    let (Some(path), Some(pattern)) = (positional.first(), positional.get(1)) else {
        eprintln!("usage: build_translations <table.csv|table.xlsx> <field-regex> [--lower]");
        std::process::exit(2);
    };

    let rows = load_translation_rows(Path::new(path.as_str()))?;
    let table = build_translation_table(&rows, pattern, lowercase)?;
    let sorted: BTreeMap<_, _> = table.into_iter().collect();

    eprintln!("{} translations for '{pattern}' from {} rows", sorted.len(), rows.len());
    println!("{}", serde_json::to_string_pretty(&sorted)?);
    Ok(())
}
