use anyhow::Result;
use colored::Colorize;
use phone_finder::{
    config::Config,
    handlers::ask::reply_for,
    inventory::{self, query, Table},
};
use std::path::PathBuf;

/// Execute the query command
///
/// Loads the listings once and prints what the chat endpoint would return.
pub fn execute(cfg: Config, message: &str, file: Option<PathBuf>, html: bool) -> Result<()> {
    let path = file.unwrap_or_else(|| cfg.inventory.path.clone());
    let table = inventory::load_sheet(&path, cfg.inventory.sheet.as_deref());
    let limit = cfg.inventory.result_limit;

    if html {
        println!("{}", reply_for(&table, message, limit));
        return Ok(());
    }

    let intent = query::classify(message);
    println!("{} {}", "Intent:".cyan(), intent.label());

    let results = if table.is_empty() {
        Table::empty()
    } else {
        query::apply(&table, &intent, limit)
    };

    if results.is_empty() {
        println!("{}", "No matching phones found.".yellow());
        return Ok(());
    }

    for (idx, row) in results.rows().enumerate() {
        println!(
            "  {}. {}  {}  {}",
            idx + 1,
            row.name().unwrap_or_else(|| "-".to_string()).bold(),
            format_value("₹", row.price()),
            format_value("★", row.rating()),
        );
        if let Some(link) = row.link() {
            println!("     {}", link.dimmed());
        }
    }

    Ok(())
}

fn format_value(prefix: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}{}", prefix, v),
        None => format!("{}?", prefix),
    }
}
