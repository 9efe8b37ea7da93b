//! Free-text query resolution
//!
//! A query is classified into exactly one [`Intent`] by checking keyword
//! groups in a fixed priority order, then the intent is applied to the table.

use serde::Serialize;
use std::cmp::Ordering;

use super::{Row, Table};

/// Rows returned by the ranking intents
pub const RESULT_LIMIT: usize = 5;

const CHEAP_KEYWORDS: [&str; 3] = ["low", "budget", "cheap"];
const PREMIUM_KEYWORDS: [&str; 3] = ["high", "expensive", "premium"];
const RATING_KEYWORDS: [&str; 3] = ["best", "top", "rating"];

/// Brands recognized in queries, checked in this order
pub const BRANDS: [&str; 8] = [
    "iphone", "samsung", "oppo", "vivo", "redmi", "realme", "oneplus", "nothing",
];

/// What a query asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "terms", rename_all = "snake_case")]
pub enum Intent {
    /// Lowest prices first
    Cheapest,
    /// Highest prices first
    MostExpensive,
    /// Highest ratings first
    BestRated,
    /// Every listing whose name contains the brand
    Brand(&'static str),
    /// Every listing whose name contains any of the words; no words matches
    /// every named listing
    Keywords(Vec<String>),
}

impl Intent {
    /// Short label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Cheapest => "cheapest",
            Intent::MostExpensive => "most_expensive",
            Intent::BestRated => "best_rated",
            Intent::Brand(_) => "brand",
            Intent::Keywords(_) => "keywords",
        }
    }
}

/// Classify a query; the first matching keyword group wins
pub fn classify(query: &str) -> Intent {
    let query = query.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| query.contains(k));

    if mentions(&CHEAP_KEYWORDS) {
        return Intent::Cheapest;
    }
    if mentions(&PREMIUM_KEYWORDS) {
        return Intent::MostExpensive;
    }
    if mentions(&RATING_KEYWORDS) {
        return Intent::BestRated;
    }
    if let Some(brand) = BRANDS.iter().find(|b| query.contains(*b)) {
        return Intent::Brand(brand);
    }

    Intent::Keywords(query.split_whitespace().map(str::to_string).collect())
}

/// Resolve a query against the table with the default ranking limit
pub fn resolve(table: &Table, query: &str) -> Table {
    resolve_with_limit(table, query, RESULT_LIMIT)
}

pub fn resolve_with_limit(table: &Table, query: &str, limit: usize) -> Table {
    if table.is_empty() {
        return table.clone();
    }
    apply(table, &classify(query), limit)
}

/// Apply an already classified intent.
///
/// Ranking intents return at most `limit` rows; filtering intents return
/// every match in source order.
pub fn apply(table: &Table, intent: &Intent, limit: usize) -> Table {
    match intent {
        Intent::Cheapest => ranked(table, limit, |row| row.price(), false),
        Intent::MostExpensive => ranked(table, limit, |row| row.price(), true),
        Intent::BestRated => ranked(table, limit, |row| row.rating(), true),
        Intent::Brand(brand) => filtered(table, |name| name.contains(brand)),
        // No words at all matches every named row, the way an empty pattern does
        Intent::Keywords(words) if words.is_empty() => filtered(table, |_| true),
        Intent::Keywords(words) => {
            filtered(table, |name| words.iter().any(|w| name.contains(w.as_str())))
        }
    }
}

fn ranked<F>(table: &Table, limit: usize, key: F, descending: bool) -> Table
where
    F: Fn(&Row<'_>) -> Option<f64>,
{
    let keys: Vec<Option<f64>> = table.rows().map(|row| key(&row)).collect();

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| compare_nulls_last(keys[a], keys[b], descending));
    order.truncate(limit);

    table.select(order)
}

/// Missing values go last in both directions; the sort is stable
fn compare_nulls_last(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn filtered<F>(table: &Table, matches: F) -> Table
where
    F: Fn(&str) -> bool,
{
    let hits = table
        .rows()
        .enumerate()
        .filter(|(_, row)| {
            row.name()
                .map(|name| matches(&name.to_lowercase()))
                .unwrap_or(false)
        })
        .map(|(idx, _)| idx);

    table.select(hits.collect::<Vec<_>>())
}
