use regex::Regex;
use std::sync::LazyLock;

use super::Cell;

/// First ASCII digit run with an optional decimal part
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+\.?[0-9]*").unwrap());

const CURRENCY_SYMBOL: char = '₹';

/// Clean a currency-formatted price cell into a number.
///
/// The rupee sign and thousands separators are removed, then the first
/// numeric substring is parsed. Cells without digits yield `None`.
pub fn clean_price(cell: &Cell) -> Option<f64> {
    let text = cell.as_text()?;
    parse_price(&text)
}

pub fn parse_price(text: &str) -> Option<f64> {
    let stripped: String = text
        .chars()
        .filter(|c| *c != CURRENCY_SYMBOL && *c != ',')
        .collect();

    PRICE_RE
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
