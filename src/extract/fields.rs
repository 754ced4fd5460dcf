//! Field readers for a single listing
//!
//! Each reader works on text or on an item element and never looks beyond
//! the item it is given.

use crate::extract::record::{Capacity, Price, StockStatus};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static LISTED_PRICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?(\d{1,3}(?:,\d{3})+|\d+)\.(\d+)").expect("price pattern"));

static DOLLARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,3}(?:,\d{3})*$|^\d+$").expect("dollars pattern"));

static CAPACITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})\s?GB?\b").expect("capacity pattern"));

/// Collects the trimmed text content of an element
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Reads the first `$123.45` style amount in `text`
pub fn listed_price(text: &str) -> Option<Price> {
    let captures = LISTED_PRICE.captures(text.trim())?;
    Price::parse_amount(&captures[1], &captures[2])
}

/// Rebuilds a price rendered as whole dollars with a fixed `.99` ending
///
/// # Example
///
/// ```
/// use gpu_harvest::extract::dollars_with_fixed_cents;
///
/// assert_eq!(dollars_with_fixed_cents("249").unwrap().to_string(), "$249.99");
/// ```
pub fn dollars_with_fixed_cents(dollars: &str) -> Option<Price> {
    let dollars = dollars.trim();
    if !DOLLARS.is_match(dollars) {
        return None;
    }
    Price::parse_amount(dollars, "99")
}

/// Memory size from a product description, e.g. "12GB" or "8 G"
pub fn capacity(description: &str) -> Capacity {
    CAPACITY
        .captures(description)
        .and_then(|c| c[1].parse().ok())
        .map(Capacity::Gigabytes)
        .unwrap_or(Capacity::Unknown)
}

/// True when the description mentions "ti" in any case
pub fn is_variant_ti(description: &str) -> bool {
    description.to_ascii_lowercase().contains("ti")
}

/// Interprets a stock label
pub fn stock_from_label(label: &str) -> StockStatus {
    if label.to_ascii_lowercase().contains("out of stock") {
        StockStatus::OutOfStock
    } else {
        StockStatus::InStock
    }
}

/// Condition label text, or "New" when absent or blank
pub fn condition(label: Option<String>) -> String {
    label
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "New".to_string())
}
