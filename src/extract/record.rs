//! Structured listing types

use std::fmt;

/// An exact price in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Parses a decimal amount such as `1,249.5`
    ///
    /// Thousands separators are ignored; a single fractional digit counts as
    /// tenths and digits past the second are dropped.
    pub fn parse_amount(dollars: &str, fraction: &str) -> Option<Self> {
        let dollars: u64 = dollars.replace(',', "").parse().ok()?;
        let mut cents: String = fraction.chars().take(2).collect();
        while cents.len() < 2 {
            cents.push('0');
        }
        let cents: u64 = cents.parse().ok()?;
        dollars.checked_mul(100)?.checked_add(cents).map(Self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Memory size of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capacity {
    Gigabytes(u8),
    Unknown,
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Gigabytes(gb) => write!(f, "{gb} GB"),
            Capacity::Unknown => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::InStock => f.write_str("In stock"),
            StockStatus::OutOfStock => f.write_str("Out of Stock"),
        }
    }
}

/// One product listing read from a results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuRecord {
    pub price: Price,
    pub link: String,
    pub capacity: Capacity,
    pub is_variant_ti: bool,
    pub stock_status: StockStatus,
    /// "New" unless the listing carries an open-box or refurbished label
    pub condition: String,
}

impl GpuRecord {
    pub fn is_in_stock(&self) -> bool {
        self.stock_status != StockStatus::OutOfStock
    }
}
