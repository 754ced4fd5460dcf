//! Merging and ranking of extracted listings

use crate::extract::GpuRecord;
use chrono::{DateTime, Utc};

/// Ranked outcome of one harvest
#[derive(Debug, Clone)]
pub struct ResultSet {
    /// Listings not marked out of stock, cheapest first
    pub in_stock: Vec<GpuRecord>,

    /// Every listing, cheapest first
    pub all: Vec<GpuRecord>,

    /// Number of listings exposed per list
    pub top_n: usize,

    pub harvested_at: DateTime<Utc>,
}

impl ResultSet {
    /// The cheapest in-stock listings, at most `top_n`
    pub fn top_in_stock(&self) -> &[GpuRecord] {
        &self.in_stock[..self.in_stock.len().min(self.top_n)]
    }

    /// The cheapest listings of any stock status, at most `top_n`
    pub fn top_all(&self) -> &[GpuRecord] {
        &self.all[..self.all.len().min(self.top_n)]
    }

    /// True when nothing was found on any site
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Merges per-page listings into the two ranked lists
///
/// Arrival order of pages does not matter. Sorting is stable, so listings
/// with the same price keep their arrival order.
pub fn aggregate(pages: Vec<Vec<GpuRecord>>, top_n: usize) -> ResultSet {
    let mut all: Vec<GpuRecord> = pages.into_iter().flatten().collect();
    all.sort_by_key(|record| record.price);

    let in_stock = all.iter().filter(|r| r.is_in_stock()).cloned().collect();

    ResultSet {
        in_stock,
        all,
        top_n,
        harvested_at: Utc::now(),
    }
}
