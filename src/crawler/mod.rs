//! Harvest pipeline
//!
//! This module wires the two concurrent stages together:
//! - fetch workers, one per site, each driving its own session
//! - a sentinel-terminated page channel between the stages
//! - a bounded parse pool running the site-adaptive extractor
//! - final aggregation into ranked lists

mod channel;
mod completion;
mod coordinator;
mod fetcher;
mod parse_pool;

pub use channel::{page_channel, PageMessage, PageReceiver, PageSender, PageSnapshot};
pub use completion::{ActiveWorkers, WorkerGuard};
pub use coordinator::FetchCoordinator;
pub use fetcher::{run_worker, FetchOutcome, WorkerSettings};
pub use parse_pool::ParseCoordinator;

use crate::config::Config;
use crate::output::{aggregate, ResultSet};
use crate::session::SessionFactory;
use crate::sites::{build_frontier, ProductId};
use std::sync::Arc;

/// Runs a complete harvest for one product
///
/// This is the main entry point. It will:
/// 1. Build the frontier of the three site searches
/// 2. Launch the fetch workers
/// 3. Extract listings from every page as it arrives
/// 4. Rank the merged listings by price
///
/// No failure inside the pipeline is fatal; an empty [`ResultSet`] is a
/// normal outcome.
pub async fn harvest(
    config: &Config,
    factory: Arc<dyn SessionFactory>,
    product_id: &ProductId,
    include_used: bool,
) -> ResultSet {
    let frontier = build_frontier(product_id, include_used);
    let (sender, receiver) = page_channel();

    let fetch = FetchCoordinator::new(factory, &config.harvester).spawn(frontier, sender);
    let per_page = ParseCoordinator::new(&config.harvester)
        .drain(receiver, product_id)
        .await;

    match fetch.await {
        Ok(outcomes) => {
            let failed = outcomes.iter().filter(|o| !o.is_success()).count();
            let pages: u32 = outcomes.iter().map(|o| o.pages_pushed).sum();
            tracing::info!(
                "Fetch phase done: {} pages from {} sources ({} ended early)",
                pages,
                outcomes.len(),
                failed
            );
        }
        Err(e) => tracing::error!("Fetch coordinator aborted: {}", e),
    }

    aggregate(per_page, config.harvester.top_n)
}
