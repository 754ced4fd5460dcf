//! Fetch coordinator
//!
//! Launches one fetch worker per source target, staggered so that each new
//! session is bound before the next one starts, then joins every worker and
//! ends the page stream. The coordinator never fails outward: when every
//! worker fails the end marker is still sent and the harvest comes up empty.

use crate::config::HarvesterConfig;
use crate::crawler::channel::PageSender;
use crate::crawler::completion::ActiveWorkers;
use crate::crawler::fetcher::{run_worker, FetchOutcome, WorkerSettings};
use crate::session::SessionFactory;
use crate::sites::SourceTarget;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};

/// Dispatches fetch workers and detects when all of them are done
pub struct FetchCoordinator {
    factory: Arc<dyn SessionFactory>,
    active: ActiveWorkers,
    launch_stagger: Duration,
    settings: WorkerSettings,
}

impl FetchCoordinator {
    /// Creates a coordinator that draws sessions from `factory`
    pub fn new(factory: Arc<dyn SessionFactory>, config: &HarvesterConfig) -> Self {
        Self {
            factory,
            active: ActiveWorkers::new(),
            launch_stagger: config.launch_stagger(),
            settings: WorkerSettings {
                page_settle: config.page_settle(),
                max_pages: config.max_pages,
            },
        }
    }

    /// Handle on the live worker count
    pub fn active_workers(&self) -> ActiveWorkers {
        self.active.clone()
    }

    /// Starts the fetch phase in the background
    ///
    /// Workers are launched one per target with the configured stagger. The
    /// returned task resolves once every worker has exited, after `pages`
    /// has been finished with a single end marker.
    pub fn spawn(self, frontier: Vec<SourceTarget>, pages: PageSender) -> JoinHandle<Vec<FetchOutcome>> {
        tokio::spawn(async move {
            let mut workers = JoinSet::new();

            for (index, target) in frontier.into_iter().enumerate() {
                if index > 0 {
                    tokio::time::sleep(self.launch_stagger).await;
                }
                tracing::info!("Launching worker for {}: {}", target.site, target.url);
                workers.spawn(run_worker(
                    target,
                    Arc::clone(&self.factory),
                    pages.clone(),
                    self.active.clone(),
                    self.settings,
                ));
            }

            tracing::info!("Waiting on website responses...");
            let mut outcomes = Vec::with_capacity(workers.len());
            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => tracing::error!("Fetch worker aborted: {}", e),
                }
                tracing::debug!("{} fetch workers still active", self.active.count());
            }

            pages.finish();
            outcomes
        })
    }
}
