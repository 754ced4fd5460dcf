//! Parse coordinator
//!
//! Drains the page channel and hands every snapshot to a bounded pool of
//! blocking extraction tasks. The pool is sized to the number of sources so
//! that one site's backlog cannot starve another's.

use crate::config::HarvesterConfig;
use crate::crawler::channel::{PageMessage, PageReceiver, PageSnapshot};
use crate::extract::{extract_records, GpuRecord};
use crate::sites::ProductId;
use crate::ExtractError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Extraction task handle together with the page it is reading
type PendingPage = (String, JoinHandle<Result<Vec<GpuRecord>, ExtractError>>);

/// Function run on the blocking pool for every page
pub(crate) type Extractor = fn(&PageSnapshot, &ProductId) -> Result<Vec<GpuRecord>, ExtractError>;

/// Reads pages off the channel and extracts them in parallel
#[derive(Clone)]
pub struct ParseCoordinator {
    workers: usize,
    result_timeout: Duration,
    extract: Extractor,
}

impl std::fmt::Debug for ParseCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseCoordinator")
            .field("workers", &self.workers)
            .field("result_timeout", &self.result_timeout)
            .finish_non_exhaustive()
    }
}

impl ParseCoordinator {
    pub fn new(config: &HarvesterConfig) -> Self {
        Self::with_extractor(config.parse_workers, config.result_timeout(), extract_records)
    }

    pub(crate) fn with_extractor(workers: usize, result_timeout: Duration, extract: Extractor) -> Self {
        Self {
            workers,
            result_timeout,
            extract,
        }
    }

    /// Consumes the page stream and returns one record list per page
    ///
    /// Reading stops at the end marker. Every submitted task is then awaited
    /// with a bounded wait; a page whose extraction fails, panics or times out
    /// contributes no records and does not affect the others.
    pub async fn drain(&self, mut pages: PageReceiver, product_id: &ProductId) -> Vec<Vec<GpuRecord>> {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut pending: Vec<PendingPage> = Vec::new();

        while let Some(message) = pages.recv().await {
            let snapshot = match message {
                PageMessage::Page(snapshot) => snapshot,
                PageMessage::End => break,
            };

            let permit = match Arc::clone(&permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!("Parse pool closed unexpectedly: {}", e);
                    break;
                }
            };

            let id = product_id.clone();
            let extract = self.extract;
            let url = snapshot.source_url.clone();
            tracing::debug!("Submitting {} for extraction", url);
            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                extract(&snapshot, &id)
            });
            pending.push((url, handle));
        }

        tracing::info!("Parsing {} pages", pending.len());
        let mut per_page = Vec::with_capacity(pending.len());
        for (url, handle) in pending {
            let records = match tokio::time::timeout(self.result_timeout, handle).await {
                Ok(Ok(Ok(records))) => {
                    if records.is_empty() {
                        tracing::info!("No matching listings on {}", url);
                    }
                    records
                }
                Ok(Ok(Err(e))) => {
                    tracing::warn!("Extraction failed for {}, page skipped: {}", url, e);
                    Vec::new()
                }
                Ok(Err(e)) => {
                    tracing::warn!("Extraction task for {} aborted: {}", url, e);
                    Vec::new()
                }
                Err(_) => {
                    tracing::warn!(
                        "Extraction of {} exceeded {:?}, page skipped",
                        url,
                        self.result_timeout
                    );
                    Vec::new()
                }
            };
            per_page.push(records);
        }

        per_page
    }
}
