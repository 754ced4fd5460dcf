//! Fetch worker
//!
//! A worker owns one session and walks one site's paginated search results:
//! - opens the search URL
//! - snapshots every page onto the page channel
//! - follows the site's "next page" control until it disappears
//!
//! Any session failure ends the walk for that worker only. Pages already
//! pushed stay valid.

use crate::crawler::channel::{PageSender, PageSnapshot};
use crate::crawler::completion::ActiveWorkers;
use crate::session::{Session, SessionFactory};
use crate::sites::{Site, SourceTarget};
use crate::SessionError;
use std::sync::Arc;
use std::time::Duration;

/// Per-worker traversal limits
#[derive(Debug, Clone, Copy)]
pub struct WorkerSettings {
    /// Wait before each snapshot so late scripts can settle
    pub page_settle: Duration,

    /// Upper bound on pages visited by one worker
    pub max_pages: u32,
}

/// How a worker's traversal ended
#[derive(Debug)]
pub struct FetchOutcome {
    /// The site the worker was assigned
    pub site: Site,

    /// Number of snapshots pushed to the page channel
    pub pages_pushed: u32,

    /// The render failure that ended the walk, if any
    pub error: Option<SessionError>,
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs one fetch worker to completion
///
/// The worker is counted in `active` for its whole lifetime, and the session
/// it creates is closed exactly once on every exit path.
pub async fn run_worker(
    target: SourceTarget,
    factory: Arc<dyn SessionFactory>,
    pages: PageSender,
    active: ActiveWorkers,
    settings: WorkerSettings,
) -> FetchOutcome {
    let _guard = active.register();
    let mut pushed = 0;

    let mut session = match factory.create().await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(
                "Session for {} could not be started, its results will be missing: {}",
                target.site,
                e
            );
            return FetchOutcome {
                site: target.site,
                pages_pushed: 0,
                error: Some(e),
            };
        }
    };

    let result = traverse(&target, session.as_mut(), &pages, settings, &mut pushed).await;

    if let Err(e) = session.close().await {
        tracing::debug!("Closing session for {} failed: {}", target.site, e);
    }

    match &result {
        Ok(()) => tracing::info!("{}: {} pages harvested", target.site, pushed),
        Err(e) => tracing::warn!(
            "{}: harvest ended early after {} pages, results will be incomplete: {}",
            target.site,
            pushed,
            e
        ),
    }

    FetchOutcome {
        site: target.site,
        pages_pushed: pushed,
        error: result.err(),
    }
}

/// Walks the result pages of one target
async fn traverse(
    target: &SourceTarget,
    session: &mut dyn Session,
    pages: &PageSender,
    settings: WorkerSettings,
    pushed: &mut u32,
) -> Result<(), SessionError> {
    session.open(&target.url).await?;

    let mut visited = 0;
    loop {
        tokio::time::sleep(settings.page_settle).await;

        let page = session.snapshot().await?;
        visited += 1;

        if !page.markup.is_empty() {
            let delivered = pages.push(PageSnapshot {
                source_url: page.current_url.clone(),
                markup: page.markup,
            });
            if !delivered {
                tracing::debug!("Page reader gone, stopping {}", target.site);
                return Ok(());
            }
            *pushed += 1;
        }

        if visited >= settings.max_pages {
            tracing::info!(
                "{}: stopping after {} pages (max-pages)",
                target.site,
                visited
            );
            return Ok(());
        }

        let Some(site) = Site::classify(&page.current_url) else {
            tracing::warn!(
                "{}: landed on unknown site {}, stopping pagination",
                target.site,
                page.current_url
            );
            return Ok(());
        };

        let next = site.next_page_selector();
        if !session.element_present(next).await? {
            tracing::debug!("{}: final page reached", site);
            return Ok(());
        }

        tracing::trace!("{}: following '{}'", site, next);
        session.click(next).await?;
    }
}
