//! Browsing session capability
//!
//! A fetch worker drives exactly one [`Session`] through a site's paginated
//! search results. The worker owns the session by value, so a session is
//! never shared between workers. Sessions come from a [`SessionFactory`].
//!
//! [`HttpSession`] is the bundled backend: it renders pages with a plain HTTP
//! client and treats a click as following the matched anchor's `href`.

mod http;

pub use http::{build_http_client, HttpSession, HttpSessionFactory};

use crate::SessionResult;
use async_trait::async_trait;

/// The rendered state of the page a session is currently on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Full page markup
    pub markup: String,

    /// URL the session ended up on, after redirects or navigation
    pub current_url: String,
}

/// One browsing session
///
/// Every operation may fail; callers treat any error as the end of the
/// traversal for that session.
#[async_trait]
pub trait Session: Send {
    /// Navigates to `url`
    async fn open(&mut self, url: &str) -> SessionResult<()>;

    /// Captures the markup and URL of the current page
    async fn snapshot(&mut self) -> SessionResult<RenderedPage>;

    /// Returns true if at least one element matches `selector`
    async fn element_present(&mut self, selector: &str) -> SessionResult<bool>;

    /// Activates the first element matching `selector`
    async fn click(&mut self, selector: &str) -> SessionResult<()>;

    /// Releases the session; no other call is valid afterwards
    async fn close(&mut self) -> SessionResult<()>;
}

/// Produces fresh, independent sessions
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn create(&self) -> SessionResult<Box<dyn Session>>;
}
