//! HTTP-backed session
//!
//! Renders pages with `reqwest` and reads them with `scraper`. There is no
//! script execution: a click only works on an element that is, or contains,
//! an anchor with an `href`.

use crate::config::SessionConfig;
use crate::session::{RenderedPage, Session, SessionFactory};
use crate::{SessionError, SessionResult};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client for sessions
///
/// # Example
///
/// ```no_run
/// use gpu_harvest::config::SessionConfig;
/// use gpu_harvest::session::build_http_client;
///
/// let client = build_http_client(&SessionConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &SessionConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Hands out [`HttpSession`]s sharing one connection pool
#[derive(Debug, Clone)]
pub struct HttpSessionFactory {
    client: Client,
}

impl HttpSessionFactory {
    pub fn new(config: &SessionConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    async fn create(&self) -> SessionResult<Box<dyn Session>> {
        Ok(Box::new(HttpSession::new(self.client.clone())))
    }
}

/// A session that navigates with plain GET requests
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    current: Option<(Url, String)>,
    closed: bool,
}

impl HttpSession {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            current: None,
            closed: false,
        }
    }

    fn ensure_open(&self) -> SessionResult<()> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    fn current(&self) -> SessionResult<&(Url, String)> {
        self.ensure_open()?;
        self.current.as_ref().ok_or(SessionError::NotOpen)
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn open(&mut self, url: &str) -> SessionResult<()> {
        self.ensure_open()?;

        let response = self.client.get(url).send().await.map_err(|e| classify(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Navigation {
                url: url.to_string(),
                reason: format!("HTTP {}", status.as_u16()),
            });
        }

        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| classify(url, e))?;
        tracing::debug!("Opened {} ({} bytes)", final_url, body.len());

        self.current = Some((final_url, body));
        Ok(())
    }

    async fn snapshot(&mut self) -> SessionResult<RenderedPage> {
        let (url, body) = self.current()?;
        Ok(RenderedPage {
            markup: body.clone(),
            current_url: url.to_string(),
        })
    }

    async fn element_present(&mut self, selector: &str) -> SessionResult<bool> {
        let (_, body) = self.current()?;
        let selector = parse_selector(selector)?;
        let document = Html::parse_document(body);
        let present = document.select(&selector).next().is_some();
        Ok(present)
    }

    async fn click(&mut self, selector: &str) -> SessionResult<()> {
        let (url, body) = self.current()?;
        let target = resolve_click_target(body, url, selector)?;
        self.open(target.as_str()).await
    }

    async fn close(&mut self) -> SessionResult<()> {
        self.ensure_open()?;
        self.closed = true;
        self.current = None;
        Ok(())
    }
}

fn parse_selector(css: &str) -> SessionResult<Selector> {
    Selector::parse(css).map_err(|_| SessionError::InvalidSelector(css.to_string()))
}

/// Finds the URL a click on `selector` would navigate to
fn resolve_click_target(body: &str, base: &Url, css: &str) -> SessionResult<Url> {
    let selector = parse_selector(css)?;
    let anchor = parse_selector("a[href]")?;
    let document = Html::parse_document(body);

    let element = document
        .select(&selector)
        .next()
        .ok_or_else(|| SessionError::ElementNotFound(css.to_string()))?;

    let href = element
        .value()
        .attr("href")
        .or_else(|| {
            element
                .select(&anchor)
                .next()
                .and_then(|a| a.value().attr("href"))
        })
        .ok_or_else(|| SessionError::Navigation {
            url: base.to_string(),
            reason: format!("element '{css}' has no link to follow"),
        })?;

    base.join(href.trim()).map_err(|e| SessionError::Navigation {
        url: base.to_string(),
        reason: format!("bad link '{href}': {e}"),
    })
}

fn classify(url: &str, error: reqwest::Error) -> SessionError {
    if error.is_timeout() {
        SessionError::Timeout {
            url: url.to_string(),
        }
    } else {
        SessionError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
