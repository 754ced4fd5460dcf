//! Scripted in-memory sessions
//!
//! A [`MockSession`] picks its script when it is opened, by classifying the
//! URL it is sent to. Each script is a list of result pages; the "next page"
//! control is present on every page but the last.

use async_trait::async_trait;
use gpu_harvest::session::{RenderedPage, Session, SessionFactory};
use gpu_harvest::{Site, SessionError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Where a scripted session breaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    Open,
    /// Snapshot of the page with this zero-based index fails
    Snapshot(usize),
    /// Clicking "next" on the page with this index fails
    Click(usize),
}

#[derive(Debug, Clone)]
pub struct Script {
    pub pages: Vec<String>,
    pub failure: Failure,
    /// Keep offering a next page after the last one, repeating it
    pub endless: bool,
}

impl Script {
    pub fn pages(pages: Vec<String>) -> Self {
        Self {
            pages,
            failure: Failure::None,
            endless: false,
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            pages: vec![String::from("<html></html>")],
            failure,
            endless: false,
        }
    }
}

/// Counters shared by every session of a factory
#[derive(Debug, Default)]
pub struct Calls {
    pub created: AtomicUsize,
    pub closed: AtomicUsize,
    pub clicks: AtomicUsize,
}

pub struct MockFactory {
    scripts: Arc<HashMap<Site, Script>>,
    pub calls: Arc<Calls>,
    fail_create: bool,
}

impl MockFactory {
    pub fn new(scripts: HashMap<Site, Script>) -> Self {
        Self {
            scripts: Arc::new(scripts),
            calls: Arc::new(Calls::default()),
            fail_create: false,
        }
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::new(HashMap::new())
        }
    }
}

#[async_trait]
impl SessionFactory for MockFactory {
    async fn create(&self) -> Result<Box<dyn Session>, SessionError> {
        if self.fail_create {
            return Err(SessionError::Navigation {
                url: String::new(),
                reason: "driver failed to start".to_string(),
            });
        }
        self.calls.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            scripts: Arc::clone(&self.scripts),
            calls: Arc::clone(&self.calls),
            current: None,
        }))
    }
}

pub struct MockSession {
    scripts: Arc<HashMap<Site, Script>>,
    calls: Arc<Calls>,
    current: Option<(Site, String, usize)>,
}

impl MockSession {
    fn state(&self) -> Result<(&Script, &str, usize), SessionError> {
        let (site, base, index) = self.current.as_ref().ok_or(SessionError::NotOpen)?;
        let script = self.scripts.get(site).ok_or(SessionError::NotOpen)?;
        Ok((script, base.as_str(), *index))
    }
}

#[async_trait]
impl Session for MockSession {
    async fn open(&mut self, url: &str) -> Result<(), SessionError> {
        let site = Site::classify(url).ok_or_else(|| SessionError::Navigation {
            url: url.to_string(),
            reason: "unknown site".to_string(),
        })?;
        let script = self.scripts.get(&site).ok_or_else(|| SessionError::Timeout {
            url: url.to_string(),
        })?;
        if script.failure == Failure::Open {
            return Err(SessionError::Timeout {
                url: url.to_string(),
            });
        }
        self.current = Some((site, url.to_string(), 0));
        Ok(())
    }

    async fn snapshot(&mut self) -> Result<RenderedPage, SessionError> {
        let (script, base, index) = self.state()?;
        if script.failure == Failure::Snapshot(index) {
            return Err(SessionError::Navigation {
                url: base.to_string(),
                reason: "renderer crashed".to_string(),
            });
        }
        let markup = script.pages[index.min(script.pages.len() - 1)].clone();
        Ok(RenderedPage {
            markup,
            current_url: format!("{base}&page={}", index + 1),
        })
    }

    async fn element_present(&mut self, _selector: &str) -> Result<bool, SessionError> {
        let (script, _, index) = self.state()?;
        Ok(script.endless || index + 1 < script.pages.len())
    }

    async fn click(&mut self, selector: &str) -> Result<(), SessionError> {
        let (script, _, index) = self.state()?;
        if script.failure == Failure::Click(index) {
            return Err(SessionError::ElementNotFound(selector.to_string()));
        }
        self.calls.clicks.fetch_add(1, Ordering::SeqCst);
        if let Some((_, _, index)) = self.current.as_mut() {
            *index += 1;
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.calls.closed.fetch_add(1, Ordering::SeqCst);
        self.current = None;
        Ok(())
    }
}

// ===== Markup builders =====

pub fn newegg_item(link: &str, title: &str, dollars: &str) -> String {
    format!(
        r#"<div class="item-cell">
             <a href="{link}"><img src="card.jpg"></a>
             <a class="item-title">{title}</a>
             <ul class="price"><li class="price-current">$<strong>{dollars}</strong><sup>.99</sup></li></ul>
           </div>"#
    )
}

pub fn pcc_item(href: &str, desc: &str, price: &str, stock: &str) -> String {
    format!(
        r#"<div class="position-relative d-flex flex-column h-full p-1rem border">
             <a class="d-flex justify-content-center" href="{href}"><img></a>
             <p class="GridDescription-Clamped mb-0 fs-xs">{desc}</p>
             <p class="mb-0 mt-0.5rem text-red-500 fw-bolder fs-2xl text-center">{price}</p>
             <div class="position-relative mt-0.875rem"><p>{stock}</p></div>
           </div>"#
    )
}

pub fn mex_item(href: &str, desc: &str, price: &str) -> String {
    format!(
        r#"<div class="c-shca-list-item">
             <a class="c-shca-list-item__body-main" href="{href}">{desc}</a>
             <div class="c-shca-list-item__price-listed">{price}</div>
           </div>"#
    )
}

pub fn results_page(items: &[String]) -> String {
    format!("<html><body><main>{}</main></body></html>", items.join("\n"))
}
