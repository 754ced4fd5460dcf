use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for gpu-harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub harvester: HarvesterConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Pipeline timing and pool configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HarvesterConfig {
    /// Delay between launching two fetch workers (milliseconds)
    pub launch_stagger_ms: u64,

    /// Delay before each snapshot of a page (milliseconds)
    pub page_settle_ms: u64,

    /// Maximum number of pages a single worker will traverse
    pub max_pages: u32,

    /// Number of concurrent extraction tasks
    pub parse_workers: usize,

    /// Bounded wait for a single extraction result (seconds)
    pub result_timeout_secs: u64,

    /// Number of records exposed per ranked list
    pub top_n: usize,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            launch_stagger_ms: 1500,
            page_settle_ms: 1000,
            max_pages: 50,
            parse_workers: 3,
            result_timeout_secs: 10,
            top_n: 10,
        }
    }
}

impl HarvesterConfig {
    pub fn launch_stagger(&self) -> Duration {
        Duration::from_millis(self.launch_stagger_ms)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_millis(self.page_settle_ms)
    }

    pub fn result_timeout(&self) -> Duration {
        Duration::from_secs(self.result_timeout_secs)
    }
}

/// Settings for the HTTP-backed session
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionConfig {
    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}
