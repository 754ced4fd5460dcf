//! Known retail sources
//!
//! Every page the harvester touches belongs to one of three fixed sites. This
//! module classifies URLs to a [`Site`], carries each site's immutable
//! extraction rules, and builds the frontier of search targets.

mod frontier;
mod rules;

pub use frontier::{build_frontier, ProductId, SourceTarget};
pub use rules::{ExtractionRuleSet, LinkRule, PriceEncoding, Relevance, StockRule};

use std::fmt;
use url::Url;

/// One of the retail sources the harvester knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    PcCanada,
    MemoryExpress,
    Newegg,
}

impl Site {
    /// All known sites, in launch order
    pub const ALL: [Site; 3] = [Site::PcCanada, Site::MemoryExpress, Site::Newegg];

    /// Classifies a URL by the host fragment of its site
    ///
    /// Returns `None` for anything that is not one of the three known hosts.
    ///
    /// # Example
    ///
    /// ```
    /// use gpu_harvest::Site;
    ///
    /// assert_eq!(Site::classify("https://www.newegg.ca/p/pl?N=1"), Some(Site::Newegg));
    /// assert_eq!(Site::classify("https://example.com/"), None);
    /// ```
    pub fn classify(url: &str) -> Option<Site> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?.to_ascii_lowercase();

        Site::ALL
            .into_iter()
            .find(|site| host.contains(site.host_fragment()))
    }

    /// Fragment of the host name that identifies this site
    pub fn host_fragment(&self) -> &'static str {
        match self {
            Site::PcCanada => "canada",
            Site::MemoryExpress => "memory",
            Site::Newegg => "newegg",
        }
    }

    /// Human readable store name
    pub fn name(&self) -> &'static str {
        match self {
            Site::PcCanada => "PC-Canada",
            Site::MemoryExpress => "MemoryExpress",
            Site::Newegg => "Newegg",
        }
    }

    /// Base URL that relative product links are resolved against
    pub fn base_url(&self) -> &'static str {
        match self {
            Site::PcCanada => "https://www.pc-canada.com/",
            Site::MemoryExpress => "https://www.memoryexpress.com/",
            Site::Newegg => "https://www.newegg.ca/",
        }
    }

    /// Selector of the "next page" control in this site's search results
    pub fn next_page_selector(&self) -> &'static str {
        self.rules().next_page
    }

    /// The immutable extraction rules for this site
    pub fn rules(&self) -> &'static ExtractionRuleSet {
        match self {
            Site::PcCanada => &rules::PC_CANADA,
            Site::MemoryExpress => &rules::MEMORY_EXPRESS,
            Site::Newegg => &rules::NEWEGG,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
