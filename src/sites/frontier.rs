//! Source frontier: the fixed set of search targets for one query

use crate::sites::Site;
use crate::HarvestError;
use std::fmt;

/// A product model number, digits only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductId(String);

impl ProductId {
    /// Validates and wraps a product id
    ///
    /// # Example
    ///
    /// ```
    /// use gpu_harvest::ProductId;
    ///
    /// assert!(ProductId::new("3060").is_ok());
    /// assert!(ProductId::new("rtx 3060").is_err());
    /// ```
    pub fn new(raw: &str) -> Result<Self, HarvestError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(HarvestError::InvalidProductId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One search to run against one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTarget {
    pub site: Site,
    pub url: String,
    pub product_id: ProductId,
    pub include_used: bool,
}

impl SourceTarget {
    fn new(site: Site, product_id: &ProductId, include_used: bool) -> Self {
        let id = product_id.as_str();
        let url = match site {
            Site::PcCanada => {
                format!("https://www.pc-canada.com/s/?query={id}&productType=Graphic%20Card")
            }
            Site::MemoryExpress => format!(
                "https://www.memoryexpress.com/Category/VideoCards?FilterID=b9021f59-29a3-73a7-59b5-125edab939f2&InventoryType=InStock&Inventory=OnlineStore&Search={id}&ViewMode=List"
            ),
            // Only Newegg lists open-box and refurbished cards; N=4814 restricts to new
            Site::Newegg if include_used => {
                format!("https://www.newegg.ca/p/pl?N=100007708&SrchInDesc={id}")
            }
            Site::Newegg => {
                format!("https://www.newegg.ca/p/pl?N=100007708%204814&SrchInDesc={id}")
            }
        };

        Self {
            site,
            url,
            product_id: product_id.clone(),
            include_used,
        }
    }
}

/// Builds the three search targets for a query, one per known site
pub fn build_frontier(product_id: &ProductId, include_used: bool) -> Vec<SourceTarget> {
    Site::ALL
        .into_iter()
        .map(|site| SourceTarget::new(site, product_id, include_used))
        .collect()
}
