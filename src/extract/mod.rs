//! Site-adaptive listing extractor
//!
//! [`extract_records`] is a pure function of a page snapshot and the queried
//! product id. It classifies the page to a known site, then reads every item
//! container with that site's rule set. A page whose markup is missing a
//! structural element yields an error and contributes no records; items with
//! an unreadable price are skipped individually.

mod fields;
mod record;

pub use fields::{capacity, dollars_with_fixed_cents, is_variant_ti, listed_price};
pub use record::{Capacity, GpuRecord, Price, StockStatus};

use crate::crawler::PageSnapshot;
use crate::sites::{ExtractionRuleSet, LinkRule, PriceEncoding, ProductId, Relevance, Site, StockRule};
use crate::ExtractError;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A site's rule set with every selector parsed
struct CompiledRules {
    item: Selector,
    link: Selector,
    price: Selector,
    dollars: Selector,
    description: Selector,
    stock: Option<Selector>,
    condition: Selector,
}

impl CompiledRules {
    fn compile(rules: &ExtractionRuleSet) -> Self {
        let link = match rules.link {
            LinkRule::FirstAnchor => "a",
            LinkRule::Relative(css) => css,
        };
        let stock = match rules.stock {
            StockRule::Label(css) | StockRule::PromoBadge(css) => Some(selector(css)),
            StockRule::AlwaysInStock => None,
        };

        Self {
            item: selector(rules.item),
            link: selector(link),
            price: selector(rules.price),
            dollars: selector("strong"),
            description: selector(rules.description),
            stock,
            condition: selector(rules.condition),
        }
    }
}

// Rule set selectors are constants covered by the rules tests
fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector '{css}': {e:?}"))
}

static PC_CANADA: Lazy<CompiledRules> = Lazy::new(|| CompiledRules::compile(Site::PcCanada.rules()));
static MEMORY_EXPRESS: Lazy<CompiledRules> =
    Lazy::new(|| CompiledRules::compile(Site::MemoryExpress.rules()));
static NEWEGG: Lazy<CompiledRules> = Lazy::new(|| CompiledRules::compile(Site::Newegg.rules()));

fn compiled(site: Site) -> &'static CompiledRules {
    match site {
        Site::PcCanada => &PC_CANADA,
        Site::MemoryExpress => &MEMORY_EXPRESS,
        Site::Newegg => &NEWEGG,
    }
}

/// Extracts every relevant listing from one results page
///
/// # Arguments
///
/// * `snapshot` - The rendered page and the URL it came from
/// * `product_id` - The queried model number
///
/// # Returns
///
/// * `Ok(Vec<GpuRecord>)` - Listings found, possibly none
/// * `Err(ExtractError)` - The page could not be read; it yields nothing
pub fn extract_records(
    snapshot: &PageSnapshot,
    product_id: &ProductId,
) -> Result<Vec<GpuRecord>, ExtractError> {
    let site = Site::classify(&snapshot.source_url)
        .ok_or_else(|| ExtractError::UnknownSite(snapshot.source_url.clone()))?;
    let page = SitePage {
        site,
        rules: site.rules(),
        selectors: compiled(site),
    };

    let document = Html::parse_document(&snapshot.markup);
    let mut records = Vec::new();
    for item in document.select(&page.selectors.item) {
        if let Some(record) = page.read_item(item, product_id)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// Everything needed to read items of one site
struct SitePage {
    site: Site,
    rules: &'static ExtractionRuleSet,
    selectors: &'static CompiledRules,
}

impl SitePage {
    fn missing(&self, element: &'static str) -> ExtractError {
        ExtractError::MissingElement {
            site: self.site,
            element,
        }
    }

    fn first<'a>(&self, item: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
        item.select(selector).next()
    }

    /// Reads one item; `Ok(None)` means the item is skipped
    fn read_item(
        &self,
        item: ElementRef<'_>,
        product_id: &ProductId,
    ) -> Result<Option<GpuRecord>, ExtractError> {
        let Some(link) = self.link(item)? else {
            return Ok(None);
        };

        let relevant = match self.rules.relevance {
            Relevance::AlwaysRelevant => true,
            Relevance::LinkContainsProduct => link.contains(product_id.as_str()),
        };
        if !relevant {
            return Ok(None);
        }

        let description = self
            .first(item, &self.selectors.description)
            .map(fields::text_of)
            .ok_or_else(|| self.missing("description"))?;

        // Structural lookups run before an unreadable price can skip the item.
        let price = self.price(item)?;
        let stock_status = self.stock(item)?;
        let Some(price) = price else {
            tracing::trace!("{}: unreadable price for {}", self.site, link);
            return Ok(None);
        };

        let condition = fields::condition(
            self.first(item, &self.selectors.condition)
                .map(fields::text_of),
        );

        Ok(Some(GpuRecord {
            price,
            capacity: fields::capacity(&description),
            is_variant_ti: fields::is_variant_ti(&description),
            stock_status,
            condition,
            link,
        }))
    }

    fn link(&self, item: ElementRef<'_>) -> Result<Option<String>, ExtractError> {
        let anchor = self
            .first(item, &self.selectors.link)
            .ok_or_else(|| self.missing("product link"))?;
        let href = anchor
            .value()
            .attr("href")
            .ok_or_else(|| self.missing("product link href"))?
            .trim();

        let link = match self.rules.link {
            LinkRule::FirstAnchor => Some(href.to_string()),
            LinkRule::Relative(_) => Url::parse(self.site.base_url())
                .and_then(|base| base.join(href))
                .map(|url| url.to_string())
                .ok(),
        };
        Ok(link.filter(|l| !l.is_empty()))
    }

    fn price(&self, item: ElementRef<'_>) -> Result<Option<Price>, ExtractError> {
        let element = self
            .first(item, &self.selectors.price)
            .ok_or_else(|| self.missing("price"))?;

        match self.rules.price_encoding {
            PriceEncoding::Listed => Ok(fields::listed_price(&fields::text_of(element))),
            PriceEncoding::DollarsWithFixedCents => {
                let dollars = self
                    .first(element, &self.selectors.dollars)
                    .ok_or_else(|| self.missing("price dollars"))?;
                Ok(fields::dollars_with_fixed_cents(&fields::text_of(dollars)))
            }
        }
    }

    fn stock(&self, item: ElementRef<'_>) -> Result<StockStatus, ExtractError> {
        let found = self
            .selectors
            .stock
            .as_ref()
            .and_then(|selector| self.first(item, selector));

        match self.rules.stock {
            StockRule::Label(_) => found
                .map(|label| fields::stock_from_label(&fields::text_of(label)))
                .ok_or_else(|| self.missing("stock label")),
            StockRule::PromoBadge(_) if found.is_some() => Ok(StockStatus::OutOfStock),
            StockRule::PromoBadge(_) | StockRule::AlwaysInStock => Ok(StockStatus::InStock),
        }
    }
}
