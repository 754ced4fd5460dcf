//! Per-site extraction rules
//!
//! Each rule set is plain data. The CSS selectors mirror the class names the
//! stores render today and break whenever a store reshuffles its markup.

/// How the product link of an item is located and made absolute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRule {
    /// First anchor of the item; its `href` is already absolute
    FirstAnchor,
    /// Anchor matching the selector; its `href` is joined onto the site base URL
    Relative(&'static str),
}

/// How the price text is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceEncoding {
    /// A `$123.45` figure somewhere in the element text
    Listed,
    /// Dollars in a `<strong>` child, cents always rendered as `.99`
    DollarsWithFixedCents,
}

/// How the stock status of an item is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockRule {
    /// Text of the matched element is the status label
    Label(&'static str),
    /// A matching promo badge means the item is out of stock
    PromoBadge(&'static str),
    /// The search only covers online-store inventory
    AlwaysInStock,
}

/// Which items of a results page are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relevance {
    /// The product id must appear in the item link
    LinkContainsProduct,
    /// The search is already scoped to the product category
    AlwaysRelevant,
}

/// Selectors and rules used to read one site's search results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRuleSet {
    pub item: &'static str,
    pub link: LinkRule,
    pub price: &'static str,
    pub price_encoding: PriceEncoding,
    pub description: &'static str,
    pub stock: StockRule,
    pub condition: &'static str,
    pub relevance: Relevance,
    pub next_page: &'static str,
}

/// Open-box and refurbished marker shared by every site
const CONDITION_LABEL: &str = ".item-open-box-italic";

pub(crate) static PC_CANADA: ExtractionRuleSet = ExtractionRuleSet {
    item: ".position-relative.d-flex.flex-column.h-full.p-1rem.border",
    link: LinkRule::Relative("a.d-flex.justify-content-center"),
    price: ".mb-0.mt-0\\.5rem.text-red-500.fw-bolder.fs-2xl.text-center",
    price_encoding: PriceEncoding::Listed,
    description: ".GridDescription-Clamped.mb-0.fs-xs",
    stock: StockRule::Label("div.position-relative.mt-0\\.875rem p"),
    condition: CONDITION_LABEL,
    relevance: Relevance::LinkContainsProduct,
    next_page: ".ais-Pagination-item--nextPage a",
};

pub(crate) static MEMORY_EXPRESS: ExtractionRuleSet = ExtractionRuleSet {
    item: ".c-shca-list-item",
    link: LinkRule::Relative("a.c-shca-list-item__body-main"),
    price: ".c-shca-list-item__price-listed",
    price_encoding: PriceEncoding::Listed,
    description: ".c-shca-list-item__body-main",
    stock: StockRule::AlwaysInStock,
    condition: CONDITION_LABEL,
    relevance: Relevance::AlwaysRelevant,
    next_page: ".AJAX_List_Pager_Next a",
};

pub(crate) static NEWEGG: ExtractionRuleSet = ExtractionRuleSet {
    item: ".item-cell",
    link: LinkRule::FirstAnchor,
    price: ".price-current",
    price_encoding: PriceEncoding::DollarsWithFixedCents,
    description: ".item-title",
    stock: StockRule::PromoBadge(".item-promo"),
    condition: CONDITION_LABEL,
    relevance: Relevance::LinkContainsProduct,
    next_page: "button[title='Next']:not([disabled])",
};
