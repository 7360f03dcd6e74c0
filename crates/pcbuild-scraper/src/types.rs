//! Output contract of the price search pipeline.
//!
//! Field names serialize in camelCase (`priceNum`, `storeColor`,
//! `totalProducts`, ...) because the browser front end reads them directly.

use serde::{Deserialize, Serialize};

/// One product listing scraped from a retailer's search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Listing title, whitespace-collapsed and capped at 80 characters.
    pub title: String,

    /// Display price, e.g. `"৳ 1,25,000"`.
    pub price: String,

    /// Numeric price in taka. Always within the accepted price window.
    pub price_num: u64,

    /// Absolute URL of the product page.
    pub link: String,

    /// Absolute thumbnail URL, `None` when the listing has no usable image.
    pub image: Option<String>,

    /// Display name of the retailer.
    pub store: String,

    /// CSS color associated with the retailer.
    pub store_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    pub total_products: usize,
    /// Number of configured sites, whether or not they answered.
    pub total_sites: usize,
    pub lowest_price: Option<u64>,
    pub highest_price: Option<u64>,
}

/// Merged result of one search across every configured site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub query: String,
    pub stats: SearchStats,
    /// Sorted ascending by `price_num`; equal prices keep site order.
    pub products: Vec<ProductRecord>,
}
