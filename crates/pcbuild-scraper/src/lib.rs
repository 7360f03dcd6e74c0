//! Multi-retailer price search.
//!
//! A query fans out to every site in a [`SiteRegistry`]; each search page is
//! parsed into [`ProductRecord`]s and the [`Aggregator`] merges them into a
//! price-sorted [`AggregateResponse`].

pub mod aggregate;
pub mod client;
pub mod error;
pub mod normalize;
pub mod price;
pub mod relevance;
pub mod site;
pub mod types;

pub use aggregate::Aggregator;
pub use client::PriceClient;
pub use error::ScraperError;
pub use price::{extract_price, format_price};
pub use relevance::is_relevant;
pub use site::{default_sites, ImageRule, PriceRule, Site, SiteConfig, SiteRegistry, SiteSelectors};
pub use types::{AggregateResponse, ProductRecord, SearchStats};
