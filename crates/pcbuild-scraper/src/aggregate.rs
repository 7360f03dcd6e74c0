//! Fan-out search across every registered retailer.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;

use crate::client::PriceClient;
use crate::error::ScraperError;
use crate::site::SiteRegistry;
use crate::types::{AggregateResponse, ProductRecord, SearchStats};

/// Runs one search against every site in a [`SiteRegistry`] and merges the
/// results.
///
/// Cheap to clone; the registry and HTTP connection pool are shared.
#[derive(Debug, Clone)]
pub struct Aggregator {
    registry: Arc<SiteRegistry>,
    client: PriceClient,
}

impl Aggregator {
    #[must_use]
    pub fn new(registry: Arc<SiteRegistry>, client: PriceClient) -> Self {
        Self { registry, client }
    }

    #[must_use]
    pub fn registry(&self) -> &SiteRegistry {
        &self.registry
    }

    /// Searches every site concurrently and returns the merged, price-sorted
    /// result.
    ///
    /// Each site runs in its own task and the call returns only once all of
    /// them have settled. A site that errors, times out or panics contributes
    /// no products; the others are unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::TaskJoin`] if a site task was cancelled before
    /// completing, which only happens while the runtime is shutting down.
    pub async fn aggregate(&self, query: &str) -> Result<AggregateResponse, ScraperError> {
        let started = Instant::now();
        let sites = self.registry.sites();
        tracing::info!(query, sites = sites.len(), "starting price search");

        let handles = sites.iter().map(|site| {
            let site = Arc::clone(site);
            let client = self.client.clone();
            let query = query.to_owned();
            tokio::spawn(async move { site.fetch_and_parse(&client, &query).await })
        });
        let outcomes = join_all(handles).await;

        let mut products: Vec<ProductRecord> = Vec::new();
        for (site, outcome) in sites.iter().zip(outcomes) {
            match outcome {
                Ok(records) => {
                    tracing::debug!(
                        site = site.name(),
                        count = records.len(),
                        "site search settled"
                    );
                    products.extend(records);
                }
                Err(e) if e.is_panic() => {
                    tracing::error!(
                        site = site.name(),
                        error = %e,
                        "site search panicked; site contributes no products"
                    );
                }
                Err(e) => {
                    return Err(ScraperError::TaskJoin {
                        site: site.name().to_owned(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let response = summarize(query, sites.len(), products);
        tracing::info!(
            query,
            products = response.stats.total_products,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "price search finished"
        );
        Ok(response)
    }
}

/// Orders `products` by ascending price and computes the summary stats.
///
/// The sort is stable, so listings with equal prices keep their site order
/// and, within a site, their document order.
#[must_use]
pub fn summarize(
    query: &str,
    total_sites: usize,
    mut products: Vec<ProductRecord>,
) -> AggregateResponse {
    products.sort_by_key(|p| p.price_num);

    let stats = SearchStats {
        total_products: products.len(),
        total_sites,
        lowest_price: products.first().map(|p| p.price_num),
        highest_price: products.last().map(|p| p.price_num),
    };

    AggregateResponse {
        query: query.to_owned(),
        stats,
        products,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(store: &str, title: &str, price_num: u64) -> ProductRecord {
        ProductRecord {
            title: title.to_owned(),
            price: crate::price::format_price(price_num),
            price_num,
            link: format!("https://{store}.example.com/{title}"),
            image: None,
            store: store.to_owned(),
            store_color: "#000000".to_owned(),
        }
    }

    #[test]
    fn summarize_sorts_ascending_and_reports_bounds() {
        let response = summarize(
            "ssd",
            3,
            vec![
                record("a", "ssd-1tb", 9_500),
                record("b", "ssd-256", 2_800),
                record("c", "ssd-512", 4_200),
            ],
        );
        let prices: Vec<u64> = response.products.iter().map(|p| p.price_num).collect();
        assert_eq!(prices, [2_800, 4_200, 9_500]);
        assert_eq!(response.stats.lowest_price, Some(2_800));
        assert_eq!(response.stats.highest_price, Some(9_500));
        assert_eq!(response.stats.total_products, 3);
        assert_eq!(response.stats.total_sites, 3);
    }

    #[test]
    fn summarize_keeps_input_order_for_equal_prices() {
        let response = summarize(
            "ram",
            2,
            vec![
                record("a", "first", 5_000),
                record("a", "second", 5_000),
                record("b", "third", 5_000),
                record("b", "cheap", 1_000),
            ],
        );
        let titles: Vec<&str> = response.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["cheap", "first", "second", "third"]);
    }

    #[test]
    fn summarize_empty_has_null_bounds() {
        let response = summarize("nothing", 3, Vec::new());
        assert_eq!(response.stats.total_products, 0);
        assert_eq!(response.stats.total_sites, 3);
        assert_eq!(response.stats.lowest_price, None);
        assert_eq!(response.stats.highest_price, None);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["stats"]["lowestPrice"].is_null());
        assert!(json["stats"]["highestPrice"].is_null());
    }

    #[test]
    fn summarize_preserves_query_verbatim() {
        let response = summarize("  RTX 4060 Ti ", 1, Vec::new());
        assert_eq!(response.query, "  RTX 4060 Ti ");
    }
}
