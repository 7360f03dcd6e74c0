//! Per-retailer search adapters.
//!
//! Each retailer is described by a [`SiteConfig`]: identity, origin, search
//! path and a [`SiteSelectors`] table of CSS selector fallbacks. Adding a
//! retailer means adding a config in [`registry`], not new parsing code.
//!
//! A config is compiled once into a [`Site`], which owns the parsed
//! selectors and performs fetch + parse for one query.

mod parse;
mod registry;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use scraper::Selector;

use crate::client::PriceClient;
use crate::error::ScraperError;
use crate::normalize::parse_site_origin;
use crate::types::ProductRecord;

pub use registry::{default_sites, SiteRegistry};

/// Characters left unescaped in a query component (the `encodeURIComponent`
/// set browsers use for search forms).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Static description of one retailer.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub name: &'static str,
    pub color: &'static str,
    /// Scheme + host the search path and relative links resolve against.
    pub origin: String,
    /// Path and query prefix; the encoded search term is appended as-is.
    pub search_path: &'static str,
    pub selectors: SiteSelectors,
}

/// CSS selector fallbacks for a retailer's search result markup.
///
/// Every list is tried in order and the first selector producing a usable
/// value wins. Listing layouts differ between pages on the same store, so
/// most lists carry more than one entry.
#[derive(Debug, Clone, Copy)]
pub struct SiteSelectors {
    /// One match per product card. Matches nested inside another match are
    /// ignored.
    pub item: &'static str,
    pub title: &'static [&'static str],
    /// Sale-price selectors must come before generic price selectors.
    pub price: &'static [PriceRule],
    pub image: &'static [ImageRule],
    /// Elements whose `href` points at the product page.
    pub link: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct PriceRule {
    pub selector: &'static str,
    /// Marker after which the price cell carries unrelated text, e.g. the
    /// `"Ex Tax"` line OpenCart appends to the price block.
    pub cut_at: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageRule {
    pub selector: &'static str,
    /// Attribute holding the URL (`src`, or `data-src` for lazy loading).
    pub attr: &'static str,
}

/// A [`SiteConfig`] with validated origin and compiled selectors.
#[derive(Debug)]
pub struct Site {
    name: &'static str,
    color: &'static str,
    origin: String,
    base: Url,
    search_path: &'static str,
    selectors: CompiledSelectors,
}

#[derive(Debug)]
struct CompiledSelectors {
    item: Selector,
    title: Vec<Selector>,
    price: Vec<(Selector, Option<&'static str>)>,
    image: Vec<(Selector, &'static str)>,
    link: Vec<Selector>,
}

impl Site {
    /// Validates `config` and compiles its selectors.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidOrigin`] if the origin is not an absolute
    ///   `http(s)` URL.
    /// - [`ScraperError::InvalidSelector`] if any selector fails to parse.
    /// - [`ScraperError::InvalidRegistry`] if the title, price or link
    ///   fallback list is empty.
    pub fn compile(config: &SiteConfig) -> Result<Self, ScraperError> {
        let (origin, base) =
            parse_site_origin(&config.origin).map_err(|reason| ScraperError::InvalidOrigin {
                site: config.name.to_owned(),
                origin: config.origin.clone(),
                reason,
            })?;

        let selectors = &config.selectors;
        for (field, len) in [
            ("title", selectors.title.len()),
            ("price", selectors.price.len()),
            ("link", selectors.link.len()),
        ] {
            if len == 0 {
                return Err(ScraperError::InvalidRegistry(format!(
                    "site {} has no {field} selectors",
                    config.name
                )));
            }
        }

        let compile = |selector: &'static str| compile_selector(config.name, selector);

        Ok(Self {
            name: config.name,
            color: config.color,
            origin,
            base,
            search_path: config.search_path,
            selectors: CompiledSelectors {
                item: compile(selectors.item)?,
                title: selectors
                    .title
                    .iter()
                    .copied()
                    .map(compile)
                    .collect::<Result<_, _>>()?,
                price: selectors
                    .price
                    .iter()
                    .map(|rule| Ok((compile(rule.selector)?, rule.cut_at)))
                    .collect::<Result<_, ScraperError>>()?,
                image: selectors
                    .image
                    .iter()
                    .map(|rule| Ok((compile(rule.selector)?, rule.attr)))
                    .collect::<Result<_, ScraperError>>()?,
                link: selectors
                    .link
                    .iter()
                    .copied()
                    .map(compile)
                    .collect::<Result<_, _>>()?,
            },
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        self.color
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Builds the retailer's search URL for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, QUERY_COMPONENT);
        format!("{}{}{encoded}", self.origin, self.search_path)
    }

    /// The search endpoint without its query string, for diagnostics.
    #[must_use]
    pub fn search_endpoint(&self) -> String {
        let path = self
            .search_path
            .split_once('?')
            .map_or(self.search_path, |(path, _)| path);
        format!("{}{path}", self.origin)
    }

    /// Fetches the search page for `query` and parses it into records.
    ///
    /// Never fails: transport errors, timeouts and non-2xx statuses are
    /// logged and yield an empty list so one retailer cannot sink a search.
    pub async fn fetch_and_parse(&self, client: &PriceClient, query: &str) -> Vec<ProductRecord> {
        let url = self.search_url(query);
        tracing::debug!(site = self.name, url = %url, "fetching search page");

        let body = match client.fetch_page(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    site = self.name,
                    error = %e,
                    "search page fetch failed; site contributes no products"
                );
                return Vec::new();
            }
        };

        let records = self.parse(&body, query);
        tracing::debug!(site = self.name, count = records.len(), "parsed search page");
        records
    }
}

fn compile_selector(site: &str, selector: &'static str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        site: site.to_owned(),
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}
