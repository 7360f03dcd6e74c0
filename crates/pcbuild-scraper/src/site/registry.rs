//! The fixed set of retailers searched for every query.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::ScraperError;

use super::{ImageRule, PriceRule, Site, SiteConfig, SiteSelectors};

/// StarTech's own storefront theme.
const STARTECH_SELECTORS: SiteSelectors = SiteSelectors {
    item: ".p-item",
    title: &["h4.p-item-name a", ".p-item-name"],
    price: &[
        PriceRule {
            selector: ".p-item-price .price-new",
            cut_at: None,
        },
        PriceRule {
            selector: ".p-item-price span",
            cut_at: None,
        },
        PriceRule {
            selector: ".p-item-price",
            cut_at: None,
        },
    ],
    image: &[
        ImageRule {
            selector: ".p-item-img img",
            attr: "src",
        },
        ImageRule {
            selector: "img[data-src]",
            attr: "data-src",
        },
        ImageRule {
            selector: "img",
            attr: "src",
        },
    ],
    link: &["h4.p-item-name a", ".p-item-img a"],
};

/// Stock OpenCart listing markup, shared by UltraTech and Computer Village.
const OPENCART_SELECTORS: SiteSelectors = SiteSelectors {
    item: ".product-layout, .product-thumb",
    title: &[".caption h4 a", ".name a", "h4 a"],
    price: &[
        PriceRule {
            selector: ".price-new",
            cut_at: None,
        },
        PriceRule {
            selector: ".price",
            cut_at: Some("Ex Tax"),
        },
    ],
    image: &[
        ImageRule {
            selector: ".image img",
            attr: "src",
        },
        ImageRule {
            selector: "img",
            attr: "src",
        },
    ],
    link: &["h4 a", ".caption a", "a"],
};

const OPENCART_SEARCH_PATH: &str = "/index.php?route=product/search&search=";

/// Configs for every retailer searched in production, in display order.
#[must_use]
pub fn default_sites() -> Vec<SiteConfig> {
    vec![
        SiteConfig {
            name: "StarTech",
            color: "#ef4444",
            origin: "https://www.startech.com.bd".to_owned(),
            search_path: "/product/search?search=",
            selectors: STARTECH_SELECTORS,
        },
        SiteConfig {
            name: "UltraTech",
            color: "#3b82f6",
            origin: "https://www.ultratech.com.bd".to_owned(),
            search_path: OPENCART_SEARCH_PATH,
            selectors: OPENCART_SELECTORS,
        },
        SiteConfig {
            name: "Computer Village",
            color: "#10b981",
            origin: "https://www.computervillage.com.bd".to_owned(),
            search_path: OPENCART_SEARCH_PATH,
            selectors: OPENCART_SELECTORS,
        },
    ]
}

/// Immutable, ordered set of compiled sites.
///
/// Built once at startup and shared read-only between concurrent searches.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    sites: Vec<Arc<Site>>,
}

impl SiteRegistry {
    /// Compiles and validates `configs`, preserving their order.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidRegistry`] if `configs` is empty, two sites
    ///   share a name, or a site lacks required selectors.
    /// - [`ScraperError::InvalidOrigin`] / [`ScraperError::InvalidSelector`]
    ///   from compiling an individual site.
    pub fn new(configs: &[SiteConfig]) -> Result<Self, ScraperError> {
        if configs.is_empty() {
            return Err(ScraperError::InvalidRegistry(
                "no sites configured".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        let mut sites = Vec::with_capacity(configs.len());
        for config in configs {
            if !seen.insert(config.name) {
                return Err(ScraperError::InvalidRegistry(format!(
                    "duplicate site name \"{}\"",
                    config.name
                )));
            }
            sites.push(Arc::new(Site::compile(config)?));
        }

        Ok(Self { sites })
    }

    /// Registry of the production retailers from [`default_sites`].
    ///
    /// # Errors
    ///
    /// Only fails if the built-in configs are themselves malformed.
    pub fn with_default_sites() -> Result<Self, ScraperError> {
        Self::new(&default_sites())
    }

    #[must_use]
    pub fn sites(&self) -> &[Arc<Site>] {
        &self.sites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always `false` for a constructed registry; present for API symmetry
    /// with [`Self::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_compiles_in_display_order() {
        let registry = SiteRegistry::with_default_sites().expect("built-in sites are valid");
        let names: Vec<&str> = registry.sites().iter().map(|s| s.name()).collect();
        assert_eq!(names, ["StarTech", "UltraTech", "Computer Village"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn default_sites_build_expected_search_urls() {
        let registry = SiteRegistry::with_default_sites().unwrap();
        let urls: Vec<String> = registry
            .sites()
            .iter()
            .map(|s| s.search_url("rtx 3060"))
            .collect();
        assert_eq!(
            urls,
            [
                "https://www.startech.com.bd/product/search?search=rtx%203060",
                "https://www.ultratech.com.bd/index.php?route=product/search&search=rtx%203060",
                "https://www.computervillage.com.bd/index.php?route=product/search&search=rtx%203060",
            ]
        );
    }

    #[test]
    fn default_site_colors_are_fixed() {
        let registry = SiteRegistry::with_default_sites().unwrap();
        let colors: Vec<&str> = registry.sites().iter().map(|s| s.color()).collect();
        assert_eq!(colors, ["#ef4444", "#3b82f6", "#10b981"]);
    }

    #[test]
    fn empty_registry_is_rejected() {
        let err = SiteRegistry::new(&[]).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidRegistry(_)),
            "expected InvalidRegistry, got: {err:?}"
        );
    }

    #[test]
    fn duplicate_site_names_are_rejected() {
        let mut configs = default_sites();
        configs[2].name = "UltraTech";
        let err = SiteRegistry::new(&configs).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidRegistry(ref msg) if msg.contains("UltraTech")),
            "expected InvalidRegistry naming the duplicate, got: {err:?}"
        );
    }

    #[test]
    fn malformed_origin_is_rejected() {
        let mut configs = default_sites();
        configs[0].origin = "not a url".to_owned();
        let err = SiteRegistry::new(&configs).unwrap_err();
        assert!(
            matches!(err, ScraperError::InvalidOrigin { ref site, .. } if site == "StarTech"),
            "expected InvalidOrigin for StarTech, got: {err:?}"
        );
    }
}
