//! Search-page parsing for a compiled [`Site`].

use scraper::{ElementRef, Html, Selector};

use crate::normalize::{collapse_whitespace, resolve_url, truncate_title};
use crate::price::{extract_price, format_price};
use crate::relevance::is_relevant;
use crate::types::ProductRecord;

use super::Site;

impl Site {
    /// Parses a search results document into product records.
    ///
    /// Cards are skipped when they have no title, fail the relevance check,
    /// carry no valid price, or have no product link. Record order follows
    /// document order.
    #[must_use]
    pub fn parse(&self, document: &str, query: &str) -> Vec<ProductRecord> {
        let html = Html::parse_document(document);

        html.select(&self.selectors.item)
            .filter(|item| !self.is_nested_item(*item))
            .filter_map(|item| self.extract_record(item, query))
            .collect()
    }

    /// OpenCart themes wrap `.product-thumb` inside `.product-layout`; when a
    /// site's item selector lists both, only the outer card counts.
    fn is_nested_item(&self, item: ElementRef<'_>) -> bool {
        item.ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| self.selectors.item.matches(&ancestor))
    }

    fn extract_record(&self, item: ElementRef<'_>, query: &str) -> Option<ProductRecord> {
        let selectors = &self.selectors;

        let title = selectors
            .title
            .iter()
            .find_map(|selector| first_text(item, selector))?;
        if !is_relevant(&title, query) {
            return None;
        }

        let price_text = selectors.price.iter().find_map(|(selector, cut_at)| {
            first_text(item, selector).map(|text| match cut_at {
                Some(marker) => text.split(marker).next().unwrap_or_default().to_owned(),
                None => text,
            })
        })?;
        let price_num = extract_price(&price_text);
        if price_num == 0 {
            tracing::trace!(
                site = self.name,
                title = %title,
                price_text = %price_text,
                "dropping listing without a valid price"
            );
            return None;
        }

        let link = selectors.link.iter().find_map(|selector| {
            first_attr(item, selector, "href").and_then(|href| resolve_url(&self.base, href))
        })?;

        let image = selectors.image.iter().find_map(|(selector, attr)| {
            first_attr(item, selector, attr).and_then(|src| resolve_url(&self.base, src))
        });

        Some(ProductRecord {
            title: truncate_title(&title),
            price: format_price(price_num),
            price_num,
            link,
            image,
            store: self.name.to_owned(),
            store_color: self.color.to_owned(),
        })
    }
}

/// Text of the first element under `item` matching `selector` whose
/// whitespace-collapsed text is non-empty.
fn first_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector)
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

/// First non-blank `attr` value among elements under `item` matching `selector`.
fn first_attr<'a>(item: ElementRef<'a>, selector: &Selector, attr: &str) -> Option<&'a str> {
    item.select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
