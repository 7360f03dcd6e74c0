//! Secondary relevance check for scraped listings.
//!
//! Retailer search endpoints match loosely and mix accessories into results
//! for core parts. A listing is kept when any query word appears in its title.

/// Returns `true` if any whitespace-separated word of `query` occurs in
/// `title`, ignoring case.
///
/// An empty title or a query with no words never matches.
#[must_use]
pub fn is_relevant(title: &str, query: &str) -> bool {
    if title.is_empty() {
        return false;
    }

    let title = title.to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .any(|word| title.contains(word))
}
