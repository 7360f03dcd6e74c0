use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid site registry: {0}")]
    InvalidRegistry(String),

    #[error("invalid origin \"{origin}\" for site {site}: {reason}")]
    InvalidOrigin {
        site: String,
        origin: String,
        reason: String,
    },

    #[error("invalid selector \"{selector}\" for site {site}: {reason}")]
    InvalidSelector {
        site: String,
        selector: String,
        reason: String,
    },

    #[error("search task for {site} did not complete: {reason}")]
    TaskJoin { site: String, reason: String },
}
