//! Error types for scraping the API documentation.

use thiserror::Error;

/// Errors that abort a scrape. None of them are retried.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with anything other than 200 OK.
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// A structural element the page layout relies on was not found.
    #[error("{what} not found in {url}")]
    MissingElement { url: String, what: &'static str },

    /// A CSS selector failed to parse.
    #[error("invalid selector: {0}")]
    Selector(String),

    /// A function or method header did not match the expected signature shape.
    #[error("{kind} header does not match the expected signature: {header:?}")]
    HeaderMismatch { kind: &'static str, header: String },

    /// A page address that does not look like `lua_api_<module>.html`.
    #[error("cannot derive a module name from page address {0:?}")]
    InvalidAddress(String),

    /// A page declares methods "of all" types but no sub-class rule exists for it.
    #[error("unknown super class module {0:?}")]
    UnknownSuperClass(String),

    /// HTML to text conversion failed.
    #[error("HTML to text conversion failed: {0}")]
    Text(#[from] html2text::Error),

    /// The collected tree could not be serialized.
    #[error(transparent)]
    Encode(#[from] lua_table::LuaError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout doc-scraper.
pub type Result<T> = std::result::Result<T, ScrapeError>;
