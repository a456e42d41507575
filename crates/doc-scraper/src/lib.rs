//! # doc-scraper
//!
//! Scrapes the Solarus Lua API HTML documentation into the API table format used
//! by ZeroBrane Studio's auto-completion (`sol.<module>.<function>`, classes with
//! methods and events, `inherits` links between entity and drawable types).
//!
//! ## Flow
//!
//! 1. [`fetch`]: pages come from a [`Fetch`] implementation (HTTP or in-memory)
//! 2. [`scrape`]: the root page lists every module page; each page is split into
//!    functions, methods and events, and super class pages pull in their sub-classes
//! 3. [`model`]: the collected [`ApiDoc`] becomes a [`lua_table::LuaValue`]
//! 4. [`output`]: rendered as a `return { ... }` Lua module or JSON
//!
//! ```no_run
//! use doc_scraper::{scrape, write_output, OutputFormat, ScrapeConfig};
//!
//! let (api, report) = scrape(ScrapeConfig::default())?;
//! write_output("solarus_lua_api.lua".as_ref(), &api, OutputFormat::Lua)?;
//! println!("{} modules", report.modules);
//! # Ok::<(), doc_scraper::ScrapeError>(())
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod output;
pub mod scrape;
pub mod text;

pub use config::{ScrapeConfig, SubclassSource, SuperClassRule};
pub use error::{Result, ScrapeError};
pub use fetch::{Fetch, HttpFetcher};
pub use model::{ApiDoc, Callable, CallableKind, ClassDoc, LibDoc};
pub use output::{render, write_output, OutputFormat};
pub use scrape::{parse_page, parse_root_page, PageDoc, ScrapeReport, Scraper};

/// Scrape the whole documentation over HTTP.
pub fn scrape(config: ScrapeConfig) -> Result<(ApiDoc, ScrapeReport)> {
    let fetcher = HttpFetcher::new(&config)?;
    Scraper::new(fetcher, config).run()
}
