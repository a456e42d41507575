//! Scrape configuration. [`ScrapeConfig::default`] targets the Solarus 1.6 documentation.

use std::time::Duration;

/// Documentation host for Solarus 1.6.
pub const DEFAULT_BASE_URL: &str = "http://www.solarus-games.org/doc/1.6/";

/// Page listing every API module.
pub const DEFAULT_ROOT_PAGE: &str = "lua_api.html";

/// Name of the top-level library table.
pub const DEFAULT_NAMESPACE: &str = "sol";

/// Default output file of the scrape.
pub const DEFAULT_OUTPUT: &str = "solarus_lua_api.lua";

/// Where the sub-class pages of a super class page come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubclassSource {
    /// Every link of the first `<ul>` inside the page's text block.
    FirstList,
    /// A fixed list of module names, fetched as `lua_api_<name>.html`.
    Pages(Vec<String>),
}

/// Sub-class lookup for one super class page (a page documenting "methods of all ...").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuperClassRule {
    pub module: String,
    pub source: SubclassSource,
}

impl SuperClassRule {
    pub fn first_list(module: &str) -> Self {
        Self {
            module: module.to_string(),
            source: SubclassSource::FirstList,
        }
    }

    pub fn pages(module: &str, pages: &[&str]) -> Self {
        Self {
            module: module.to_string(),
            source: SubclassSource::Pages(pages.iter().map(|p| p.to_string()).collect()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Prefix for every page address; must end with `/`.
    pub base_url: String,
    pub root_page: String,
    /// Key of the library table at the top of the output.
    pub namespace: String,
    /// Line width for description text. Descriptions are meant to stay unwrapped,
    /// so this is kept wide.
    pub text_width: usize,
    pub timeout: Duration,
    pub user_agent: String,
    pub super_classes: Vec<SuperClassRule>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            root_page: DEFAULT_ROOT_PAGE.to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            text_width: 4096,
            timeout: Duration::from_secs(30),
            user_agent: concat!("doc-scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            super_classes: vec![
                SuperClassRule::first_list("entity"),
                SuperClassRule::first_list("movement"),
                SuperClassRule::pages("drawable", &["surface", "text_surface", "sprite"]),
            ],
        }
    }
}

impl ScrapeConfig {
    /// Absolute URL of a page address relative to the documentation root.
    pub fn page_url(&self, address: &str) -> String {
        format!("{}{}", self.base_url, address)
    }

    pub fn super_class_rule(&self, module: &str) -> Option<&SuperClassRule> {
        self.super_classes.iter().find(|rule| rule.module == module)
    }
}
