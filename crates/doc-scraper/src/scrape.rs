//! Page traversal: root page → module pages → sub-class pages.
//!
//! Parsing is split from fetching. [`parse_root_page`] and [`parse_page`] turn one
//! HTML document into owned data; [`Scraper`] drives the fetches, follows super
//! class pages to their sub-classes and assembles the [`ApiDoc`].

use std::collections::HashSet;

use scraper::{ElementRef, Html};

use crate::config::{ScrapeConfig, SubclassSource};
use crate::dom::{
    element_text, fragment_html, headers_containing, link_targets, selector,
    siblings_named_until,
};
use crate::error::{Result, ScrapeError};
use crate::extract::{
    annotate_args, module_name, parse_arg_line, parse_function_header, parse_method_header,
    ArgLine,
};
use crate::fetch::Fetch;
use crate::model::{ApiDoc, Callable, CallableKind, ClassDoc, LibDoc};
use crate::text::html_to_text;

const FUNCTIONS: &[&str] = &["Functions of"];
const METHODS: &[&str] = &["Methods of the type"];
const SUPER_METHODS: &[&str] = &["Methods of all"];
const EVENTS: &[&str] = &["Events of the type", "Events of a "];
const SUPER_EVENTS: &[&str] = &["Events of all"];

/// Counts for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeReport {
    /// Module pages scraped (each page once).
    pub modules: usize,
    /// Functions, methods and events parsed.
    pub callables: usize,
    pub classes: usize,
    pub libraries: usize,
}

/// Everything extracted from one module page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDoc {
    pub description: String,
    pub functions: Vec<Callable>,
    pub methods: Vec<Callable>,
    pub super_methods: Vec<Callable>,
    pub events: Vec<Callable>,
    pub super_events: Vec<Callable>,
    /// Link targets of the first list in the text block (sub-class index of
    /// some super class pages).
    pub first_list_links: Vec<String>,
}

impl PageDoc {
    /// A page documenting methods shared by all types of a family.
    pub fn is_super_class(&self) -> bool {
        !self.super_methods.is_empty()
    }

    pub fn has_class(&self) -> bool {
        !(self.methods.is_empty()
            && self.super_methods.is_empty()
            && self.events.is_empty()
            && self.super_events.is_empty())
    }

    pub fn callable_count(&self) -> usize {
        self.functions.len()
            + self.methods.len()
            + self.super_methods.len()
            + self.events.len()
            + self.super_events.len()
    }

    /// Class children in merge order: methods, shared methods, events, shared events.
    pub fn class_childs(&self) -> Vec<Callable> {
        self.methods
            .iter()
            .chain(&self.super_methods)
            .chain(&self.events)
            .chain(&self.super_events)
            .cloned()
            .collect()
    }
}

/// Addresses of every API page: the links of the document's second `<ul>`.
pub fn parse_root_page(html: &str, url: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let ul_sel = selector("ul")?;
    let api_list = doc
        .select(&ul_sel)
        .nth(1)
        .ok_or_else(|| ScrapeError::MissingElement {
            url: url.to_string(),
            what: "API list (second <ul>)",
        })?;
    link_targets(api_list)
}

/// Extract a module page.
pub fn parse_page(html: &str, url: &str, text_width: usize) -> Result<PageDoc> {
    let doc = Html::parse_document(html);
    let textblock = doc
        .select(&selector("div.textblock")?)
        .next()
        .ok_or_else(|| ScrapeError::MissingElement {
            url: url.to_string(),
            what: "div.textblock",
        })?;

    let description = match textblock.select(&selector("p")?).next() {
        Some(p) => html_to_text(&fragment_html(p, true, "h1"), text_width)?,
        None => String::new(),
    };
    let first_list_links = match textblock.select(&selector("ul")?).next() {
        Some(ul) => link_targets(ul)?,
        None => Vec::new(),
    };

    let section = |kind: CallableKind, needles: &[&str]| {
        scrape_section(textblock, kind, needles, text_width)
    };
    Ok(PageDoc {
        description,
        functions: section(CallableKind::Function, FUNCTIONS)?,
        methods: section(CallableKind::Method, METHODS)?,
        super_methods: section(CallableKind::Method, SUPER_METHODS)?,
        events: section(CallableKind::Method, EVENTS)?,
        super_events: section(CallableKind::Method, SUPER_EVENTS)?,
        first_list_links,
    })
}

/// Every `<h2>` entry under the `<h1>` headers whose text matches `needles`.
fn scrape_section(
    textblock: ElementRef<'_>,
    kind: CallableKind,
    needles: &[&str],
    text_width: usize,
) -> Result<Vec<Callable>> {
    let mut callables = Vec::new();
    for header in headers_containing(textblock, "h1", needles)? {
        tracing::debug!(header = %element_text(header).trim(), "section");
        for entry in siblings_named_until(header, "h2", "h1") {
            callables.push(scrape_callable(entry, kind, text_width)?);
        }
    }
    Ok(callables)
}

/// One entry: signature from the `<h2>`, types from the following lists, and
/// everything up to the next `<h2>` as description.
fn scrape_callable(h2: ElementRef<'_>, kind: CallableKind, text_width: usize) -> Result<Callable> {
    let header = element_text(h2);
    let signature = match kind {
        CallableKind::Function => parse_function_header(&header),
        CallableKind::Method => parse_method_header(&header),
    }
    .ok_or_else(|| ScrapeError::HeaderMismatch {
        kind: kind.as_str(),
        header: header.trim().to_string(),
    })?;

    let li_sel = selector("li")?;
    let mut params = Vec::new();
    let mut returns = Vec::new();
    for list in siblings_named_until(h2, "ul", "h2") {
        for item in list.select(&li_sel) {
            let text = element_text(item);
            match parse_arg_line(&text) {
                Some(ArgLine::Param { name, ty }) => params.push((name, ty)),
                Some(ArgLine::Returns(ty)) => returns.push(ty),
                None => tracing::warn!(
                    entry = %signature.name,
                    item = %text.trim(),
                    "unmatched argument line"
                ),
            }
        }
    }

    Ok(Callable {
        args: annotate_args(&signature.args, &params),
        name: signature.name,
        kind,
        description: html_to_text(&fragment_html(h2, false, "h2"), text_width)?,
        returns: returns.join(","),
    })
}

/// Drives a whole scrape over a [`Fetch`] implementation.
pub struct Scraper<F> {
    fetcher: F,
    config: ScrapeConfig,
    api: ApiDoc,
    report: ScrapeReport,
    visited: HashSet<String>,
}

impl<F: Fetch> Scraper<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        let api = ApiDoc::new(config.namespace.clone());
        Self {
            fetcher,
            config,
            api,
            report: ScrapeReport::default(),
            visited: HashSet::new(),
        }
    }

    /// Scrape the root page and every page it leads to.
    pub fn run(mut self) -> Result<(ApiDoc, ScrapeReport)> {
        let root_url = self.config.page_url(&self.config.root_page);
        let html = self.fetcher.fetch(&root_url)?;
        tracing::info!(url = %root_url, "root page loaded");

        for address in parse_root_page(&html, &root_url)? {
            self.scrape_page(&address, None)?;
        }

        self.report.classes = self.api.classes.len();
        self.report.libraries = self.api.modules.len();
        Ok((self.api, self.report))
    }

    /// Scrape one module page. A page seen before is not fetched again; reaching it
    /// from a super class only fills in the missing `inherits`.
    pub fn scrape_page(&mut self, address: &str, super_class: Option<&str>) -> Result<()> {
        let module = module_name(address)
            .ok_or_else(|| ScrapeError::InvalidAddress(address.to_string()))?
            .to_string();

        if !self.visited.insert(module.clone()) {
            if let (Some(parent), Some(class)) = (super_class, self.api.class_mut(&module)) {
                if class.inherits.is_none() {
                    class.inherits = Some(parent.to_string());
                }
            }
            tracing::debug!(module = %module, "already scraped");
            return Ok(());
        }

        self.report.modules += 1;
        tracing::info!(module = %module, "scraping");
        let url = self.config.page_url(address);
        let html = self.fetcher.fetch(&url)?;
        let page = parse_page(&html, &url, self.config.text_width)?;
        self.report.callables += page.callable_count();

        if page.is_super_class() {
            self.scrape_subclasses(&module, &page)?;
        }

        if page.has_class() {
            tracing::info!(
                module = %module,
                methods = page.methods.len(),
                events = page.events.len(),
                "registering class"
            );
            self.api.insert_class(
                &module,
                ClassDoc {
                    description: page.description.clone(),
                    childs: page.class_childs(),
                    inherits: super_class.map(str::to_string),
                },
            );
        }

        if !page.functions.is_empty() {
            self.api.insert_module(
                &module,
                LibDoc {
                    description: page.description,
                    childs: page.functions,
                },
            );
        }
        Ok(())
    }

    fn scrape_subclasses(&mut self, module: &str, page: &PageDoc) -> Result<()> {
        let rule = self
            .config
            .super_class_rule(module)
            .cloned()
            .ok_or_else(|| ScrapeError::UnknownSuperClass(module.to_string()))?;
        tracing::info!(module, "scraping sub classes");

        let addresses = match rule.source {
            SubclassSource::FirstList => page.first_list_links.clone(),
            SubclassSource::Pages(names) => names
                .iter()
                .map(|name| format!("lua_api_{name}.html"))
                .collect(),
        };
        for address in addresses {
            self.scrape_page(&address, Some(module))?;
        }
        Ok(())
    }
}
