//! Sibling scanning over a parsed page.
//!
//! The documentation pages are flat: an `<h1>` opens a section, each `<h2>` inside
//! it opens one entry, and everything up to the next heading belongs to it. These
//! helpers walk `next_sibling` chains and stop at heading boundaries.

use scraper::node::Node;
use scraper::{ElementRef, Selector};

use crate::error::{Result, ScrapeError};

pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e:?}")))
}

/// A sibling node worth looking at: an element or a run of text.
#[derive(Debug, Clone, Copy)]
pub enum Sibling<'a> {
    Element(ElementRef<'a>),
    Text(&'a str),
}

/// Following sibling nodes (elements and text) up to, not including, the first
/// `stop_tag` element. Comments and other node kinds are skipped.
pub fn siblings_until<'a>(
    el: ElementRef<'a>,
    stop_tag: &'a str,
) -> impl Iterator<Item = Sibling<'a>> + 'a {
    el.next_siblings()
        .map_while(move |node| match node.value() {
            Node::Element(e) if e.name() == stop_tag => None,
            Node::Text(text) => Some(Some(Sibling::Text(&**text))),
            _ => Some(ElementRef::wrap(node).map(Sibling::Element)),
        })
        .flatten()
}

/// Following sibling elements named `name`, stopping at the first `until` element.
pub fn siblings_named_until<'a>(
    el: ElementRef<'a>,
    name: &'a str,
    until: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    siblings_until(el, until).filter_map(move |sibling| match sibling {
        Sibling::Element(e) if e.value().name() == name => Some(e),
        _ => None,
    })
}

/// Descendant `tag` elements of `scope` whose text contains any of `needles`,
/// in document order.
pub fn headers_containing<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    needles: &[&str],
) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(tag)?;
    Ok(scope
        .select(&sel)
        .filter(|header| {
            let text = element_text(*header);
            needles.iter().any(|needle| text.contains(needle))
        })
        .collect())
}

pub fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// HTML of the siblings following `el` up to `stop_tag`, optionally starting
/// with `el` itself. Text nodes are re-escaped so the fragment parses back the same.
pub fn fragment_html<'a>(el: ElementRef<'a>, include_self: bool, stop_tag: &'a str) -> String {
    let mut html = String::new();
    if include_self {
        html.push_str(&el.html());
    }
    for sibling in siblings_until(el, stop_tag) {
        match sibling {
            Sibling::Element(element) => html.push_str(&element.html()),
            Sibling::Text(text) => push_escaped(&mut html, text),
        }
    }
    html
}

/// `href` of every link under `el`, in document order.
pub fn link_targets(el: ElementRef<'_>) -> Result<Vec<String>> {
    let sel = selector("a")?;
    Ok(el
        .select(&sel)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect())
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}
