//! Sibling walking and fragment extraction.

use doc_scraper::dom::{
    element_text, fragment_html, headers_containing, link_targets, selector,
    siblings_named_until, siblings_until, Sibling,
};
use scraper::Html;

const PAGE: &str = r#"<div class="textblock"><p>Intro &amp; overview.</p>
<ul><li><a href="lua_api_a.html">A</a></li><li><a href="lua_api_b.html">B</a></li></ul>
<h1>Functions of sol.a</h1>
<h2>sol.a.one()</h2>
<p>First.</p>
<ul><li>x (number): X.</li></ul>
<ul><li>y (number): Y.</li></ul>
<h2>sol.a.two()</h2>
<p>Second.</p>
<h1>Methods of the type a</h1>
<h2>a:three()</h2>
</div>"#;

fn first<'a>(doc: &'a Html, css: &str) -> scraper::ElementRef<'a> {
    doc.select(&selector(css).unwrap()).next().unwrap()
}

#[test]
fn siblings_stop_before_the_stop_tag() {
    let doc = Html::parse_document(PAGE);
    let h2 = first(&doc, "h2");

    let names: Vec<_> = siblings_until(h2, "h2")
        .filter_map(|s| match s {
            Sibling::Element(e) => Some(e.value().name().to_string()),
            Sibling::Text(_) => None,
        })
        .collect();
    assert_eq!(names, vec!["p", "ul", "ul"]);
}

#[test]
fn siblings_include_text_nodes() {
    let doc = Html::parse_document(PAGE);
    let h2 = first(&doc, "h2");
    assert!(siblings_until(h2, "h2").any(|s| matches!(s, Sibling::Text(t) if t == "\n")));
}

#[test]
fn named_siblings() {
    let doc = Html::parse_document(PAGE);
    let h1 = first(&doc, "h1");

    let headers: Vec<_> = siblings_named_until(h1, "h2", "h1")
        .map(element_text)
        .collect();
    assert_eq!(headers, vec!["sol.a.one()", "sol.a.two()"]);

    let h2 = first(&doc, "h2");
    assert_eq!(siblings_named_until(h2, "ul", "h2").count(), 2);
}

#[test]
fn headers_by_text() {
    let doc = Html::parse_document(PAGE);
    let block = first(&doc, "div.textblock");

    let found = headers_containing(block, "h1", &["Methods of the type"]).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(element_text(found[0]), "Methods of the type a");

    let both = headers_containing(block, "h1", &["Functions of", "Methods of"]).unwrap();
    assert_eq!(both.len(), 2);
    assert!(headers_containing(block, "h1", &["Events of"]).unwrap().is_empty());
}

#[test]
fn fragment_keeps_escaping() {
    let doc = Html::parse_document(PAGE);
    let p = first(&doc, "p");

    let html = fragment_html(p, true, "h1");
    assert!(html.starts_with("<p>Intro &amp; overview.</p>"), "{html}");
    assert!(html.contains("lua_api_b.html"));
    assert!(!html.contains("<h1>"));
}

#[test]
fn fragment_without_self() {
    let doc = Html::parse_document(PAGE);
    let h2 = first(&doc, "h2");

    let html = fragment_html(h2, false, "h2");
    assert!(!html.contains("sol.a.one"));
    assert!(html.contains("<p>First.</p>"));
    assert!(!html.contains("Second."));
}

#[test]
fn links_in_document_order() {
    let doc = Html::parse_document(PAGE);
    let ul = first(&doc, "ul");
    assert_eq!(
        link_targets(ul).unwrap(),
        vec!["lua_api_a.html", "lua_api_b.html"]
    );
}

#[test]
fn invalid_selector_is_reported() {
    assert!(selector("h1[").is_err());
}
