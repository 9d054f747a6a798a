//! Extractor for the alresalah.ps article layout

use crate::extractor::{ArticleContent, ArticleExtractor};
use scraper::{ElementRef, Html, Selector};

/// Default sentinel when the page carries no publication timestamp
const NO_DATE: &str = "No Date";

/// Default sentinel when no breadcrumb category is present
const NO_CATEGORY: &str = "No Category";

/// Default sentinel when no source attribution is present
const NO_SOURCE: &str = "No Source";

/// Extractor for the known alresalah.ps post layout
///
/// Field locations:
/// - headline: `h1.page-post-title` (required)
/// - published: `time.d-flex.align-items-center` (raw text)
/// - category: the `<a>` in the last `<li>` of `ol.breadcrumb`
/// - source: `h4.page-post-source`
/// - body: every `div.p-4.bg-white` container, with nested `div.p-3`
///   share/related blocks excised before text collection
#[derive(Debug, Default)]
pub struct RisalahExtractor;

impl RisalahExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ArticleExtractor for RisalahExtractor {
    fn extract(&self, html: &str) -> Option<ArticleContent> {
        let document = Html::parse_document(html);

        // A page without a headline has nothing worth keeping
        let headline = extract_headline(&document)?;

        let published = extract_published(&document).unwrap_or_else(|| NO_DATE.to_string());
        let category = extract_category(&document).unwrap_or_else(|| NO_CATEGORY.to_string());
        let source = extract_source(&document).unwrap_or_else(|| NO_SOURCE.to_string());

        let body = extract_body(&document);
        if body.trim().is_empty() {
            return None;
        }

        Some(ArticleContent {
            headline,
            published,
            category,
            source,
            body,
        })
    }
}

/// Extracts the required headline
fn extract_headline(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1.page-post-title").ok()?;

    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Extracts the publication timestamp text, unparsed
fn extract_published(document: &Html) -> Option<String> {
    let selector = Selector::parse("time.d-flex.align-items-center").ok()?;

    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Extracts the category from the last breadcrumb entry
fn extract_category(document: &Html) -> Option<String> {
    let breadcrumb_selector = Selector::parse("ol.breadcrumb li").ok()?;
    let link_selector = Selector::parse("a").ok()?;

    let last_entry = document.select(&breadcrumb_selector).last()?;
    let link = last_entry.select(&link_selector).next()?;

    let text = element_text(link);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extracts the source attribution
fn extract_source(document: &Html) -> Option<String> {
    let selector = Selector::parse("h4.page-post-source").ok()?;

    document
        .select(&selector)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// Collects body text from all content containers in document order
///
/// Share/related sub-blocks (`div.p-3`) are excised before text collection
/// so they never pollute the article body. Containers are joined with
/// newlines, matching the downstream file and row format.
fn extract_body(document: &Html) -> String {
    let container_selector = match Selector::parse("div.p-4.bg-white") {
        Ok(s) => s,
        Err(_) => return String::new(),
    };

    let mut sections = Vec::new();
    for container in document.select(&container_selector) {
        let mut parts = Vec::new();
        collect_text(container, &mut parts);
        if !parts.is_empty() {
            sections.push(parts.join("\n"));
        }
    }

    sections.join("\n")
}

/// Recursively collects trimmed text nodes, skipping excised subtrees
fn collect_text(element: ElementRef, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if is_share_block(&el) {
                continue;
            }
            collect_text(el, parts);
        } else if let Some(text) = child.value().as_text() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_string());
            }
        }
    }
}

/// Returns true for the nested share/related blocks inside content containers
fn is_share_block(element: &ElementRef) -> bool {
    element.value().name() == "div" && has_class(element, "p-3")
}

fn has_class(element: &ElementRef, class: &str) -> bool {
    element
        .value()
        .attr("class")
        .map_or(false, |c| c.split_whitespace().any(|token| token == class))
}

/// Collects all text under an element, whitespace-trimmed and joined
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
