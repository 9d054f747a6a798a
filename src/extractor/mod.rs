//! Article extraction from raw HTML
//!
//! The extractor turns a fetched document into a structured record or
//! signals that the page has no usable content. Structural parsing of the
//! origin's markup is isolated behind the [`ArticleExtractor`] trait so a
//! layout change on the site only touches one implementation.

mod risalah;

pub use risalah::RisalahExtractor;

/// Structured fields extracted from one article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleContent {
    /// Article headline; extraction fails without one
    pub headline: String,

    /// Publication timestamp as raw text, no parsing
    pub published: String,

    /// Last breadcrumb entry, or the default sentinel
    pub category: String,

    /// Source attribution, or the default sentinel
    pub source: String,

    /// All content containers concatenated in document order
    pub body: String,
}

/// Trait for layout-specific article extractors
///
/// Returns `None` when the document has no usable content: a missing
/// headline, or a body that is empty after share/related blocks are
/// removed. That is a skip, not an error.
pub trait ArticleExtractor {
    fn extract(&self, html: &str) -> Option<ArticleContent>;
}
