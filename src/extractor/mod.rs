pub mod document;
pub mod page_extractor;

pub use document::{AnchorNode, DocumentAccessor, HtmlDocument, ImageNode, MetaAttr};
pub use page_extractor::{LinkClass, PageExtractor};

use crate::domain::models::PageFacts;
use crate::error::Result;

/// Extract facts with the default analyzer settings.
pub fn extract_page_facts(doc: &dyn DocumentAccessor) -> Result<PageFacts> {
    PageExtractor::default().extract(doc)
}
