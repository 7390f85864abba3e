//! On-page SEO checker: reads one page snapshot into [`PageFacts`] and
//! scores it into a [`ScoreResult`] with one verdict per category.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod report;
pub mod service;
pub mod test_utils;

pub use config::AnalyzerSettings;
pub use domain::models::{Category, CategoryVerdict, PageFacts, ScoreResult, Status};
pub use error::{AppError, Result};
pub use extractor::{extract_page_facts, DocumentAccessor, HtmlDocument, PageExtractor};
pub use service::{score_page, AnalysisResponse, PageAnalyzer, ResourceChecker, SeoScorer};
