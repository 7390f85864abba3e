pub mod analysis;
pub mod http;
pub mod resource_checker;
pub mod scorer;
pub mod tracker;

pub use analysis::{AnalysisResponse, PageAnalyzer};
pub use resource_checker::ResourceChecker;
pub use scorer::{score_page, SeoScorer};
pub use tracker::{AnalysisTracker, InFlightAnalysis};
