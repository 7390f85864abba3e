//! One analysis request: claim the page context, extract, score, answer.

use serde::Serialize;
use uuid::Uuid;

use crate::config::AnalyzerSettings;
use crate::domain::models::{PageFacts, ScoreResult};
use crate::error::{AppError, CommandError};
use crate::extractor::{DocumentAccessor, PageExtractor};
use crate::service::scorer::SeoScorer;
use crate::service::tracker::AnalysisTracker;

/// Reply handed back to whoever asked for the analysis. Serializes with a
/// `type` tag so a message layer can forward it untouched.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum AnalysisResponse {
    #[serde(rename = "ANALYSIS_RESULT", rename_all = "camelCase")]
    Result {
        request_id: Uuid,
        context_id: String,
        facts: PageFacts,
        score: ScoreResult,
    },
    #[serde(rename = "ANALYSIS_ERROR", rename_all = "camelCase")]
    Error {
        /// Absent when the request was refused before it started.
        #[serde(skip_serializing_if = "Option::is_none")]
        request_id: Option<Uuid>,
        context_id: String,
        error: CommandError,
    },
}

impl AnalysisResponse {
    fn error(request_id: Option<Uuid>, context_id: &str, error: AppError) -> Self {
        Self::Error {
            request_id,
            context_id: context_id.to_string(),
            error: error.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Result { .. })
    }

    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            Self::Result { request_id, .. } => Some(*request_id),
            Self::Error { request_id, .. } => *request_id,
        }
    }

    pub fn context_id(&self) -> &str {
        match self {
            Self::Result { context_id, .. } | Self::Error { context_id, .. } => context_id,
        }
    }

    pub fn facts(&self) -> Option<&PageFacts> {
        match self {
            Self::Result { facts, .. } => Some(facts),
            Self::Error { .. } => None,
        }
    }

    pub fn score(&self) -> Option<&ScoreResult> {
        match self {
            Self::Result { score, .. } => Some(score),
            Self::Error { .. } => None,
        }
    }
}

pub struct PageAnalyzer {
    tracker: AnalysisTracker,
    extractor: PageExtractor,
    scorer: SeoScorer,
}

impl PageAnalyzer {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self::with_tracker(settings, AnalysisTracker::new())
    }

    /// Share a tracker with other analyzers serving the same contexts.
    pub fn with_tracker(settings: &AnalyzerSettings, tracker: AnalysisTracker) -> Self {
        Self {
            tracker,
            extractor: PageExtractor::new(settings),
            scorer: SeoScorer::new(settings),
        }
    }

    pub fn tracker(&self) -> &AnalysisTracker {
        &self.tracker
    }

    /// Analyze the document shown in `context_id`. Always answers: failures
    /// come back as `ANALYSIS_ERROR` rather than `Err`.
    pub fn analyze(&self, context_id: &str, doc: &dyn DocumentAccessor) -> AnalysisResponse {
        let guard = match self.tracker.begin(context_id) {
            Ok(guard) => guard,
            Err(e) => return AnalysisResponse::error(None, context_id, e),
        };
        let request_id = guard.request_id();
        let _span =
            tracing::info_span!("analyze", request = %request_id, context = context_id).entered();

        log::info!("[ANALYZE] Request {} for context {}", request_id, context_id);

        match self.extractor.extract(doc) {
            Ok(facts) => {
                let score = self.scorer.score(Some(&facts));
                log::info!(
                    "[ANALYZE] Request {} done: {} scored {}/100",
                    request_id,
                    facts.url,
                    score.total
                );
                AnalysisResponse::Result {
                    request_id,
                    context_id: context_id.to_string(),
                    facts,
                    score,
                }
            }
            Err(e) => {
                log::error!("[ANALYZE] Request {} failed: {}", request_id, e);
                AnalysisResponse::error(Some(request_id), context_id, e)
            }
        }
    }
}

impl Default for PageAnalyzer {
    fn default() -> Self {
        Self::new(&AnalyzerSettings::default())
    }
}
