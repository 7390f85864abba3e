//! SEO scorer - turns a [`PageFacts`] snapshot into a 0-100 score plus one
//! diagnostic verdict per category.
//!
//! Scoring is pure and total: a missing fact section costs its points and
//! yields an `error` verdict, it never aborts the whole result.

pub mod points;
pub mod verdicts;

use std::collections::BTreeMap;

use crate::config::AnalyzerSettings;
use crate::domain::models::{
    Category, CategoryVerdict, PageFacts, ScoreCategory, ScoreResult, Status,
};

pub struct SeoScorer {
    word_count_target: usize,
    large_image_threshold: u32,
}

impl SeoScorer {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self {
            word_count_target: settings.word_count_target.max(1),
            large_image_threshold: settings.large_image_threshold,
        }
    }

    /// Score a snapshot. `None` yields a total of 0 and no verdicts.
    pub fn score(&self, facts: Option<&PageFacts>) -> ScoreResult {
        let Some(facts) = facts else {
            log::warn!("[SCORE] No page facts to score");
            return ScoreResult::default();
        };

        let per_category = self.verdicts(facts);
        let breakdown = self.breakdown(facts);

        let sum: f64 = breakdown.values().sum();
        let total = sum.round().clamp(0.0, 100.0) as u8;

        let result = ScoreResult {
            total,
            per_category,
            breakdown,
        };

        log::debug!(
            "[SCORE] {} scored {}/100 ({} pass, {} warning, {} fail, {} error)",
            facts.url,
            result.total,
            result.count(Status::Pass),
            result.count(Status::Warning),
            result.count(Status::Fail),
            result.count(Status::Error)
        );

        result
    }

    fn verdicts(&self, facts: &PageFacts) -> BTreeMap<Category, CategoryVerdict> {
        let social = facts.social_meta.as_ref();
        let mut out = BTreeMap::new();

        out.insert(
            Category::Title,
            facts
                .title
                .as_ref()
                .map_or_else(|| CategoryVerdict::missing("title"), verdicts::title),
        );
        out.insert(
            Category::MetaDescription,
            facts.meta_description.as_ref().map_or_else(
                || CategoryVerdict::missing("meta description"),
                verdicts::meta_description,
            ),
        );
        out.insert(
            Category::H1,
            facts
                .h1
                .as_ref()
                .map_or_else(|| CategoryVerdict::missing("H1"), verdicts::h1),
        );
        out.insert(
            Category::Headings,
            facts.headings.as_ref().map_or_else(
                || CategoryVerdict::missing("heading"),
                |counts| verdicts::headings(counts, &facts.heading_structure),
            ),
        );
        out.insert(
            Category::Https,
            facts
                .is_https
                .map_or_else(|| CategoryVerdict::missing("protocol"), verdicts::https),
        );
        out.insert(
            Category::Viewport,
            facts
                .viewport
                .as_ref()
                .map_or_else(|| CategoryVerdict::missing("viewport"), verdicts::viewport),
        );
        out.insert(
            Category::Canonical,
            verdicts::canonical(facts.canonical_url.as_deref(), &facts.url),
        );
        out.insert(
            Category::Robots,
            social.map_or_else(|| CategoryVerdict::missing("robots meta"), verdicts::robots),
        );
        out.insert(
            Category::Images,
            facts.images.as_ref().map_or_else(
                || CategoryVerdict::missing("image"),
                |images| verdicts::images(images, self.large_image_threshold),
            ),
        );
        out.insert(
            Category::Links,
            facts
                .links
                .as_ref()
                .map_or_else(|| CategoryVerdict::missing("link"), verdicts::links),
        );
        out.insert(
            Category::Content,
            facts.word_count.map_or_else(
                || CategoryVerdict::missing("word count"),
                |words| verdicts::content(words, self.word_count_target),
            ),
        );
        out.insert(
            Category::Keywords,
            social.map_or_else(|| CategoryVerdict::missing("meta keywords"), verdicts::keywords),
        );
        out.insert(
            Category::OpenGraph,
            social.map_or_else(|| CategoryVerdict::missing("Open Graph"), verdicts::open_graph),
        );
        out.insert(
            Category::TwitterCard,
            social.map_or_else(
                || CategoryVerdict::missing("Twitter Card"),
                |s| verdicts::twitter_card(&s.twitter_card),
            ),
        );

        out
    }

    fn breakdown(&self, facts: &PageFacts) -> BTreeMap<ScoreCategory, f64> {
        ScoreCategory::ALL
            .into_iter()
            .map(|category| {
                let raw = self.raw_points(category, facts);
                let clamped = raw.clamp(0.0, category.max_points());
                (category, (clamped * 100.0).round() / 100.0)
            })
            .collect()
    }

    fn raw_points(&self, category: ScoreCategory, facts: &PageFacts) -> f64 {
        match category {
            ScoreCategory::Title => facts.title.as_ref().map_or(0.0, points::title),
            ScoreCategory::MetaDescription => facts
                .meta_description
                .as_ref()
                .map_or(0.0, points::meta_description),
            ScoreCategory::H1 => facts.h1.as_ref().map_or(0.0, points::h1),
            ScoreCategory::Https => facts.is_https.map_or(0.0, points::https),
            ScoreCategory::Viewport => facts.viewport.as_ref().map_or(0.0, points::viewport),
            ScoreCategory::Images => facts.images.as_ref().map_or(0.0, points::images),
            ScoreCategory::Headings => facts
                .headings
                .as_ref()
                .map_or(0.0, |counts| points::headings(counts, &facts.heading_structure)),
            ScoreCategory::Links => facts.links.as_ref().map_or(0.0, points::links),
            ScoreCategory::Content => facts
                .word_count
                .map_or(0.0, |words| points::content(words, self.word_count_target)),
            ScoreCategory::SocialMeta => facts.social_meta.as_ref().map_or(0.0, |social| {
                points::social_meta(facts.canonical_url.as_deref(), social)
            }),
        }
    }
}

impl Default for SeoScorer {
    fn default() -> Self {
        Self::new(&AnalyzerSettings::default())
    }
}

/// Score with the default analyzer settings.
pub fn score_page(facts: Option<&PageFacts>) -> ScoreResult {
    SeoScorer::default().score(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{ImageFacts, Section};
    use crate::test_utils::reference_page_facts;

    #[test]
    fn reference_page_scores_97() {
        let facts = reference_page_facts();
        let result = score_page(Some(&facts));

        assert_eq!(result.total, 97);
        assert_eq!(result.breakdown[&ScoreCategory::MetaDescription], 7.0);
        assert_eq!(result.per_category.len(), Category::ALL.len());
        for (category, verdict) in &result.per_category {
            let expected = if *category == Category::Robots {
                Status::Info
            } else {
                Status::Pass
            };
            assert_eq!(verdict.status, expected, "{:?}: {}", category, verdict.message);
        }
        assert_eq!(result.worst_status(), Some(Status::Info));
    }

    #[test]
    fn no_facts_scores_zero_without_verdicts() {
        let result = score_page(None);
        assert_eq!(result.total, 0);
        assert!(result.per_category.is_empty());
        assert_eq!(result.worst_status(), None);
    }

    #[test]
    fn scoring_is_idempotent() {
        let facts = reference_page_facts();
        let scorer = SeoScorer::default();
        assert_eq!(scorer.score(Some(&facts)), scorer.score(Some(&facts)));
    }

    #[test]
    fn missing_sections_are_errors_worth_nothing() {
        let facts = PageFacts {
            url: "https://example.com/".into(),
            is_https: Some(true),
            ..Default::default()
        };
        let result = score_page(Some(&facts));

        for category in [
            Category::Title,
            Category::MetaDescription,
            Category::H1,
            Category::Headings,
            Category::Content,
            Category::Viewport,
            Category::Images,
            Category::Links,
            Category::OpenGraph,
            Category::TwitterCard,
        ] {
            assert_eq!(result.per_category[&category].status, Status::Error);
        }
        assert_eq!(result.breakdown[&ScoreCategory::Title], 0.0);
        assert_eq!(result.breakdown[&ScoreCategory::Images], 0.0);
        assert_eq!(result.breakdown[&ScoreCategory::SocialMeta], 0.0);
        assert_eq!(result.breakdown[&ScoreCategory::Headings], 0.0);
        assert_eq!(result.breakdown[&ScoreCategory::Content], 0.0);
        // https only
        assert_eq!(result.total, 10);
        assert_eq!(result.worst_status(), Some(Status::Error));
    }

    #[test]
    fn url_only_payload_scores_zero() {
        let facts: PageFacts = serde_json::from_str(r#"{"url":"https://example.com/"}"#).unwrap();
        let result = score_page(Some(&facts));

        assert_eq!(result.total, 0);
        for category in [Category::Headings, Category::Content, Category::Https] {
            assert_eq!(result.per_category[&category].status, Status::Error, "{:?}", category);
        }
        assert!(result.breakdown.values().all(|points| *points == 0.0));
    }

    #[test]
    fn payload_without_ratio_keys_uses_counts() {
        let payload = r#"{
            "url": "https://example.com/",
            "images": {"total": 10, "withAlt": 10, "withDimensions": 10},
            "links": {"total": 20, "internal": 12, "external": 8, "withTitle": 15}
        }"#;
        let facts: PageFacts = serde_json::from_str(payload).unwrap();
        let result = score_page(Some(&facts));

        assert_eq!(result.breakdown[&ScoreCategory::Images], 10.0);
        assert_eq!(result.breakdown[&ScoreCategory::Links], 10.0);
        assert_eq!(result.per_category[&Category::Links].status, Status::Pass);
        assert_eq!(result.per_category[&Category::Images].status, Status::Pass);
    }

    #[test]
    fn page_without_images_is_informational() {
        let mut facts = reference_page_facts();
        facts.images = Some(ImageFacts {
            alt_text_ratio: 100,
            ..Default::default()
        });
        let result = score_page(Some(&facts));
        assert_eq!(result.per_category[&Category::Images].status, Status::Info);
        assert_eq!(result.breakdown[&ScoreCategory::Images], 10.0);
    }

    #[test]
    fn buckets_stay_within_their_maxima() {
        let mut facts = reference_page_facts();
        facts.images = Some(ImageFacts {
            total: 3,
            without_alt: 3,
            without_dimensions: 3,
            large_images: 3,
            ..Default::default()
        });
        facts.is_https = Some(false);
        facts.word_count = Some(0);

        let result = score_page(Some(&facts));
        for (category, points) in &result.breakdown {
            assert!(*points >= 0.0 && *points <= category.max_points());
        }
        assert!(result.total <= 100);
        assert_eq!(result.breakdown[&ScoreCategory::Images], 0.0);
    }

    #[test]
    fn verdicts_group_into_sections() {
        let result = score_page(Some(&reference_page_facts()));
        let social: Vec<Category> = result
            .section(Section::Social)
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(social, vec![Category::OpenGraph, Category::TwitterCard]);
    }

    #[test]
    fn custom_word_target_changes_content_points() {
        let settings = AnalyzerSettings {
            word_count_target: 900,
            ..Default::default()
        };
        let facts = reference_page_facts();
        let result = SeoScorer::new(&settings).score(Some(&facts));
        assert_eq!(result.breakdown[&ScoreCategory::Content], 5.0);
        assert_eq!(result.per_category[&Category::Content].status, Status::Warning);
    }
}
