use chrono::Utc;
use url::Url;

use super::document::{AnchorNode, DocumentAccessor, ImageNode, MetaAttr};
use crate::config::AnalyzerSettings;
use crate::domain::models::{
    H1Facts, HeadingCounts, HeadingIssue, ImageFacts, ImageSize, LinkFacts, PageFacts,
    SocialMeta, TextFacts, TwitterCardFacts, ViewportFacts,
};
use crate::error::Result;

/// Where a single anchor ends up in [`LinkFacts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkClass {
    /// No href, an empty one, or a `javascript:` pseudo-link.
    NoHref,
    Internal,
    External,
    /// Absolute href that does not parse as a URL.
    Broken,
}

/// Turns a document into a [`PageFacts`] snapshot. Observes only, never
/// judges: every threshold decision belongs to the scorer.
pub struct PageExtractor {
    keyword_tokens: Vec<String>,
    large_image_threshold: u32,
}

impl PageExtractor {
    pub fn new(settings: &AnalyzerSettings) -> Self {
        Self {
            keyword_tokens: settings
                .keyword_tokens
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            large_image_threshold: settings.large_image_threshold,
        }
    }

    /// Read the whole snapshot. Absent elements become empty values; only an
    /// inaccessible document is an error.
    pub fn extract(&self, doc: &dyn DocumentAccessor) -> Result<PageFacts> {
        let location = doc.location()?;
        log::info!("[EXTRACT] Extracting page facts: {}", location);

        let headings = HeadingCounts::from_levels([
            doc.heading_count(1),
            doc.heading_count(2),
            doc.heading_count(3),
            doc.heading_count(4),
            doc.heading_count(5),
            doc.heading_count(6),
        ]);
        let heading_structure = Self::analyze_heading_structure(&headings);

        let h1_text = doc.first_h1_text().unwrap_or_default();
        let h1 = H1Facts {
            length: h1_text.chars().count(),
            text: h1_text,
            count: headings.h1,
        };

        let viewport_content = doc
            .meta(MetaAttr::Name, "viewport")
            .map(|v| v.trim().to_string())
            .unwrap_or_default();

        let images = Self::audit_images(&doc.images(), self.large_image_threshold);
        let links = Self::classify_links(&doc.anchors(), location.host_str());
        let word_count = Self::count_words(&doc.body_text());

        let facts = PageFacts {
            url: location.to_string(),
            analyzed_at: Utc::now(),
            title: Some(self.text_facts(doc.title())),
            meta_description: Some(
                self.text_facts(doc.meta(MetaAttr::Name, "description").unwrap_or_default()),
            ),
            h1: Some(h1),
            headings: Some(headings),
            heading_structure,
            canonical_url: non_blank(doc.canonical_href()),
            is_https: Some(location.scheme() == "https"),
            viewport: Some(ViewportFacts {
                present: !viewport_content.is_empty(),
                content: viewport_content,
            }),
            images: Some(images),
            links: Some(links),
            word_count: Some(word_count),
            social_meta: Some(Self::social_meta(doc)),
        };

        log::debug!(
            "[EXTRACT] {} - {} words, {} images, {} links, {} heading issues",
            facts.url,
            word_count,
            images.total,
            links.total,
            facts.heading_structure.len()
        );

        Ok(facts)
    }

    fn text_facts(&self, text: String) -> TextFacts {
        let text = text.trim().to_string();
        let lower = text.to_lowercase();
        TextFacts {
            length: text.chars().count(),
            has_keywords: self.keyword_tokens.iter().any(|t| lower.contains(t.as_str())),
            text,
        }
    }

    /// Walk levels 1..=6 and report every present level that sits more than
    /// one step below the last present level. Repeated tags of the same
    /// level are never reported.
    pub fn analyze_heading_structure(counts: &HeadingCounts) -> Vec<HeadingIssue> {
        let mut issues = Vec::new();
        let mut last_level = 0u8;

        for level in 1..=6u8 {
            if counts.get(level) == 0 {
                continue;
            }
            if level > last_level + 1 {
                issues.push(HeadingIssue {
                    level,
                    issue: format!("Heading level skipped from H{} to H{}", last_level, level),
                });
            }
            last_level = level;
        }

        issues
    }

    pub fn audit_images(images: &[ImageNode], large_threshold: u32) -> ImageFacts {
        let mut facts = ImageFacts {
            total: images.len(),
            ..Default::default()
        };

        for img in images {
            if img.alt.as_deref().is_some_and(|a| !a.trim().is_empty()) {
                facts.with_alt += 1;
            } else {
                facts.without_alt += 1;
            }

            if img.natural_width > 0 && img.natural_height > 0 {
                facts.with_dimensions += 1;
            } else {
                facts.without_dimensions += 1;
            }

            if img.natural_width > large_threshold || img.natural_height > large_threshold {
                facts.large_images += 1;
            }
        }

        facts.alt_text_ratio = facts.alt_ratio();

        facts
    }

    pub fn classify_href(href: Option<&str>, page_host: Option<&str>) -> LinkClass {
        let Some(href) = href.map(str::trim).filter(|h| !h.is_empty()) else {
            return LinkClass::NoHref;
        };
        if href.to_ascii_lowercase().starts_with("javascript:") {
            return LinkClass::NoHref;
        }

        if !href.starts_with("http") {
            return LinkClass::Internal;
        }

        match Url::parse(href) {
            Ok(url) if url.host_str() == page_host => LinkClass::Internal,
            Ok(_) => LinkClass::External,
            Err(e) => {
                log::warn!("[EXTRACT] Malformed link href {:?}: {}", href, e);
                LinkClass::Broken
            }
        }
    }

    pub fn classify_links(anchors: &[AnchorNode], page_host: Option<&str>) -> LinkFacts {
        let mut facts = LinkFacts {
            total: anchors.len(),
            ..Default::default()
        };

        for anchor in anchors {
            match Self::classify_href(anchor.href.as_deref(), page_host) {
                LinkClass::NoHref => {
                    facts.no_href += 1;
                    continue;
                }
                LinkClass::Internal => facts.internal += 1,
                LinkClass::External => facts.external += 1,
                LinkClass::Broken => facts.broken += 1,
            }

            if anchor
                .rel
                .as_deref()
                .is_some_and(|rel| rel.to_ascii_lowercase().contains("nofollow"))
            {
                facts.no_follow += 1;
            }

            if anchor.title.as_deref().is_some_and(|t| !t.trim().is_empty()) {
                facts.with_title += 1;
            }
        }

        facts.title_ratio = facts.titled_ratio();
        facts.no_follow_ratio = facts.nofollow_ratio();

        facts
    }

    pub fn count_words(text: &str) -> usize {
        text.split_whitespace().count()
    }

    fn social_meta(doc: &dyn DocumentAccessor) -> SocialMeta {
        let named = |key: &str| non_blank(doc.meta(MetaAttr::Name, key));
        let property = |key: &str| non_blank(doc.meta(MetaAttr::Property, key));
        // Twitter tags show up under both attributes in the wild.
        let twitter = |key: &str| named(key).or_else(|| property(key));

        let image_size = match (
            twitter("twitter:image:width").and_then(|w| w.parse::<u32>().ok()),
            twitter("twitter:image:height").and_then(|h| h.parse::<u32>().ok()),
        ) {
            (Some(width), Some(height)) if width > 0 && height > 0 => {
                Some(ImageSize { width, height })
            }
            _ => None,
        };

        SocialMeta {
            robots: named("robots"),
            keywords: named("keywords"),
            og_title: property("og:title"),
            og_description: property("og:description"),
            og_image: property("og:image"),
            og_url: property("og:url"),
            og_type: property("og:type"),
            has_open_graph: doc.has_meta_prefix(MetaAttr::Property, "og:"),
            has_twitter_card: doc.has_meta_prefix(MetaAttr::Name, "twitter:")
                || doc.has_meta_prefix(MetaAttr::Property, "twitter:"),
            twitter_card: TwitterCardFacts {
                card: twitter("twitter:card"),
                title: twitter("twitter:title"),
                description: twitter("twitter:description"),
                image: twitter("twitter:image"),
                image_size,
            },
        }
    }
}

impl Default for PageExtractor {
    fn default() -> Self {
        Self::new(&AnalyzerSettings::default())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
