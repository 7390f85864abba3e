//! Shared fixtures for unit tests, integration tests and benchmarks.

use chrono::{DateTime, Utc};

use crate::domain::models::{
    H1Facts, HeadingCounts, ImageFacts, LinkFacts, PageFacts, SocialMeta, TextFacts,
    TwitterCardFacts, ViewportFacts,
};

pub const REFERENCE_URL: &str = "https://bookshop.example/guide";

const TITLE: &str = "Complete SEO guide for independent bookshops.";
const META_DESCRIPTION: &str = "Practical checklist to help independent bookshops attract nearby readers, improve their search visibility and turn casual visits into sales.";
const H1: &str = "How independent bookshops get found online";
const OG_DESCRIPTION: &str = "Practical checklist to help independent bookshops attract nearby readers and turn casual visits into loyal customers too";

/// Facts of a well-optimised page: every verdict passes except robots,
/// which is informational because the tag is absent. Scores 97 (the meta
/// description carries no keyword).
pub fn reference_page_facts() -> PageFacts {
    PageFacts {
        url: REFERENCE_URL.to_string(),
        analyzed_at: DateTime::<Utc>::from_timestamp(1_714_564_800, 0).unwrap_or_default(),
        title: Some(TextFacts {
            text: TITLE.to_string(),
            length: 45,
            has_keywords: true,
        }),
        meta_description: Some(TextFacts {
            text: META_DESCRIPTION.to_string(),
            length: 140,
            has_keywords: false,
        }),
        h1: Some(H1Facts {
            text: H1.to_string(),
            count: 1,
            length: H1.chars().count(),
        }),
        headings: Some(HeadingCounts::from_levels([1, 3, 2, 0, 0, 0])),
        heading_structure: Vec::new(),
        canonical_url: Some(REFERENCE_URL.to_string()),
        is_https: Some(true),
        viewport: Some(ViewportFacts {
            present: true,
            content: "width=device-width, initial-scale=1".to_string(),
        }),
        images: Some(ImageFacts {
            total: 10,
            with_alt: 10,
            without_alt: 0,
            alt_text_ratio: 100,
            with_dimensions: 10,
            without_dimensions: 0,
            large_images: 0,
        }),
        links: Some(LinkFacts {
            total: 20,
            internal: 12,
            external: 8,
            no_follow: 0,
            no_href: 0,
            with_title: 15,
            broken: 0,
            title_ratio: 75,
            no_follow_ratio: 0,
        }),
        word_count: Some(450),
        social_meta: Some(SocialMeta {
            robots: None,
            keywords: Some("bookshop, seo, local search".to_string()),
            og_title: Some(TITLE.to_string()),
            og_description: Some(OG_DESCRIPTION.to_string()),
            og_image: Some("https://bookshop.example/cover.jpg".to_string()),
            og_url: Some(REFERENCE_URL.to_string()),
            og_type: Some("article".to_string()),
            has_open_graph: true,
            has_twitter_card: true,
            twitter_card: TwitterCardFacts {
                card: Some("summary_large_image".to_string()),
                title: Some(TITLE.to_string()),
                description: Some(OG_DESCRIPTION.to_string()),
                image: Some("https://bookshop.example/cover.jpg".to_string()),
                image_size: None,
            },
        }),
    }
}

/// Markup that extracts to the same shape as [`reference_page_facts`],
/// served from [`REFERENCE_URL`].
pub fn reference_page_html() -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", H1));
    for section in 0..3 {
        body.push_str(&format!("<h2>Section {}</h2>\n", section + 1));
        if section < 2 {
            body.push_str(&format!("<h3>Detail {}</h3>\n", section + 1));
        }
        body.push_str("<p>");
        body.push_str(&"Readers browse shelves, ask for advice and come back for events. ".repeat(14));
        body.push_str("</p>\n");
    }

    for i in 0..10 {
        body.push_str(&format!(
            r#"<img src="/img/shelf-{i}.jpg" alt="Shelf {i}" width="800" height="600">"#
        ));
        body.push('\n');
    }

    // 12 internal (10 titled), 8 external (5 titled)
    for i in 0..12 {
        let title = if i < 10 {
            format!(r#" title="Page {i}""#)
        } else {
            String::new()
        };
        body.push_str(&format!(r#"<a href="/page-{i}"{title}>Page {i}</a>"#));
        body.push('\n');
    }
    for i in 0..8 {
        let title = if i < 5 {
            format!(r#" title="Partner {i}""#)
        } else {
            String::new()
        };
        body.push_str(&format!(
            r#"<a href="https://partner{i}.example/"{title}>Partner {i}</a>"#
        ));
        body.push('\n');
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{TITLE}</title>
  <meta name="description" content="{META_DESCRIPTION}">
  <meta name="keywords" content="bookshop, seo, local search">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="canonical" href="{REFERENCE_URL}">
  <meta property="og:title" content="{TITLE}">
  <meta property="og:description" content="{OG_DESCRIPTION}">
  <meta property="og:image" content="https://bookshop.example/cover.jpg">
  <meta property="og:url" content="{REFERENCE_URL}">
  <meta property="og:type" content="article">
  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:title" content="{TITLE}">
  <meta name="twitter:description" content="{OG_DESCRIPTION}">
  <meta name="twitter:image" content="https://bookshop.example/cover.jpg">
  <script>window.analytics = "should not count as words";</script>
</head>
<body>
{body}</body>
</html>
"#
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::document::HtmlDocument;
    use crate::extractor::PageExtractor;

    #[test]
    fn reference_strings_have_expected_lengths() {
        assert_eq!(TITLE.chars().count(), 45);
        assert_eq!(META_DESCRIPTION.chars().count(), 140);
        assert_eq!(OG_DESCRIPTION.chars().count(), 120);
        assert!((20..=70).contains(&H1.chars().count()));
    }

    #[test]
    fn reference_html_extracts_to_reference_shape() {
        let doc = HtmlDocument::parse(&reference_page_html(), REFERENCE_URL).unwrap();
        let facts = PageExtractor::default().extract(&doc).unwrap();
        let expected = reference_page_facts();

        assert_eq!(facts.title, expected.title);
        assert_eq!(facts.meta_description, expected.meta_description);
        assert_eq!(facts.h1, expected.h1);
        assert_eq!(facts.headings, expected.headings);
        assert_eq!(facts.canonical_url, expected.canonical_url);
        assert_eq!(facts.viewport, expected.viewport);
        assert_eq!(facts.images, expected.images);
        assert_eq!(facts.links, expected.links);
        assert_eq!(facts.social_meta, expected.social_meta);
        assert!(facts.word_count.is_some_and(|words| words >= 300));
        assert!(facts.heading_structure.is_empty());
    }
}
