//! Per-category diagnostic rules. Each rule looks at one slice of the page
//! facts and is independent of the others.

use url::Url;

use super::points::{in_range_inclusive, LINK_TITLE_RATIO_TARGET, META_DESCRIPTION_RANGE, TITLE_RANGE};
use crate::domain::models::{
    CategoryVerdict, H1Facts, HeadingCounts, HeadingIssue, ImageFacts, LinkFacts, SocialMeta,
    Status, TextFacts, TwitterCardFacts, ViewportFacts,
};

pub const OG_DESCRIPTION_RANGE: (usize, usize) = (50, 300);
pub const TWITTER_IMAGE_RANGE: (u32, u32) = (120, 4096);
/// Above this nofollow share most of the page's links pass no equity.
pub const LINK_NOFOLLOW_RATIO_MAX: u8 = 50;

fn keyword_hint(has_keywords: bool) -> &'static str {
    if has_keywords {
        "Target keywords were detected."
    } else {
        "No target keywords detected; consider including your main keyword."
    }
}

pub fn title(title: &TextFacts) -> CategoryVerdict {
    let (min, max) = TITLE_RANGE;
    if title.length == 0 {
        return CategoryVerdict::new(
            Status::Fail,
            "The page has no title",
            "Add a <title> tag describing the page in 30 to 60 characters.",
        );
    }

    let hint = keyword_hint(title.has_keywords);
    if in_range_inclusive(title.length, TITLE_RANGE) {
        CategoryVerdict::new(
            Status::Pass,
            format!("Title length is good ({} characters)", title.length),
            hint,
        )
    } else if title.length < min {
        CategoryVerdict::new(
            Status::Warning,
            format!("Title is too short ({} characters)", title.length),
            format!("Aim for {} to {} characters. {}", min, max, hint),
        )
    } else {
        CategoryVerdict::new(
            Status::Warning,
            format!("Title is too long ({} characters)", title.length),
            format!(
                "Search engines truncate titles beyond {} characters. {}",
                max, hint
            ),
        )
    }
}

pub fn meta_description(meta: &TextFacts) -> CategoryVerdict {
    let (min, max) = META_DESCRIPTION_RANGE;
    if meta.length == 0 {
        return CategoryVerdict::new(
            Status::Fail,
            "The page has no meta description",
            format!(
                "Add a <meta name=\"description\"> of {} to {} characters summarising the page.",
                min, max
            ),
        );
    }

    let hint = keyword_hint(meta.has_keywords);
    if in_range_inclusive(meta.length, META_DESCRIPTION_RANGE) {
        CategoryVerdict::new(
            Status::Pass,
            format!("Meta description length is good ({} characters)", meta.length),
            hint,
        )
    } else {
        let problem = if meta.length < min { "too short" } else { "too long" };
        CategoryVerdict::new(
            Status::Warning,
            format!("Meta description is {} ({} characters)", problem, meta.length),
            format!("Aim for {} to {} characters. {}", min, max, hint),
        )
    }
}

pub fn h1(h1: &H1Facts) -> CategoryVerdict {
    match h1.count {
        0 => CategoryVerdict::new(
            Status::Fail,
            "No H1 tag found",
            "Add a single H1 heading that states the topic of the page.",
        ),
        1 => CategoryVerdict::new(
            Status::Pass,
            format!("One H1 tag: \"{}\"", h1.text),
            "Keep the H1 between 20 and 70 characters.",
        ),
        n => CategoryVerdict::new(
            Status::Warning,
            format!("{} H1 tags found", n),
            "Keep a single H1 and demote the others to H2.",
        ),
    }
}

pub fn headings(counts: &HeadingCounts, issues: &[HeadingIssue]) -> CategoryVerdict {
    if counts.h1 == 0 {
        return CategoryVerdict::new(
            Status::Fail,
            "The heading hierarchy has no H1",
            "Start the hierarchy with an H1 before any sub-heading.",
        );
    }
    if !issues.is_empty() {
        let listed: Vec<&str> = issues.iter().map(|i| i.issue.as_str()).collect();
        return CategoryVerdict::new(
            Status::Warning,
            format!("Heading hierarchy has {} issue(s): {}", issues.len(), listed.join("; ")),
            "Do not skip heading levels; nest H2 under H1, H3 under H2 and so on.",
        );
    }
    if !counts.has_subheadings() {
        return CategoryVerdict::new(
            Status::Info,
            "No sub-headings (H2-H6) found",
            "Break longer content into sections with H2 headings.",
        );
    }
    CategoryVerdict::new(
        Status::Pass,
        "Heading hierarchy is well structured",
        "Keep headings descriptive.",
    )
}

pub fn https(is_https: bool) -> CategoryVerdict {
    if is_https {
        CategoryVerdict::new(Status::Pass, "The page is served over HTTPS", "")
    } else {
        CategoryVerdict::new(
            Status::Fail,
            "The page is served over plain HTTP",
            "Install a TLS certificate and redirect HTTP to HTTPS.",
        )
    }
}

pub fn viewport(viewport: &ViewportFacts) -> CategoryVerdict {
    if !viewport.present {
        return CategoryVerdict::new(
            Status::Fail,
            "No viewport meta tag",
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">.",
        );
    }

    let mut missing = Vec::new();
    if !viewport.has_width() {
        missing.push("width");
    }
    if !viewport.has_initial_scale() {
        missing.push("initial-scale");
    }

    if missing.is_empty() {
        CategoryVerdict::new(
            Status::Pass,
            "Viewport is configured for mobile",
            viewport.content.clone(),
        )
    } else {
        CategoryVerdict::new(
            Status::Warning,
            format!("Viewport is missing: {}", missing.join(", ")),
            "Use content=\"width=device-width, initial-scale=1\".",
        )
    }
}

fn without_query_and_fragment(mut url: Url) -> Url {
    url.set_query(None);
    url.set_fragment(None);
    url
}

pub fn canonical(canonical_url: Option<&str>, page_url: &str) -> CategoryVerdict {
    let Some(canonical) = canonical_url else {
        return CategoryVerdict::new(
            Status::Fail,
            "No canonical URL declared",
            "Add <link rel=\"canonical\"> pointing to the preferred URL of this page.",
        );
    };

    if !canonical.starts_with("http") {
        return CategoryVerdict::new(
            Status::Warning,
            format!("Canonical URL is relative: {}", canonical),
            "Use an absolute canonical URL including the scheme and host.",
        );
    }

    let (Ok(declared), Ok(current)) = (Url::parse(canonical), Url::parse(page_url)) else {
        return CategoryVerdict::new(
            Status::Warning,
            format!("Canonical URL could not be compared: {}", canonical),
            "Check that the canonical URL is well formed.",
        );
    };

    if without_query_and_fragment(declared) == without_query_and_fragment(current) {
        CategoryVerdict::new(
            Status::Pass,
            "Canonical URL matches the page",
            canonical.to_string(),
        )
    } else {
        CategoryVerdict::new(
            Status::Warning,
            format!("Canonical URL points elsewhere: {}", canonical),
            "Make sure this page is meant to defer to another URL.",
        )
    }
}

pub fn robots(social: &SocialMeta) -> CategoryVerdict {
    let Some(robots) = social.robots.as_deref() else {
        return CategoryVerdict::new(
            Status::Info,
            "No robots meta tag; index and follow are assumed",
            "",
        );
    };

    let directives = social.robots_directives();
    if directives.iter().any(|d| d == "noindex") {
        CategoryVerdict::new(
            Status::Warning,
            format!("The page asks not to be indexed ({})", robots),
            "Remove noindex if the page should appear in search results.",
        )
    } else if directives.iter().any(|d| d == "nofollow") {
        CategoryVerdict::new(
            Status::Warning,
            format!("Links on this page are not followed ({})", robots),
            "Remove nofollow unless you intend to withhold link equity.",
        )
    } else {
        CategoryVerdict::new(Status::Pass, format!("Robots meta: {}", robots), "")
    }
}

pub fn images(images: &ImageFacts, large_threshold: u32) -> CategoryVerdict {
    if images.total == 0 {
        return CategoryVerdict::new(Status::Info, "No images on the page", "");
    }

    let mut problems = Vec::new();
    let without_alt = images.total.saturating_sub(images.with_alt);
    if without_alt > 0 {
        problems.push(format!(
            "{} of {} images lack alt text",
            without_alt, images.total
        ));
    }
    if images.large_images > 0 {
        problems.push(format!(
            "{} image(s) exceed {}px",
            images.large_images, large_threshold
        ));
    }

    if problems.is_empty() {
        CategoryVerdict::new(
            Status::Pass,
            format!("All {} images have alt text", images.total),
            "",
        )
    } else {
        CategoryVerdict::new(
            Status::Warning,
            problems.join("; "),
            "Describe every image with alt text and resize oversized images.",
        )
    }
}

pub fn links(links: &LinkFacts) -> CategoryVerdict {
    if links.total == 0 {
        return CategoryVerdict::new(
            Status::Warning,
            "No links found",
            "Link to related pages on your site and to relevant external sources.",
        );
    }

    let mut problems = Vec::new();
    if links.internal == 0 {
        problems.push("no internal links".to_string());
    }
    if links.external == 0 {
        problems.push("no external links".to_string());
    }
    let title_ratio = links.titled_ratio();
    if title_ratio < LINK_TITLE_RATIO_TARGET {
        problems.push(format!("only {}% of links have a title", title_ratio));
    }
    if links.broken > 0 {
        problems.push(format!("{} broken link(s)", links.broken));
    }
    let no_follow_ratio = links.nofollow_ratio();
    if no_follow_ratio > LINK_NOFOLLOW_RATIO_MAX {
        problems.push(format!("{}% of links are nofollow", no_follow_ratio));
    }

    let summary = format!(
        "{} links ({} internal, {} external, {}% nofollow)",
        links.total, links.internal, links.external, no_follow_ratio
    );
    if problems.is_empty() {
        CategoryVerdict::new(Status::Pass, summary, "")
    } else {
        CategoryVerdict::new(
            Status::Warning,
            format!("{}: {}", summary, problems.join(", ")),
            "Mix internal and external links, give them titles and fix malformed hrefs.",
        )
    }
}

pub fn content(word_count: usize, target: usize) -> CategoryVerdict {
    if word_count >= target {
        CategoryVerdict::new(
            Status::Pass,
            format!("{} words of content", word_count),
            "",
        )
    } else {
        CategoryVerdict::new(
            Status::Warning,
            format!("Only {} words of content", word_count),
            format!("Pages with at least {} words tend to rank better.", target),
        )
    }
}

pub fn keywords(social: &SocialMeta) -> CategoryVerdict {
    match social.keywords.as_deref() {
        Some(keywords) => CategoryVerdict::new(
            Status::Pass,
            format!("Meta keywords: {}", keywords),
            "Most search engines ignore this tag; keep it short.",
        ),
        None => CategoryVerdict::new(Status::Info, "No meta keywords", ""),
    }
}

pub fn open_graph(social: &SocialMeta) -> CategoryVerdict {
    let missing = social.missing_open_graph();
    if missing.len() > 3 {
        return CategoryVerdict::new(
            Status::Fail,
            format!("Open Graph tags are missing: {}", missing.join(", ")),
            "Add og:title, og:description, og:image, og:url and og:type for rich shares.",
        );
    }
    if !missing.is_empty() {
        return CategoryVerdict::new(
            Status::Warning,
            format!("Some Open Graph tags are missing: {}", missing.join(", ")),
            "Complete the five core Open Graph tags.",
        );
    }

    let (min, max) = OG_DESCRIPTION_RANGE;
    let description_length = social
        .og_description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0);
    if !in_range_inclusive(description_length, OG_DESCRIPTION_RANGE) {
        return CategoryVerdict::new(
            Status::Warning,
            format!(
                "og:description length is {} characters",
                description_length
            ),
            format!("Keep og:description between {} and {} characters.", min, max),
        );
    }

    CategoryVerdict::new(Status::Pass, "Open Graph tags are complete", "")
}

fn image_axis_ok(value: u32) -> bool {
    let (min, max) = TWITTER_IMAGE_RANGE;
    (min..=max).contains(&value)
}

pub fn twitter_card(card: &TwitterCardFacts) -> CategoryVerdict {
    let Some(kind) = card.card.as_deref() else {
        return CategoryVerdict::new(
            Status::Info,
            "No Twitter Card",
            "Add twitter:card to control how links to this page look on X/Twitter.",
        );
    };

    let missing: Vec<&str> = [
        ("twitter:title", &card.title),
        ("twitter:description", &card.description),
        ("twitter:image", &card.image),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_none())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return CategoryVerdict::new(
            Status::Warning,
            format!("Twitter Card ({}) is incomplete: {} missing", kind, missing.join(", ")),
            "Add the missing Twitter Card tags.",
        );
    }

    if let Some(size) = card.image_size {
        if !image_axis_ok(size.width) || !image_axis_ok(size.height) {
            let (min, max) = TWITTER_IMAGE_RANGE;
            return CategoryVerdict::new(
                Status::Warning,
                format!(
                    "Twitter Card image is {}x{}px",
                    size.width, size.height
                ),
                format!("Use an image between {} and {}px on both axes.", min, max),
            );
        }
    }

    CategoryVerdict::new(
        Status::Pass,
        format!("Twitter Card ({}) is complete", kind),
        "",
    )
}
