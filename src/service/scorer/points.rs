//! Flat additive point table. Every function returns raw points; the caller
//! clamps each bucket to `[0, max_points]`.

use crate::domain::models::{
    H1Facts, HeadingCounts, HeadingIssue, ImageFacts, LinkFacts, SocialMeta, TextFacts,
    ViewportFacts,
};

pub const TITLE_RANGE: (usize, usize) = (30, 60);
pub const META_DESCRIPTION_RANGE: (usize, usize) = (70, 160);
pub const H1_LENGTH_RANGE: (usize, usize) = (20, 70);
pub const LINK_TITLE_RATIO_TARGET: u8 = 50;

pub fn in_range_inclusive(value: usize, (min, max): (usize, usize)) -> bool {
    (min..=max).contains(&value)
}

/// Points for a length that should fall in `range`, decaying linearly with
/// the distance from `ideal` once outside it.
fn length_points(length: usize, range: (usize, usize), full: f64, ideal: f64, decay: f64) -> f64 {
    if in_range_inclusive(length, range) {
        full
    } else if length > 0 {
        (full - (ideal - length as f64).abs() * decay).max(0.0)
    } else {
        0.0
    }
}

pub fn title(title: &TextFacts) -> f64 {
    let base = length_points(title.length, TITLE_RANGE, 10.0, 45.0, 0.2);
    base + if title.has_keywords { 5.0 } else { 0.0 }
}

pub fn meta_description(meta: &TextFacts) -> f64 {
    let base = length_points(meta.length, META_DESCRIPTION_RANGE, 7.0, 115.0, 0.05);
    base + if meta.has_keywords { 3.0 } else { 0.0 }
}

pub fn h1(h1: &H1Facts) -> f64 {
    match h1.count {
        0 => 0.0,
        1 if in_range_inclusive(h1.length, H1_LENGTH_RANGE) => 10.0,
        1 => 8.0,
        _ => 5.0,
    }
}

pub fn https(is_https: bool) -> f64 {
    if is_https {
        10.0
    } else {
        0.0
    }
}

pub fn viewport(viewport: &ViewportFacts) -> f64 {
    if !viewport.present {
        0.0
    } else if viewport.has_width() && viewport.has_initial_scale() {
        5.0
    } else {
        3.0
    }
}

pub fn images(images: &ImageFacts) -> f64 {
    if images.total == 0 {
        return 10.0;
    }
    let total = images.total as f64;
    let alt = images.alt_ratio() as f64 / 100.0 * 7.0;
    let dimensions = images.with_dimensions as f64 / total * 3.0;
    let large_penalty = (images.large_images as f64 / total * 3.0).min(3.0);
    alt + dimensions - large_penalty
}

pub fn headings(counts: &HeadingCounts, issues: &[HeadingIssue]) -> f64 {
    let presence = if counts.h1 > 0 && counts.h2 > 0 { 5.0 } else { 0.0 };
    presence + (5.0 - issues.len() as f64).max(0.0)
}

pub fn links(links: &LinkFacts) -> f64 {
    if links.total == 0 {
        return 0.0;
    }

    let mut points = 0.0;
    if links.internal > 0 && links.external > 0 {
        points += 4.0;
    }

    let title_ratio = links.titled_ratio().min(LINK_TITLE_RATIO_TARGET) as f64;
    points += 3.0 * title_ratio / LINK_TITLE_RATIO_TARGET as f64;

    let linked = links.linked();
    if linked > 0 {
        points += 3.0 * (1.0 - links.broken as f64 / linked as f64);
    }

    points
}

pub fn content(word_count: usize, target: usize) -> f64 {
    if word_count >= target {
        10.0
    } else {
        word_count as f64 / target as f64 * 10.0
    }
}

pub fn social_meta(canonical_url: Option<&str>, social: &SocialMeta) -> f64 {
    let mut points = 0.0;
    if canonical_url.is_some() {
        points += 3.0;
    }
    if social.allows_indexing() {
        points += 2.0;
    }
    if social.has_open_graph {
        points += 3.0;
    }
    if social.has_twitter_card {
        points += 2.0;
    }
    points
}
