//! Page facts and scoring results - immutable value objects passed between
//! the extractor, the scorer and whatever presents the report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ====== Enums ======

/// Verdict status for one category.
///
/// Variants are declared in severity order so `Ord` gives
/// `Pass < Info < Warning < Fail < Error`. `Error` means the input for the
/// category was missing, not that the page is bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pass,
    Info,
    Warning,
    Fail,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "pass",
            Status::Info => "info",
            Status::Warning => "warning",
            Status::Fail => "fail",
            Status::Error => "error",
        }
    }

    /// True for statuses that ask the site owner to change something.
    pub fn needs_attention(&self) -> bool {
        matches!(self, Status::Warning | Status::Fail)
    }
}

/// Report section a verdict is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Structure,
    Security,
    Content,
    Social,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Structure => "Page structure",
            Section::Security => "Security & technical",
            Section::Content => "Content",
            Section::Social => "Social metadata",
        }
    }
}

/// Dimension that receives its own verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Title,
    MetaDescription,
    H1,
    Headings,
    Https,
    Viewport,
    Canonical,
    Robots,
    Images,
    Links,
    Content,
    Keywords,
    OpenGraph,
    TwitterCard,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::Title,
        Category::MetaDescription,
        Category::H1,
        Category::Headings,
        Category::Https,
        Category::Viewport,
        Category::Canonical,
        Category::Robots,
        Category::Images,
        Category::Links,
        Category::Content,
        Category::Keywords,
        Category::OpenGraph,
        Category::TwitterCard,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Title => "Page title",
            Category::MetaDescription => "Meta description",
            Category::H1 => "H1 tag",
            Category::Headings => "Heading hierarchy",
            Category::Https => "HTTPS",
            Category::Viewport => "Mobile viewport",
            Category::Canonical => "Canonical URL",
            Category::Robots => "Robots meta",
            Category::Images => "Images",
            Category::Links => "Links",
            Category::Content => "Text content",
            Category::Keywords => "Meta keywords",
            Category::OpenGraph => "Open Graph",
            Category::TwitterCard => "Twitter Card",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Category::Title | Category::MetaDescription | Category::H1 | Category::Headings => {
                Section::Structure
            }
            Category::Https | Category::Viewport | Category::Canonical | Category::Robots => {
                Section::Security
            }
            Category::Images | Category::Links | Category::Content | Category::Keywords => {
                Section::Content
            }
            Category::OpenGraph | Category::TwitterCard => Section::Social,
        }
    }
}

/// Bucket of the flat point table. Maxima add up to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCategory {
    Title,
    MetaDescription,
    H1,
    Https,
    Viewport,
    Images,
    Headings,
    Links,
    Content,
    SocialMeta,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 10] = [
        ScoreCategory::Title,
        ScoreCategory::MetaDescription,
        ScoreCategory::H1,
        ScoreCategory::Https,
        ScoreCategory::Viewport,
        ScoreCategory::Images,
        ScoreCategory::Headings,
        ScoreCategory::Links,
        ScoreCategory::Content,
        ScoreCategory::SocialMeta,
    ];

    pub fn max_points(&self) -> f64 {
        match self {
            ScoreCategory::Title => 15.0,
            ScoreCategory::Viewport => 5.0,
            _ => 10.0,
        }
    }
}

/// Outcome of probing a well-known site resource such as `/robots.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "url", rename_all = "camelCase")]
pub enum ResourceStatus {
    Found(String),
    /// Protected, which still proves it exists.
    Unauthorized(String),
    NotFound,
}

impl ResourceStatus {
    pub fn exists(&self) -> bool {
        matches!(
            self,
            ResourceStatus::Found(_) | ResourceStatus::Unauthorized(_)
        )
    }
}

// ====== Page facts ======

/// Text of an element plus the cheap keyword heuristic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFacts {
    pub text: String,
    pub length: usize,
    pub has_keywords: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct H1Facts {
    /// Trimmed text of the first H1 on the page.
    pub text: String,
    pub count: usize,
    pub length: usize,
}

/// Number of heading elements per level. Serializes as `{"h1": n, ...}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingCounts {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub h4: usize,
    pub h5: usize,
    pub h6: usize,
}

impl HeadingCounts {
    pub fn from_levels(counts: [usize; 6]) -> Self {
        Self {
            h1: counts[0],
            h2: counts[1],
            h3: counts[2],
            h4: counts[3],
            h5: counts[4],
            h6: counts[5],
        }
    }

    /// Count for `level` (1..=6); 0 for anything else.
    pub fn get(&self, level: u8) -> usize {
        match level {
            1 => self.h1,
            2 => self.h2,
            3 => self.h3,
            4 => self.h4,
            5 => self.h5,
            6 => self.h6,
            _ => 0,
        }
    }

    pub fn has_subheadings(&self) -> bool {
        (2..=6).any(|level| self.get(level) > 0)
    }
}

/// One skipped level in the heading hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingIssue {
    pub level: u8,
    pub issue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportFacts {
    pub present: bool,
    pub content: String,
}

impl ViewportFacts {
    pub fn has_width(&self) -> bool {
        self.has_directive("width")
    }

    pub fn has_initial_scale(&self) -> bool {
        self.has_directive("initial-scale")
    }

    /// Keys are compared trimmed and case-insensitively; a key needs a value.
    fn has_directive(&self, name: &str) -> bool {
        self.content.split(',').any(|directive| {
            directive
                .split_once('=')
                .is_some_and(|(key, _)| key.trim().eq_ignore_ascii_case(name))
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageFacts {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    /// 0-100; 100 when the page has no images.
    pub alt_text_ratio: u8,
    pub with_dimensions: usize,
    pub without_dimensions: usize,
    pub large_images: usize,
}

impl ImageFacts {
    /// Alt coverage recomputed from the counts, so a payload without
    /// `altTextRatio` still scores correctly.
    pub fn alt_ratio(&self) -> u8 {
        if self.total == 0 {
            100
        } else {
            percent(self.with_alt.min(self.total), self.total)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkFacts {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    pub no_follow: usize,
    pub no_href: usize,
    pub with_title: usize,
    pub broken: usize,
    /// Share of linked anchors carrying a title, 0-100.
    pub title_ratio: u8,
    /// Share of linked anchors marked nofollow, 0-100.
    pub no_follow_ratio: u8,
}

impl LinkFacts {
    /// Anchors with a usable href. `javascript:` and href-less anchors are
    /// left out so they never dilute the ratios.
    pub fn linked(&self) -> usize {
        self.total.saturating_sub(self.no_href)
    }

    /// Title coverage recomputed from `with_title / linked()`.
    pub fn titled_ratio(&self) -> u8 {
        percent(self.with_title.min(self.linked()), self.linked())
    }

    /// Nofollow share recomputed from `no_follow / linked()`.
    pub fn nofollow_ratio(&self) -> u8 {
        percent(self.no_follow.min(self.linked()), self.linked())
    }
}

/// Rounded share of `part` in `whole`, 0 when `whole` is 0.
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round().min(100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterCardFacts {
    pub card: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_size: Option<ImageSize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMeta {
    pub robots: Option<String>,
    pub keywords: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
    pub og_type: Option<String>,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
    pub twitter_card: TwitterCardFacts,
}

impl SocialMeta {
    /// Names of the five core Open Graph tags that are missing.
    pub fn missing_open_graph(&self) -> Vec<&'static str> {
        [
            ("og:title", &self.og_title),
            ("og:description", &self.og_description),
            ("og:image", &self.og_image),
            ("og:url", &self.og_url),
            ("og:type", &self.og_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Lower-cased, trimmed robots directives.
    pub fn robots_directives(&self) -> Vec<String> {
        self.robots
            .as_deref()
            .map(|r| {
                r.split(',')
                    .map(|d| d.trim().to_lowercase())
                    .filter(|d| !d.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn allows_indexing(&self) -> bool {
        !self.robots_directives().iter().any(|d| d == "noindex")
    }
}

/// Snapshot of everything the scorer looks at.
///
/// The extractor always fills every section. Sections are optional so a
/// payload deserialized from elsewhere can leave one out; the scorer then
/// reports that category as [`Status::Error`] and awards it no points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFacts {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub analyzed_at: DateTime<Utc>,
    pub title: Option<TextFacts>,
    pub meta_description: Option<TextFacts>,
    pub h1: Option<H1Facts>,
    pub headings: Option<HeadingCounts>,
    /// Only read alongside `headings`.
    #[serde(default)]
    pub heading_structure: Vec<HeadingIssue>,
    /// Absent means the page has no canonical link, which is a finding
    /// rather than missing data.
    pub canonical_url: Option<String>,
    #[serde(rename = "isHTTPS")]
    pub is_https: Option<bool>,
    pub viewport: Option<ViewportFacts>,
    pub images: Option<ImageFacts>,
    pub links: Option<LinkFacts>,
    pub word_count: Option<usize>,
    pub social_meta: Option<SocialMeta>,
}

// ====== Scoring output ======

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryVerdict {
    pub status: Status,
    pub message: String,
    pub tip: String,
}

impl CategoryVerdict {
    pub fn new(status: Status, message: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            tip: tip.into(),
        }
    }

    /// Verdict for a category whose input section is absent.
    pub fn missing(what: &str) -> Self {
        Self::new(
            Status::Error,
            format!("{} data missing", what),
            format!("The {} could not be analyzed because its data is missing.", what),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    /// Composite score, 0-100.
    pub total: u8,
    pub per_category: BTreeMap<Category, CategoryVerdict>,
    /// Points earned per bucket, two decimals.
    pub breakdown: BTreeMap<ScoreCategory, f64>,
}

impl ScoreResult {
    /// Most severe status across all verdicts, `None` when there are none.
    pub fn worst_status(&self) -> Option<Status> {
        self.per_category.values().map(|v| v.status).max()
    }

    pub fn count(&self, status: Status) -> usize {
        self.per_category
            .values()
            .filter(|v| v.status == status)
            .count()
    }

    pub fn verdict(&self, category: Category) -> Option<&CategoryVerdict> {
        self.per_category.get(&category)
    }

    /// Verdicts of one section in category order.
    pub fn section(&self, section: Section) -> Vec<(Category, &CategoryVerdict)> {
        self.per_category
            .iter()
            .filter(|(c, _)| c.section() == section)
            .map(|(c, v)| (*c, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_orders_by_severity() {
        assert!(Status::Pass < Status::Info);
        assert!(Status::Info < Status::Warning);
        assert!(Status::Warning < Status::Fail);
        assert!(Status::Fail < Status::Error);
        assert_eq!(
            [Status::Warning, Status::Pass, Status::Fail, Status::Info]
                .into_iter()
                .max(),
            Some(Status::Fail)
        );
    }

    #[test]
    fn score_category_maxima_sum_to_100() {
        let total: f64 = ScoreCategory::ALL.iter().map(|c| c.max_points()).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn every_category_has_a_section() {
        for section in [
            Section::Structure,
            Section::Security,
            Section::Content,
            Section::Social,
        ] {
            assert!(Category::ALL.iter().any(|c| c.section() == section));
        }
    }

    #[test]
    fn robots_directives_are_normalised() {
        let meta = SocialMeta {
            robots: Some(" NoIndex , follow ,".into()),
            ..Default::default()
        };
        assert_eq!(meta.robots_directives(), vec!["noindex", "follow"]);
        assert!(!meta.allows_indexing());
        assert!(SocialMeta::default().allows_indexing());
    }

    #[test]
    fn missing_open_graph_lists_absent_tags_in_order() {
        let meta = SocialMeta {
            og_title: Some("t".into()),
            og_url: Some("https://example.com".into()),
            ..Default::default()
        };
        assert_eq!(
            meta.missing_open_graph(),
            vec!["og:description", "og:image", "og:type"]
        );
    }

    #[test]
    fn page_facts_deserialize_with_missing_sections() {
        let facts: PageFacts =
            serde_json::from_str(r#"{"url":"https://example.com","isHTTPS":true}"#).unwrap();
        assert_eq!(facts.is_https, Some(true));
        assert!(facts.title.is_none());
        assert!(facts.images.is_none());
        assert!(facts.headings.is_none());
        assert!(facts.word_count.is_none());
        assert!(facts.heading_structure.is_empty());
    }

    #[test]
    fn viewport_directives_match_whole_keys() {
        let viewport = |content: &str| ViewportFacts {
            present: true,
            content: content.to_string(),
        };
        assert!(!viewport("min-width=500").has_width());
        assert!(viewport("Width = device-width").has_width());
        assert!(viewport("width=device-width, Initial-Scale=1").has_initial_scale());
        assert!(!viewport("maximum-initial-scale=1").has_initial_scale());
        assert!(!viewport("width").has_width());
    }

    #[test]
    fn ratios_are_recomputed_from_counts() {
        let images = ImageFacts {
            total: 10,
            with_alt: 10,
            ..Default::default()
        };
        assert_eq!(images.alt_text_ratio, 0);
        assert_eq!(images.alt_ratio(), 100);
        assert_eq!(ImageFacts::default().alt_ratio(), 100);

        let links = LinkFacts {
            total: 20,
            no_href: 4,
            with_title: 8,
            no_follow: 4,
            ..Default::default()
        };
        assert_eq!(links.titled_ratio(), 50);
        assert_eq!(links.nofollow_ratio(), 25);
        assert_eq!(LinkFacts::default().titled_ratio(), 0);
    }

    #[test]
    fn resource_status_exists() {
        assert!(ResourceStatus::Found("url".into()).exists());
        assert!(ResourceStatus::Unauthorized("url".into()).exists());
        assert!(!ResourceStatus::NotFound.exists());
    }

    #[test]
    fn heading_counts_serialize_as_level_map() {
        let counts = HeadingCounts::from_levels([1, 2, 0, 0, 0, 0]);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["h1"], 1);
        assert_eq!(json["h2"], 2);
        assert_eq!(counts.get(7), 0);
        assert!(counts.has_subheadings());
    }
}
