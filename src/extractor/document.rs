//! Read-only view of a page document.
//!
//! The extractor only talks to [`DocumentAccessor`], so it can run against a
//! parsed HTML snapshot, a live page bridge or a hand-built fake in tests.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

use crate::error::Result;

/// Which attribute identifies a `<meta>` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    fn attr_name(&self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageNode {
    pub alt: Option<String>,
    /// Intrinsic size; 0 when unknown or the image failed to load.
    pub natural_width: u32,
    pub natural_height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorNode {
    pub href: Option<String>,
    pub rel: Option<String>,
    pub title: Option<String>,
}

pub trait DocumentAccessor {
    /// URL of the page. The only fallible call: a document that cannot
    /// report where it lives is considered inaccessible.
    fn location(&self) -> Result<Url>;

    /// Document title, whitespace collapsed. Empty when there is none.
    fn title(&self) -> String;

    /// `content` of the first `<meta>` whose `attr` equals `key`.
    fn meta(&self, attr: MetaAttr, key: &str) -> Option<String>;

    /// Whether any `<meta>` has an `attr` value starting with `prefix`.
    fn has_meta_prefix(&self, attr: MetaAttr, prefix: &str) -> bool;

    /// Raw `href` of `<link rel="canonical">`, not resolved.
    fn canonical_href(&self) -> Option<String>;

    /// Number of `<hN>` elements for `level` in 1..=6.
    fn heading_count(&self, level: u8) -> usize;

    fn first_h1_text(&self) -> Option<String>;

    fn images(&self) -> Vec<ImageNode>;

    /// Every `<a>` element, with or without `href`.
    fn anchors(&self) -> Vec<AnchorNode>;

    /// Human-visible body text.
    fn body_text(&self) -> String;
}

/// [`DocumentAccessor`] over a static HTML snapshot.
///
/// Static markup has no rendered state, so natural image dimensions come
/// from the `width`/`height` attributes.
pub struct HtmlDocument {
    html: Html,
    url: Url,
}

const HIDDEN_TEXT_CONTAINERS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Elements whose edges separate words in rendered text.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "details", "dialog", "div", "dl",
    "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "summary", "table",
    "td", "th", "tr", "ul",
];

fn selector(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).unwrap())
}

fn attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(|s| s.to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a dimension attribute such as `"640"` or `"640px"`.
fn parse_dimension(raw: Option<&str>) -> u32 {
    raw.map(|v| v.trim().trim_end_matches("px").trim())
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(0)
}

impl HtmlDocument {
    pub fn parse(html: &str, url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        log::trace!("[EXTRACT] Parsing {} bytes of HTML for {}", html.len(), url);
        Ok(Self {
            html: Html::parse_document(html),
            url,
        })
    }

    fn metas(&self) -> impl Iterator<Item = ElementRef<'_>> {
        static META: OnceLock<Selector> = OnceLock::new();
        self.html.select(selector(&META, "meta"))
    }
}

impl DocumentAccessor for HtmlDocument {
    fn location(&self) -> Result<Url> {
        Ok(self.url.clone())
    }

    fn title(&self) -> String {
        static TITLE: OnceLock<Selector> = OnceLock::new();
        self.html
            .select(selector(&TITLE, "title"))
            .next()
            .map(|el| collapse_whitespace(&el.text().collect::<String>()))
            .unwrap_or_default()
    }

    fn meta(&self, attr_kind: MetaAttr, key: &str) -> Option<String> {
        self.metas()
            .find(|el| {
                el.value()
                    .attr(attr_kind.attr_name())
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case(key))
            })
            .and_then(|el| attr(&el, "content"))
    }

    fn has_meta_prefix(&self, attr_kind: MetaAttr, prefix: &str) -> bool {
        self.metas().any(|el| {
            el.value()
                .attr(attr_kind.attr_name())
                .is_some_and(|v| v.trim().to_ascii_lowercase().starts_with(prefix))
        })
    }

    fn canonical_href(&self) -> Option<String> {
        static LINK: OnceLock<Selector> = OnceLock::new();
        self.html
            .select(selector(&LINK, "link[rel][href]"))
            .find(|el| {
                el.value().attr("rel").is_some_and(|rel| {
                    rel.split_whitespace()
                        .any(|token| token.eq_ignore_ascii_case("canonical"))
                })
            })
            .and_then(|el| attr(&el, "href"))
    }

    fn heading_count(&self, level: u8) -> usize {
        static HEADINGS: OnceLock<Selector> = OnceLock::new();
        let tag = format!("h{}", level);
        self.html
            .select(selector(&HEADINGS, "h1, h2, h3, h4, h5, h6"))
            .filter(|el| el.value().name() == tag)
            .count()
    }

    fn first_h1_text(&self) -> Option<String> {
        static H1: OnceLock<Selector> = OnceLock::new();
        self.html
            .select(selector(&H1, "h1"))
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    fn images(&self) -> Vec<ImageNode> {
        static IMG: OnceLock<Selector> = OnceLock::new();
        self.html
            .select(selector(&IMG, "img"))
            .map(|el| ImageNode {
                alt: attr(&el, "alt"),
                natural_width: parse_dimension(el.value().attr("width")),
                natural_height: parse_dimension(el.value().attr("height")),
            })
            .collect()
    }

    fn anchors(&self) -> Vec<AnchorNode> {
        static ANCHOR: OnceLock<Selector> = OnceLock::new();
        self.html
            .select(selector(&ANCHOR, "a"))
            .map(|el| AnchorNode {
                href: attr(&el, "href"),
                rel: attr(&el, "rel"),
                title: attr(&el, "title"),
            })
            .collect()
    }

    fn body_text(&self) -> String {
        static BODY: OnceLock<Selector> = OnceLock::new();
        let mut out = String::new();
        if let Some(body) = self.html.select(selector(&BODY, "body")).next() {
            push_visible_text(body, &mut out);
        }
        out
    }
}

/// Append the text under `element` the way a browser lays it out: inline
/// runs join directly, block boundaries and `<br>` break words.
fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            let name = child.value().name();
            if HIDDEN_TEXT_CONTAINERS.contains(&name) {
                continue;
            }
            let breaks = BLOCK_ELEMENTS.contains(&name);
            if breaks {
                out.push(' ');
            }
            push_visible_text(child, out);
            if breaks {
                out.push(' ');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>  Guide   SEO
              complet </title>
            <meta name="Description" content="A description">
            <meta property="og:title" content="OG title">
            <meta name="twitter:card" content="summary">
            <link rel="stylesheet" href="/main.css">
            <link rel="canonical" href="/page">
          </head>
          <body>
            <h1> Main heading </h1>
            <h2>Sub</h2><h2>Sub 2</h2>
            <p>Hello world</p>
            <script>var hidden = "not counted";</script>
            <img src="a.png" alt="A" width="640" height="480px">
            <img src="b.png">
            <a href="/x" rel="nofollow" title="X">x</a>
            <a>no href</a>
          </body>
        </html>
    "#;

    fn doc() -> HtmlDocument {
        HtmlDocument::parse(PAGE, "https://example.com/page").unwrap()
    }

    #[test]
    fn reads_head_metadata() {
        let doc = doc();
        assert_eq!(doc.title(), "Guide SEO complet");
        assert_eq!(
            doc.meta(MetaAttr::Name, "description").as_deref(),
            Some("A description")
        );
        assert_eq!(
            doc.meta(MetaAttr::Property, "og:title").as_deref(),
            Some("OG title")
        );
        assert!(doc.has_meta_prefix(MetaAttr::Property, "og:"));
        assert!(doc.has_meta_prefix(MetaAttr::Name, "twitter:"));
        assert_eq!(doc.canonical_href().as_deref(), Some("/page"));
    }

    #[test]
    fn counts_headings_per_level() {
        let doc = doc();
        assert_eq!(doc.heading_count(1), 1);
        assert_eq!(doc.heading_count(2), 2);
        assert_eq!(doc.heading_count(3), 0);
        assert_eq!(doc.first_h1_text().as_deref(), Some("Main heading"));
    }

    #[test]
    fn reads_images_and_anchors() {
        let doc = doc();
        let images = doc.images();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].natural_width, 640);
        assert_eq!(images[0].natural_height, 480);
        assert_eq!(images[1], ImageNode::default());

        let anchors = doc.anchors();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].rel.as_deref(), Some("nofollow"));
        assert!(anchors[1].href.is_none());
    }

    #[test]
    fn body_text_skips_scripts() {
        let text = doc().body_text();
        assert!(text.contains("Hello world"));
        assert!(!text.contains("not counted"));
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let doc = HtmlDocument::parse(
            "<html><body><p>Hel<b>lo</b> wor<i>ld</i></p></body></html>",
            "https://example.com/",
        )
        .unwrap();
        let text = doc.body_text();
        assert_eq!(text.split_whitespace().collect::<Vec<_>>(), vec!["Hello", "world"]);
    }

    #[test]
    fn blocks_and_line_breaks_separate_words() {
        let doc = HtmlDocument::parse(
            "<html><body><div>one</div><div>two<br>three</div><ul><li>four</li><li>five</li></ul></body></html>",
            "https://example.com/",
        )
        .unwrap();
        let words: Vec<String> = doc
            .body_text()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        assert_eq!(words, vec!["one", "two", "three", "four", "five"]);
    }

    #[test]
    fn missing_elements_yield_empty_values() {
        let doc = HtmlDocument::parse("<html></html>", "https://example.com/").unwrap();
        assert_eq!(doc.title(), "");
        assert!(doc.canonical_href().is_none());
        assert!(doc.first_h1_text().is_none());
        assert!(doc.images().is_empty());
        assert_eq!(doc.body_text().trim(), "");
    }

    #[test]
    fn invalid_page_url_is_rejected() {
        assert!(matches!(
            HtmlDocument::parse("<html></html>", "not a url"),
            Err(AppError::InvalidUrl(_))
        ));
    }
}
