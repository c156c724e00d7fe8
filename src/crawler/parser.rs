//! HTML parser for extracting links from a fetched page
//!
//! The tokenizer (`lol_html`) reports every start tag in document order.
//! A two-state machine consumes those tags:
//!
//! - **SeekBody**: skip tags until `<body>` is seen
//! - **SeekAnchor**: collect the `href` of every `<a>` tag
//!
//! Running out of input while still seeking the body is an error; running
//! out of input while collecting anchors is the normal way a page ends.

use crate::url::normalize_link;
use crate::ParseError;
use lol_html::{element, HtmlRewriter, Settings};
use url::Url;

/// Links extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page's own URL, used as the normalization base
    pub url: String,

    /// Canonical same-host URLs found under `<body>`, in document order
    pub links: Vec<String>,
}

/// Position of the parser within the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    SeekBody,
    SeekAnchor,
}

impl ParseState {
    /// Advances the machine over one start tag
    ///
    /// Returns the next state and whether the tag's `href` should be taken.
    fn on_start_tag(self, tag: &str) -> (Self, bool) {
        match self {
            Self::SeekBody if tag.eq_ignore_ascii_case("body") => (Self::SeekAnchor, false),
            Self::SeekBody => (Self::SeekBody, false),
            Self::SeekAnchor => (Self::SeekAnchor, tag.eq_ignore_ascii_case("a")),
        }
    }

    /// Maps end of input to the parse outcome
    fn on_end(self) -> Result<(), ParseError> {
        match self {
            Self::SeekBody => Err(ParseError::BodyNotFound),
            Self::SeekAnchor => Ok(()),
        }
    }
}

/// Drives the state machine over a document, calling `on_href` for every
/// anchor `href` found under `<body>`
fn scan_anchors<F>(html: &[u8], mut on_href: F) -> Result<(), ParseError>
where
    F: FnMut(String),
{
    let mut state = ParseState::SeekBody;

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("*", |el| {
                let (next, take_href) = state.on_start_tag(&el.tag_name());
                if take_href {
                    if let Some(href) = el.get_attribute("href") {
                        on_href(href);
                    }
                }
                state = next;
                Ok(())
            })],
            ..Settings::default()
        },
        |_: &[u8]| {},
    );

    rewriter
        .write(html)
        .map_err(|e| ParseError::Html(e.to_string()))?;
    rewriter.end().map_err(|e| ParseError::Html(e.to_string()))?;

    state.on_end()
}

/// Parses a fetched page and extracts its same-host links
///
/// Each `href` is normalized against `base`. Skipped links (other hosts,
/// other schemes, bare fragments) are dropped silently; links that fail to
/// normalize are logged and dropped without failing the page.
///
/// # Arguments
///
/// * `html` - The buffered response body
/// * `base` - The URL the page was fetched from
///
/// # Returns
///
/// * `Ok(ParsedPage)` - The page's canonical links (possibly none)
/// * `Err(ParseError)` - No `<body>` was found, or the tokenizer failed
///
/// # Example
///
/// ```
/// use hop_crawl::crawler::parse_page;
/// use url::Url;
///
/// let html = br#"<html><body><a href="/page">Link</a></body></html>"#;
/// let base = Url::parse("http://x.test/").unwrap();
/// let page = parse_page(html, &base).unwrap();
/// assert_eq!(page.links, vec!["http://x.test/page".to_string()]);
/// ```
pub fn parse_page(html: &[u8], base: &Url) -> Result<ParsedPage, ParseError> {
    let mut links = Vec::new();

    scan_anchors(html, |href| match normalize_link(&href, base) {
        Ok(Some(url)) => links.push(url),
        Ok(None) => tracing::trace!("Skipping out-of-scope link {}", href),
        Err(e) => tracing::warn!("html parser: cannot handle link {}: {}", href, e),
    })?;

    Ok(ParsedPage {
        url: base.to_string(),
        links,
    })
}

/// Extracts every raw `href` under `<body>`, without normalization
///
/// # Example
///
/// ```
/// use hop_crawl::crawler::extract_hrefs;
///
/// let html = br##"<body><a href="#top">Top</a><a href="../up">Up</a></body>"##;
/// assert_eq!(extract_hrefs(html).unwrap(), vec!["#top", "../up"]);
/// ```
pub fn extract_hrefs(html: &[u8]) -> Result<Vec<String>, ParseError> {
    let mut hrefs = Vec::new();
    scan_anchors(html, |href| hrefs.push(href))?;
    Ok(hrefs)
}
