use crate::url::host::same_host;
use crate::UrlError;
use url::{ParseError, Url};

/// Normalizes a link found on a page into its canonical URL string
///
/// # Normalization Steps
///
/// 1. Parse the link (absolute, protocol-relative or relative); reject if malformed
/// 2. Skip links naming a different host than the base
/// 3. Force the host (and port) to the base's
/// 4. Skip non-HTTP(S) schemes; reject an HTTP(S) scheme that differs from the base
/// 5. Force the scheme to the base's
/// 6. Resolve a relative path against the base page
/// 7. Clean the path:
///    - Remove dot segments (. and ..)
///    - Collapse repeated slashes
///    - Remove trailing slash
///    - The root path is rendered as `/`
/// 8. Remove fragment (everything after #)
/// 9. Skip links that are only a fragment reference, or empty
///
/// # Arguments
///
/// * `link` - The raw `href` value
/// * `base` - The URL of the page the link was found on
///
/// # Returns
///
/// * `Ok(Some(String))` - Canonical URL
/// * `Ok(None)` - The link is out of scope and should be skipped
/// * `Err(UrlError)` - The link is malformed or switches scheme
///
/// # Examples
///
/// ```
/// use url::Url;
/// use hop_crawl::url::normalize_link;
///
/// let base = Url::parse("http://x.test/").unwrap();
/// let url = normalize_link("a/./b/../c/#top", &base).unwrap();
/// assert_eq!(url.as_deref(), Some("http://x.test/a/c"));
/// ```
pub fn normalize_link(link: &str, base: &Url) -> Result<Option<String>, UrlError> {
    let link = link.trim();

    // A bare fragment resolves to the page itself
    if link.is_empty() || link.starts_with('#') {
        return Ok(None);
    }

    // Step 1: Parse the link, resolving scheme-less references against the base
    let (resolved, explicit_scheme) = match Url::parse(link) {
        Ok(url) => (url, true),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let url = base
                .join(link)
                .map_err(|e| UrlError::Malformed(format!("{}: {}", link, e)))?;
            (url, false)
        }
        Err(e) => return Err(UrlError::Malformed(format!("{}: {}", link, e))),
    };

    // Step 2: Ignore links to other hosts
    if resolved.host().is_some() && !same_host(&resolved, base) {
        return Ok(None);
    }

    // Step 3: Skip unhandled schemes, refuse to switch between HTTP and HTTPS
    if explicit_scheme {
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return Ok(None);
        }

        if resolved.scheme() != base.scheme() {
            return Err(UrlError::SchemeMismatch {
                found: resolved.scheme().to_string(),
                expected: base.scheme().to_string(),
            });
        }
    }

    // Step 4: Start from the base so scheme, host and port are fixed
    let mut canonical = base.clone();

    // Step 5: Clean the path resolved against the base page
    canonical.set_path(&clean_path(resolved.path()));
    canonical.set_query(resolved.query().filter(|q| !q.is_empty()));

    // Step 6: Remove fragment
    canonical.set_fragment(None);

    Ok(Some(canonical.into()))
}

/// Lexically cleans a URL path
///
/// Dot segments are resolved, empty segments (repeated or trailing slashes)
/// are dropped, and `..` above the root stays at the root. The root itself
/// cleans to the empty string.
///
/// # Examples
///
/// ```
/// use hop_crawl::url::clean_path;
///
/// assert_eq!(clean_path("/a//b/./c/../d/"), "/a/b/d");
/// assert_eq!(clean_path("/"), "");
/// ```
pub fn clean_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        return String::new();
    }

    format!("/{}", segments.join("/"))
}
