use url::Url;

/// Checks whether two URLs name the same host
///
/// Hosts are compared as the URL parser normalizes them (lowercase domains),
/// together with any explicit port. A default port is elided by the parser,
/// so `http://x.test:80/` and `http://x.test/` are the same host. The scheme
/// is deliberately not part of the comparison.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use hop_crawl::url::same_host;
///
/// let a = Url::parse("http://x.test/a").unwrap();
/// let b = Url::parse("https://X.TEST/b").unwrap();
/// assert!(same_host(&a, &b));
///
/// let c = Url::parse("http://x.test:8080/").unwrap();
/// assert!(!same_host(&a, &c));
/// ```
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port() == b.port()
}
