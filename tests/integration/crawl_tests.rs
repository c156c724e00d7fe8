use hop_crawl::config::CrawlerConfig;
use hop_crawl::crawler::crawl;
use hop_crawl::{start, CrawlError, UrlError};
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given worker count
fn create_test_config(workers: usize) -> CrawlerConfig {
    CrawlerConfig {
        workers,
        request_timeout_ms: 5_000,
        connect_timeout_ms: 1_000,
        user_agent: "TestBot/1.0".to_string(),
    }
}

/// Wraps anchors for the given hrefs in a minimal HTML document
fn page_with_links(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        anchors
    )
}

/// Mounts an HTML page that must be requested exactly once
async fn mount_page(server: &MockServer, page: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn url_set(report: &hop_crawl::CrawlReport) -> HashSet<String> {
    report.urls().map(str::to_string).collect()
}

#[tokio::test]
async fn test_scenario_skips_cross_host_and_fragment() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        page_with_links(&["/a", "a/b", "http://other.test/c", "#frag"]),
    )
    .await;
    mount_page(&server, "/a", page_with_links(&[])).await;
    mount_page(&server, "/a/b", page_with_links(&[])).await;

    let report = crawl(&format!("{}/", base), &create_test_config(4))
        .await
        .expect("Crawl failed");

    let expected: HashSet<String> = [
        format!("{}/", base),
        format!("{}/a", base),
        format!("{}/a/b", base),
    ]
    .into_iter()
    .collect();

    assert_eq!(url_set(&report), expected);
    assert_eq!(report.len(), 3);
    assert!(report.is_complete());
    assert_eq!(report.statistics.failed, 0);
}

#[tokio::test]
async fn test_fully_connected_graph_with_two_workers() {
    let server = MockServer::start().await;
    let base = server.uri();
    let paths = ["/", "/p1", "/p2", "/p3", "/p4"];

    for page in paths {
        mount_page(&server, page, page_with_links(&paths)).await;
    }

    let report = crawl(&format!("{}/", base), &create_test_config(2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.len(), 5);
    assert!(report.is_complete());
    assert_eq!(report.statistics.dispatched, 5);
    assert_eq!(report.statistics.succeeded, 5);
    assert!(report.statistics.peak_in_flight <= 2);

    for page in ["/p1", "/p2", "/p3", "/p4"] {
        assert!(report.contains(&format!("{}{}", base, page)));
    }
}

#[tokio::test]
async fn test_body_not_found_does_not_stop_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page_with_links(&["/nobody", "/ok"])).await;
    mount_page(
        &server,
        "/nobody",
        r#"<html><head><a href="/never">hidden</a></head></html>"#.to_string(),
    )
    .await;
    mount_page(&server, "/ok", page_with_links(&["/"])).await;

    let report = crawl(&format!("{}/", base), &create_test_config(2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.len(), 3);
    assert!(report.contains(&format!("{}/nobody", base)));
    assert!(!report.contains(&format!("{}/never", base)));
    assert_eq!(report.statistics.failed, 1);
    assert_eq!(report.statistics.succeeded, 2);
}

#[tokio::test]
async fn test_http_errors_are_page_level() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page_with_links(&["/missing", "/broken", "/fine"])).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/fine", page_with_links(&[])).await;

    // /missing falls through to wiremock's default 404
    let report = crawl(&format!("{}/", base), &create_test_config(3))
        .await
        .expect("Crawl failed");

    assert_eq!(report.len(), 4);
    assert!(report.is_complete());
    assert_eq!(report.statistics.failed, 2);
}

#[tokio::test]
async fn test_equivalent_links_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();
    let absolute = format!("{}/page", base);

    mount_page(
        &server,
        "/",
        page_with_links(&["/page", "page#section", "/page/", "./x/../page", &absolute]),
    )
    .await;
    mount_page(&server, "/page", page_with_links(&["/", "/#top", &base])).await;

    let report = crawl(&format!("{}/", base), &create_test_config(4))
        .await
        .expect("Crawl failed");

    assert_eq!(
        report.urls().collect::<Vec<_>>(),
        vec![format!("{}/", base), absolute]
    );
}

#[tokio::test]
async fn test_seed_is_canonicalized() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/docs", page_with_links(&["/docs/", "/docs#intro"])).await;

    let report = crawl(&format!("{}/docs/#start", base), &create_test_config(1))
        .await
        .expect("Crawl failed");

    assert_eq!(report.seed, format!("{}/docs", base));
    assert_eq!(report.len(), 1);
}

#[tokio::test]
async fn test_directory_seed_resolves_relative_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    // The canonical seed drops the trailing slash; the server redirects back
    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/docs/", base).as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/docs/", page_with_links(&["intro", "./guide/", "../docs/"])).await;
    mount_page(&server, "/docs/intro", page_with_links(&["guide"])).await;
    mount_page(&server, "/docs/guide", page_with_links(&[])).await;

    let report = crawl(&format!("{}/docs/", base), &create_test_config(2))
        .await
        .expect("Crawl failed");

    let expected: HashSet<String> = [
        format!("{}/docs", base),
        format!("{}/docs/intro", base),
        format!("{}/docs/guide", base),
    ]
    .into_iter()
    .collect();

    assert_eq!(url_set(&report), expected);
    assert!(!report.contains(&format!("{}/intro", base)));
    assert_eq!(report.statistics.failed, 0);
}

#[tokio::test]
async fn test_scheme_switch_link_ignored() {
    let server = MockServer::start().await;
    let base = server.uri();
    let https_link = base.replacen("http://", "https://", 1) + "/secure";

    mount_page(&server, "/", page_with_links(&[&https_link, "/plain"])).await;
    mount_page(&server, "/plain", page_with_links(&[])).await;

    let report = crawl(&format!("{}/", base), &create_test_config(2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.len(), 2);
    assert!(report.contains(&format!("{}/plain", base)));
}

#[tokio::test]
async fn test_cancel_stops_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page_with_links(&["/a"]))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let handle = start(&format!("{}/", base), &create_test_config(2)).expect("Failed to start");
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.cancel();

    let report = tokio::time::timeout(Duration::from_secs(5), handle.wait())
        .await
        .expect("Cancelled crawl did not stop")
        .expect("Crawl failed");

    assert!(report.cancelled);
    assert!(!report.is_complete());
    assert_eq!(report.len(), 1);
}

#[tokio::test]
async fn test_invalid_seed_is_fatal() {
    let result = start("/just/a/path", &create_test_config(2));
    assert!(matches!(result, Err(CrawlError::Seed(UrlError::Parse(_)))));

    let result = start("ftp://x.test/", &create_test_config(2));
    assert!(matches!(
        result,
        Err(CrawlError::Seed(UrlError::InvalidScheme(_)))
    ));
}
