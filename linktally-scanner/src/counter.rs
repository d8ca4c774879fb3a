use crate::error::{Result, ScanError};
use crate::links;
use crate::result::TaskOutcome;
use reqwest::Client;
use reqwest::redirect::Policy;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Fetches a page and counts the links pointing back at its own domain.
///
/// The underlying client is cheap to clone and pools connections, so one
/// counter is meant to be shared by every task of a run.
#[derive(Clone)]
pub struct LinkCounter {
    client: Client,
}

impl LinkCounter {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_MAX_REDIRECTS)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::with_options(timeout, DEFAULT_MAX_REDIRECTS)
    }

    /// `max_redirects == 0` disables redirect following entirely.
    pub fn with_options(timeout: Duration, max_redirects: usize) -> Result<Self> {
        let redirect = if max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(max_redirects)
        };

        let client = Client::builder()
            .user_agent(concat!("linktally/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(redirect)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch `url` and produce its outcome. Never fails: every error ends up
    /// in a [`TaskOutcome::Failure`].
    pub async fn process(&self, url: &str) -> TaskOutcome {
        match self.count_internal_links(url).await {
            Ok(count) => TaskOutcome::success(url.to_string(), count),
            Err(e) => {
                warn!("Failed to process {}: {}", url, e);
                TaskOutcome::failure(url.to_string(), e.to_string())
            }
        }
    }

    pub async fn count_internal_links(&self, url: &str) -> Result<usize> {
        let base_domain = Self::request_host(url)?;

        debug!("Fetching {}", url);
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(
            "Fetched {} ({}, {} bytes in {:?})",
            url,
            status,
            body.len(),
            start.elapsed()
        );

        Ok(links::count_internal_links(&body, &base_domain))
    }

    /// Host of the page being fetched, as written, the base every link is
    /// compared to.
    pub fn request_host(url: &str) -> Result<String> {
        if url.chars().any(char::is_whitespace) {
            return Err(ScanError::InvalidUrl(format!("'{}' contains whitespace", url)));
        }
        Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        links::written_host(url)
            .map(str::to_string)
            .ok_or_else(|| ScanError::MissingHost(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    async fn mount_html(server: &MockServer, route: &str, status: u16, body: String) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body),
            )
            .mount(server)
            .await;
    }

    #[test]
    fn test_request_host() {
        assert_eq!(
            LinkCounter::request_host("https://example.com/path?q=1").unwrap(),
            "example.com"
        );
        assert_eq!(
            LinkCounter::request_host("https://Example.com/path").unwrap(),
            "Example.com"
        );
        assert_eq!(
            LinkCounter::request_host("http://127.0.0.1:8080/").unwrap(),
            "127.0.0.1"
        );
    }

    #[test]
    fn test_request_host_invalid() {
        assert!(matches!(
            LinkCounter::request_host("not a url"),
            Err(ScanError::InvalidUrl(_))
        ));
        assert!(matches!(
            LinkCounter::request_host("mailto:someone@example.com"),
            Err(ScanError::MissingHost(_))
        ));
        assert!(matches!(
            LinkCounter::request_host("  https://example.com"),
            Err(ScanError::InvalidUrl(_))
        ));
        assert!(matches!(
            LinkCounter::request_host(""),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_counts_links_on_served_page() {
        let server = MockServer::start().await;
        let html = format!(
            r#"<html><body>
                <a href="{0}/one">1</a>
                <a href="{0}/two">2</a>
                <a href="https://elsewhere.org/">3</a>
                <a href="/relative">4</a>
            </body></html>"#,
            server.uri()
        );
        mount_html(&server, "/", 200, html).await;

        let counter = LinkCounter::new().unwrap();
        let outcome = counter.process(&format!("{}/", server.uri())).await;

        assert_eq!(
            outcome,
            TaskOutcome::success(format!("{}/", server.uri()), 2)
        );
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_scanned() {
        let server = MockServer::start().await;
        let html = format!(r#"<a href="{}/home">home</a>"#, server.uri());
        mount_html(&server, "/missing", 404, html).await;

        let counter = LinkCounter::new().unwrap();
        let count = counter
            .count_internal_links(&format!("{}/missing", server.uri()))
            .await
            .unwrap();

        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let counter = LinkCounter::with_timeout(Duration::from_millis(100)).unwrap();
        let url = format!("{}/slow", server.uri());
        let outcome = counter.process(&url).await;

        assert!(!outcome.is_success());
        let line = outcome.to_line();
        assert!(line.starts_with(&url));
        assert!(line.contains("ERROR:"));
    }

    #[tokio::test]
    async fn test_connection_refused_becomes_failure() {
        // Grab a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let counter = LinkCounter::with_timeout(Duration::from_secs(2)).unwrap();
        let url = format!("http://127.0.0.1:{}/", port);
        let outcome = counter.process(&url).await;

        match outcome {
            TaskOutcome::Failure { url: failed, error } => {
                assert_eq!(failed, url);
                assert!(error.starts_with("HTTP request failed"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_url_becomes_failure() {
        let counter = LinkCounter::new().unwrap();
        let outcome = counter.process("definitely not a url").await;

        assert_eq!(outcome.url(), "definitely not a url");
        assert!(outcome.to_line().contains("ERROR: Invalid URL"));
    }

    #[tokio::test]
    async fn test_redirects_followed_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri())),
            )
            .mount(&server)
            .await;
        let html = format!(r#"<a href="{}/a">a</a>"#, server.uri());
        mount_html(&server, "/new", 200, html).await;

        let counter = LinkCounter::new().unwrap();
        let count = counter
            .count_internal_links(&format!("{}/old", server.uri()))
            .await
            .unwrap();
        assert_eq!(count, 1);

        let no_follow = LinkCounter::with_options(DEFAULT_TIMEOUT, 0).unwrap();
        let count = no_follow
            .count_internal_links(&format!("{}/old", server.uri()))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
