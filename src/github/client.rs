// src/github/client.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Two requests are made:
// - GET /users/{owner}/repos?per_page=100&sort=updated   (once per render)
// - GET /repos/{owner}/{repo}/readme                     (once per project)
//
// The two have opposite failure contracts:
// - The repository list is essential. Failures come back as a FetchError so
//   the caller can tell "rate limited" apart from everything else.
// - A README is optional decoration. Whatever goes wrong, the caller just
//   gets Readme::NotAvailable.
//
// Only the first 100 repositories are requested; there is no pagination.
// No timeout is set either: reqwest's transport defaults apply.
//
// Rust concepts:
// - One reqwest::Client reused for every request (connection pooling)
// - Default headers set once at construction time
// - url::Url path segments, so owner and repository names are percent-encoded
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::error::FetchError;
use super::models::{Readme, ReadmeResponse, RepositorySummary};
use crate::config::Config;

/// Repositories requested in the single page we fetch.
pub const PAGE_SIZE: usize = 100;

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

pub struct GithubClient {
    http: Client,
    api_base: Url,
    owner: String,
}

impl GithubClient {
    /// Builds a client for `config.owner`.
    ///
    /// Fails if the API root is not a usable URL, if the token contains
    /// bytes that are not allowed in an HTTP header, or if the TLS backend
    /// cannot be initialised.
    pub fn new(config: &Config) -> Result<Self> {
        // Parse the API root once; every request URL is built from it
        let api_base = Url::parse(&config.api_base)
            .map_err(|e| anyhow!("Invalid API URL '{}': {}", config.api_base, e))?;

        // "mailto:x" style URLs have no path we could append segments to
        if api_base.cannot_be_a_base() {
            return Err(anyhow!("Invalid API URL '{}': not a base URL", config.api_base));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        // GitHub rejects API requests without a User-Agent
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("repo-showcase/", env!("CARGO_PKG_VERSION"))),
        );

        // The token is optional; without it GitHub's anonymous quota applies
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("token {}", token))?;
            // Keeps the token out of reqwest's Debug output
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder().default_headers(headers).build()?;

        Ok(GithubClient {
            http,
            api_base,
            owner: config.owner.clone(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Fetches up to 100 public repositories, most recently updated first.
    pub async fn fetch_repository_list(&self) -> Result<Vec<RepositorySummary>, FetchError> {
        let mut url = self.endpoint(&["users", &self.owner, "repos"]);
        url.query_pairs_mut()
            .append_pair("per_page", &PAGE_SIZE.to_string())
            .append_pair("sort", "updated");
        debug!(%url, "fetching repository list");

        // No response at all (DNS, refused connection, TLS...) -> FetchFailed without status
        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "repository list request failed");
            FetchError::transport(&e)
        })?;

        // 403 -> RateLimited, anything else non-2xx -> FetchFailed with status
        let status = response.status();
        if !status.is_success() {
            let error = FetchError::from_status(status);
            warn!(status = status.as_u16(), %error, "repository list request rejected");
            return Err(error);
        }

        // A 2xx whose body is not a repository array is still a failed fetch
        let repositories: Vec<RepositorySummary> =
            response.json().await.map_err(|e| FetchError::FetchFailed {
                status: Some(status.as_u16()),
                reason: format!("unreadable response body: {}", e),
            })?;

        debug!(count = repositories.len(), "repository list fetched");
        Ok(repositories)
    }

    /// Fetches the encoded README of one repository.
    ///
    /// Never fails: a missing README, a private repository, rate limiting or
    /// a network error all come back as `Readme::NotAvailable`.
    pub async fn fetch_readme(&self, repository: &str) -> Readme {
        let url = self.endpoint(&["repos", &self.owner, repository, "readme"]);

        // Every failure path below logs at debug level and gives up quietly
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(repository, error = %e, "README request failed");
                return Readme::NotAvailable;
            }
        };

        // 404 (no README), 403 (private or rate limited), 5xx...
        if !response.status().is_success() {
            debug!(repository, status = response.status().as_u16(), "README not available");
            return Readme::NotAvailable;
        }

        // Only the "content" field is needed; anything else in the body is ignored
        match response.json::<ReadmeResponse>().await {
            Ok(body) => Readme::Available(body.content),
            Err(e) => {
                debug!(repository, error = %e, "README body unreadable");
                Readme::NotAvailable
            }
        }
    }

    // Appends path segments to the API root.
    //
    // path_segments_mut() percent-encodes each segment, so an owner like "a/b"
    // stays one segment ("a%2Fb") instead of changing the endpoint.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        // Err only for cannot-be-a-base URLs, which new() already rejected
        if let Ok(mut path) = url.path_segments_mut() {
            // "https://api.github.com/" has one empty segment; drop it so we
            // don't end up with "//users"
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::unreachable_base_url;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LIST_PATH: &str = "/users/octocat/repos";

    fn client_for(base_url: &str) -> GithubClient {
        GithubClient::new(&Config::new("octocat").with_api_base(base_url)).unwrap()
    }

    // Mounts a response for the repository-list request
    async fn mount_list(server: &MockServer, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(LIST_PATH))
            .and(query_param("per_page", "100"))
            .and(query_param("sort", "updated"))
            .respond_with(response)
            .mount(server)
            .await;
    }

    async fn mount_readme(server: &MockServer, repo: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/repos/octocat/{}/readme", repo)))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_list_success() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            {"id": 1, "name": "one", "html_url": "https://github.com/octocat/one",
             "updated_at": "2024-01-01T00:00:00Z", "stargazers_count": 3},
            {"id": 2, "name": "two", "html_url": "https://github.com/octocat/two",
             "updated_at": "2023-01-01T00:00:00Z"}
        ]);
        mount_list(&server, ResponseTemplate::new(200).set_body_json(body)).await;

        let repos = client_for(&server.uri()).fetch_repository_list().await.unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "one");
        assert_eq!(repos[1].stargazers_count, 0);
    }

    #[tokio::test]
    async fn test_list_403_is_rate_limited() {
        let server = MockServer::start().await;
        mount_list(&server, ResponseTemplate::new(403)).await;

        let result = client_for(&server.uri()).fetch_repository_list().await;
        assert_eq!(result.unwrap_err(), FetchError::RateLimited);
    }

    #[tokio::test]
    async fn test_list_500_is_fetch_failed() {
        let server = MockServer::start().await;
        mount_list(&server, ResponseTemplate::new(500)).await;

        let result = client_for(&server.uri()).fetch_repository_list().await;
        assert!(matches!(
            result,
            Err(FetchError::FetchFailed { status: Some(500), .. })
        ));
    }

    #[tokio::test]
    async fn test_list_network_error_has_no_status() {
        let result = client_for(&unreachable_base_url()).fetch_repository_list().await;
        assert!(matches!(result, Err(FetchError::FetchFailed { status: None, .. })));
    }

    #[tokio::test]
    async fn test_list_garbage_body_is_fetch_failed() {
        let server = MockServer::start().await;
        mount_list(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

        let result = client_for(&server.uri()).fetch_repository_list().await;
        assert!(matches!(
            result,
            Err(FetchError::FetchFailed { status: Some(200), .. })
        ));
    }

    #[tokio::test]
    async fn test_slow_list_is_not_cut_short() {
        // Well past the 10 seconds an explicit client timeout would once have allowed
        let server = MockServer::start().await;
        mount_list(
            &server,
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(std::time::Duration::from_secs(11)),
        )
        .await;

        let repos = client_for(&server.uri()).fetch_repository_list().await.unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_headers_are_sent() {
        let server = MockServer::start().await;
        mount_list(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!([]))).await;

        let mut config = Config::new("octocat").with_api_base(server.uri());
        config.token = Some("secret".to_string());
        GithubClient::new(&config)
            .unwrap()
            .fetch_repository_list()
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let header = |name: &str| {
            requests[0]
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        assert_eq!(header("accept"), "application/vnd.github.v3+json");
        assert_eq!(header("authorization"), "token secret");
        assert!(header("user-agent").starts_with("repo-showcase/"));
    }

    #[tokio::test]
    async fn test_no_authorization_without_token() {
        let server = MockServer::start().await;
        mount_list(&server, ResponseTemplate::new(200).set_body_json(serde_json::json!([]))).await;

        client_for(&server.uri()).fetch_repository_list().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_owner_and_name_are_percent_encoded() {
        let server = MockServer::start().await;
        let client =
            GithubClient::new(&Config::new("a/b?c").with_api_base(server.uri())).unwrap();

        // Nothing is mounted: both calls get 404, we only look at the paths
        let _ = client.fetch_repository_list().await;
        let _ = client.fetch_readme("x/y").await;

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.path(), "/users/a%2Fb%3Fc/repos");
        assert_eq!(requests[0].url.query(), Some("per_page=100&sort=updated"));
        assert_eq!(requests[1].url.path(), "/repos/a%2Fb%3Fc/x%2Fy/readme");
    }

    #[test]
    fn test_api_base_with_path_prefix() {
        let config = Config::new("octocat").with_api_base("https://ghe.example.com/api/v3");
        let client = GithubClient::new(&config).unwrap();

        let url = client.endpoint(&["users", "octocat", "repos"]);
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/users/octocat/repos");
    }

    #[test]
    fn test_invalid_api_base_is_rejected() {
        for base in ["not a url", "mailto:someone@example.com"] {
            let config = Config::new("octocat").with_api_base(base);
            assert!(GithubClient::new(&config).is_err(), "{}", base);
        }
    }

    #[tokio::test]
    async fn test_readme_available() {
        let server = MockServer::start().await;
        mount_readme(
            &server,
            "one",
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"content": "SGVs\nbG8=\n", "encoding": "base64"})),
        )
        .await;

        let readme = client_for(&server.uri()).fetch_readme("one").await;
        assert_eq!(readme, Readme::Available("SGVs\nbG8=\n".to_string()));
    }

    #[tokio::test]
    async fn test_readme_failures_are_not_available() {
        let server = MockServer::start().await;
        mount_readme(&server, "limited", ResponseTemplate::new(403)).await;
        mount_readme(&server, "broken", ResponseTemplate::new(500)).await;
        mount_readme(
            &server,
            "odd",
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"size": 3})),
        )
        .await;
        let client = client_for(&server.uri());

        // "missing" is not mounted, so the mock server answers 404
        for name in ["missing", "limited", "broken", "odd"] {
            assert_eq!(client.fetch_readme(name).await, Readme::NotAvailable, "{}", name);
        }

        let offline = client_for(&unreachable_base_url());
        assert_eq!(offline.fetch_readme("one").await, Readme::NotAvailable);
    }
}
