// src/github/client.rs
// =============================================================================
// The real StarredApi: GitHub's REST endpoint for a user's stars.
//
//   GET {api_url}/users/{user}/starred?per_page=30&page=2
//
// GitHub pages with a `Link` response header, e.g.
//
//   <https://api.github.com/user/583231/starred?page=2>; rel="next",
//   <https://api.github.com/user/583231/starred?page=5>; rel="last"
//
// The `page` query parameter of the rel="next" target is our next page
// number. No rel="next" means this was the last page.
//
// Rust concepts:
// - reqwest::Client: Async HTTP client with connection pooling
// - Url: Safe URL building (the user name is percent-encoded for us)
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::fetch::{ListStarredOptions, StarredApi, StarredPage};
use super::model::StarredRepository;
use crate::error::{Result, StarsError};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

// Gives us the `starred_at` + `repo` wrapper for every entry
const STAR_MEDIA_TYPE: &str = "application/vnd.github.star+json";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_builder(Client::builder(), base_url)
    }

    // Applies our fixed settings on top of a caller-supplied builder
    fn with_builder(builder: ClientBuilder, base_url: Url) -> Result<Self> {
        // GitHub rejects requests without a User-Agent
        let client = builder
            .user_agent(concat!("stargazer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, base_url })
    }

    // Builds {base}/users/{user}/starred with the paging query parameters
    fn starred_url(&self, user: &str, opts: &ListStarredOptions) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StarsError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["users", user, "starred"]);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("per_page", &opts.per_page.to_string());
            if let Some(page) = opts.page {
                query.append_pair("page", &page.to_string());
            }
        }

        Ok(url)
    }
}

#[async_trait]
impl StarredApi for GitHubClient {
    async fn list_starred(&self, user: &str, opts: &ListStarredOptions) -> Result<StarredPage> {
        let url = self.starred_url(user, opts)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, STAR_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        let status = response.status();
        let next_page = next_page_from_headers(response.headers());
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StarsError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let entries: Vec<StarredRepository> = serde_json::from_str(&body)?;
        debug!(count = entries.len(), ?next_page, "received starred page");

        Ok(StarredPage { entries, next_page })
    }
}

fn next_page_from_headers(headers: &HeaderMap) -> Option<u32> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next_page)
}

// Extracts the page number of the rel="next" link from a Link header value
//
// Returns None if there is no rel="next" entry or its URL has no usable
// `page` parameter; both mean "no next page".
fn parse_next_page(link_header: &str) -> Option<u32> {
    for link in link_header.split(',') {
        let mut parts = link.split(';');

        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == r#"rel="next""# || param == "rel=next"
        });
        if !is_next {
            continue;
        }

        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        return url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok());
    }

    None
}

// GitHub error bodies look like {"message": "Not Found", "documentation_url": ...}
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ApiError {
        message: String,
    }

    match serde_json::from_str::<ApiError>(body) {
        Ok(err) => err.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::Fetcher;
    use reqwest::header::HeaderValue;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client(base: &str) -> GitHubClient {
        GitHubClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_first_page_url_has_no_page_parameter() {
        let opts = ListStarredOptions { page: None, per_page: 30 };
        let url = client("https://api.github.com").starred_url("octocat", &opts).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/octocat/starred?per_page=30");
    }

    #[test]
    fn test_later_page_url() {
        let opts = ListStarredOptions { page: Some(4), per_page: 100 };
        let url = client("http://localhost:9000/api/v3").starred_url("octocat", &opts).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:9000/api/v3/users/octocat/starred?per_page=100&page=4"
        );
    }

    #[test]
    fn test_user_is_escaped() {
        let opts = ListStarredOptions { page: None, per_page: 30 };
        let url = client("https://api.github.com").starred_url("../admin", &opts).unwrap();
        assert_eq!(url.path(), "/users/..%2Fadmin/starred");
    }

    #[test]
    fn test_parse_next_page() {
        let header = r#"<https://api.github.com/user/583231/starred?page=2>; rel="next", <https://api.github.com/user/583231/starred?page=5>; rel="last""#;
        assert_eq!(parse_next_page(header), Some(2));
    }

    #[test]
    fn test_parse_next_page_among_other_params() {
        let header = r#"<https://api.github.com/user/1/starred?page=1&per_page=30>; rel="prev", <https://api.github.com/user/1/starred?per_page=30&page=3>; rel="next""#;
        assert_eq!(parse_next_page(header), Some(3));
    }

    #[test]
    fn test_parse_last_page_has_no_next() {
        let header = r#"<https://api.github.com/user/1/starred?page=4>; rel="prev", <https://api.github.com/user/1/starred?page=1>; rel="first""#;
        assert_eq!(parse_next_page(header), None);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_next_page(""), None);
        assert_eq!(parse_next_page("not a link header"), None);
        assert_eq!(parse_next_page(r#"<https://x.test/?page=abc>; rel="next""#), None);
    }

    #[test]
    fn test_next_page_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(next_page_from_headers(&headers), None);

        headers.insert(
            LINK,
            HeaderValue::from_static(r#"<https://api.github.com/user/1/starred?page=7>; rel="next""#),
        );
        assert_eq!(next_page_from_headers(&headers), Some(7));
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            api_error_message(r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#),
            "Not Found"
        );
        assert_eq!(api_error_message("Bad Gateway\n"), "Bad Gateway");
    }

    // Builds a raw HTTP/1.1 response that closes the connection afterwards
    fn http_response(status: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
            status,
            body.len(),
            extra_headers,
            body
        )
    }

    // Serves `responses` to one connection each, in order, and hands back
    // the request line of every request it saw
    async fn serve(responses: Vec<String>) -> (Url, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    head.extend_from_slice(&chunk[..n]);
                }

                let head = String::from_utf8_lossy(&head);
                request_lines.push(head.lines().next().unwrap_or_default().to_string());

                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
            request_lines
        });

        (Url::parse(&format!("http://{}", addr)).unwrap(), handle)
    }

    // Local test servers must not be routed through an HTTP(S)_PROXY
    fn local_client(base_url: Url) -> GitHubClient {
        GitHubClient::with_builder(Client::builder().no_proxy(), base_url).unwrap()
    }

    fn starred_body(names: &[&str]) -> String {
        let entries: Vec<serde_json::Value> = names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "starred_at": "2024-01-01T00:00:00Z",
                    "repo": { "full_name": name, "language": "Go", "stargazers_count": 1 }
                })
            })
            .collect();
        serde_json::Value::Array(entries).to_string()
    }

    #[tokio::test]
    async fn test_link_header_drives_the_next_request() {
        let (base_url, server) = serve(vec![
            http_response(
                "200 OK",
                "Link: <http://127.0.0.1/user/1/starred?per_page=30&page=2>; rel=\"next\", <http://127.0.0.1/user/1/starred?per_page=30&page=2>; rel=\"last\"\r\n",
                &starred_body(&["a/b"]),
            ),
            http_response(
                "200 OK",
                "Link: <http://127.0.0.1/user/1/starred?per_page=30&page=1>; rel=\"prev\"\r\n",
                &starred_body(&["c/d"]),
            ),
        ])
        .await;

        let client = local_client(base_url);
        let mut fetcher = Fetcher::new(&client, "octo", 30);
        let mut names = Vec::new();
        while let Some(page) = fetcher.next_page().await.unwrap() {
            names.extend(page.into_iter().map(|repo| repo.full_name));
        }

        assert_eq!(names, vec!["a/b", "c/d"]);
        assert_eq!(fetcher.requests(), 2);

        let requests = server.await.unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].starts_with("GET /users/octo/starred?per_page=30 "), "{}", requests[0]);
        assert!(requests[1].starts_with("GET /users/octo/starred?per_page=30&page=2 "), "{}", requests[1]);
    }

    #[tokio::test]
    async fn test_error_status_becomes_api_error() {
        let (base_url, server) = serve(vec![http_response(
            "404 Not Found",
            "",
            r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#,
        )])
        .await;

        let client = local_client(base_url);
        let opts = ListStarredOptions { page: None, per_page: 30 };
        let err = client.list_starred("nobody", &opts).await.unwrap_err();

        match err {
            StarsError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_undecodable_body_becomes_decode_error() {
        let (base_url, server) = serve(vec![http_response("200 OK", "", "not json")]).await;

        let client = local_client(base_url);
        let opts = ListStarredOptions { page: None, per_page: 30 };
        let err = client.list_starred("octo", &opts).await.unwrap_err();

        assert!(matches!(err, StarsError::Decode(_)), "got {:?}", err);
        server.await.unwrap();
    }
}
