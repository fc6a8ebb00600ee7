//! Integration tests using mock HTTP server
//!
//! Drives the page resolver through real HTTP round trips: a reqwest-backed
//! page fetcher against wiremock pages carrying GitHub-style Link headers.

use gh_release_tools::http::{HttpClient, HttpClientConfig, RequestConfig};
use gh_release_tools::pagination::{PageFetchResult, PageResolver, SearchOutcome};
use gh_release_tools::Error;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/numbers";

fn link_header(server: &MockServer, page: u32, total: u32) -> String {
    let url = |p: u32| format!("<{}{ENDPOINT}?page={p}&per_page=1>", server.uri());
    let mut sections = Vec::new();
    if page > 1 {
        sections.push(format!("{}; rel=\"prev\"", url(page - 1)));
    }
    if page < total {
        sections.push(format!("{}; rel=\"next\"", url(page + 1)));
        sections.push(format!("{}; rel=\"last\"", url(total)));
    }
    sections.join(", ")
}

/// Serve `total` pages holding one number each; earlier pages answer slower
async fn start_numbers_api(total: u32) -> MockServer {
    let server = MockServer::start().await;

    for page in 1..=total {
        let mut response = ResponseTemplate::new(200)
            .set_body_json(vec![page])
            .set_delay(Duration::from_millis(u64::from(total - page) * 10));
        if total > 1 {
            let link = link_header(&server, page, total);
            response = response.insert_header("link", link.as_str());
        }

        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("page", page.to_string()))
            .respond_with(response)
            .mount(&server)
            .await;
    }

    server
}

fn http_client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    HttpClient::with_config(config).unwrap()
}

async fn requested_pages(server: &MockServer) -> Vec<u32> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
        .collect()
}

macro_rules! numbers_fetcher {
    ($client:expr) => {
        |page: u32, per_page: u32| {
            let client = &$client;
            async move {
                let request = RequestConfig::new()
                    .query("page", page.to_string())
                    .query("per_page", per_page.to_string());
                let response = client.get_with_config(ENDPOINT, request).await?;
                let headers = response.headers().clone();
                let items: Vec<u32> = response.json().await?;
                Ok::<_, Error>(PageFetchResult::with_headers(items, &headers))
            }
        }
    };
}

// ============================================================================
// Fetch All
// ============================================================================

#[tokio::test]
async fn test_fetch_all_over_http_keeps_page_order() {
    let server = start_numbers_api(7).await;
    let client = http_client(&server);

    let items = PageResolver::starting_at(1, 1)
        .fetch_all(numbers_fetcher!(client))
        .await
        .unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(requested_pages(&server).await.len(), 7);
}

#[tokio::test]
async fn test_fetch_all_over_http_single_page() {
    let server = start_numbers_api(1).await;
    let client = http_client(&server);

    let items = PageResolver::new()
        .fetch_all(numbers_fetcher!(client))
        .await
        .unwrap();

    assert_eq!(items, vec![1]);
    assert_eq!(requested_pages(&server).await, vec![1]);
}

#[tokio::test]
async fn test_fetch_all_over_http_reports_failed_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vec![1])
                .insert_header("link", link_header(&server, 1, 3).as_str()),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vec![2]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let client = http_client(&server);
    let err = PageResolver::new()
        .fetch_all(numbers_fetcher!(client))
        .await
        .unwrap_err();

    assert_eq!(err.failed_page(), Some(3));
    assert!(err.to_string().contains("HTTP 503"));
}

// ============================================================================
// Fetch Until
// ============================================================================

#[tokio::test]
async fn test_fetch_until_over_http_finds_last_page_quickly() {
    let server = start_numbers_api(9).await;
    let client = http_client(&server);

    let outcome = PageResolver::starting_at(1, 1)
        .fetch_until(numbers_fetcher!(client), |items: &[u32]| items.contains(&9))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SearchOutcome::Found {
            page: 9,
            items: vec![9],
        }
    );

    let mut pages = requested_pages(&server).await;
    assert!(pages.len() <= 3);
    pages.sort_unstable();
    assert_eq!(pages, vec![1, 2, 9]);
}

#[tokio::test]
async fn test_fetch_until_over_http_exhausts_without_match() {
    let server = start_numbers_api(5).await;
    let client = http_client(&server);

    let outcome = PageResolver::starting_at(1, 1)
        .fetch_until(numbers_fetcher!(client), |_: &[u32]| false)
        .await
        .unwrap();

    assert_eq!(outcome, SearchOutcome::NotFound);

    let mut pages = requested_pages(&server).await;
    pages.sort_unstable();
    assert_eq!(pages, vec![1, 2, 3, 4, 5]);
}

// ============================================================================
// Fetch All Then Filter
// ============================================================================

#[tokio::test]
async fn test_fetch_all_then_filter_over_http() {
    let server = start_numbers_api(6).await;
    let client = http_client(&server);

    let odd = PageResolver::starting_at(1, 1)
        .fetch_all_then_filter(numbers_fetcher!(client), |n: &u32| n % 2 == 1)
        .await
        .unwrap();

    assert_eq!(odd, vec![1, 3, 5]);
}
