//! Library strategy against a mocked guest listing endpoint.

use job_scout::{DateSincePosted, FetchError, Query};
use job_scout_runtime::acquisition::http_client::HttpClient;
use job_scout_runtime::acquisition::library::LibraryStrategy;
use job_scout_runtime::acquisition::listing::fetch_job_listings;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PATH: &str = "/jobs-guest/jobs/api/seeMoreJobPostings/search";

const CARDS: &str = r#"
<li>
  <div class="base-card base-search-card">
    <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/42?trk=guest">link</a>
    <h3 class="base-search-card__title">Data Engineer</h3>
    <h4 class="base-search-card__subtitle">Initech</h4>
    <span class="job-search-card__location">Remote</span>
    <time datetime="2024-06-10">1 day ago</time>
    <p class="job-search-card__snippet">Spark, Airflow and AWS</p>
  </div>
</li>
<li>
  <div class="base-card base-search-card">
    <h3 class="base-search-card__title">Platform Engineer</h3>
    <h4 class="base-search-card__subtitle">Hooli</h4>
  </div>
</li>
"#;

fn listing_url(server: &MockServer) -> String {
    format!("{}{LISTING_PATH}", server.uri())
}

#[tokio::test]
async fn test_fetch_sends_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .and(query_param("keywords", "data engineer"))
        .and(query_param("location", "remote"))
        .and(query_param("f_TPR", "r86400"))
        .and(query_param("start", "0"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CARDS))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(5_000);
    let records = fetch_job_listings(
        &client,
        &listing_url(&server),
        "data engineer",
        "remote",
        DateSincePosted::Past24Hours,
    )
    .await
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("Data Engineer"));
    assert_eq!(records[0].company.as_deref(), Some("Initech"));
    assert_eq!(records[0].posted_date.as_deref(), Some("2024-06-10"));
    assert_eq!(records[1].description.as_deref(), Some(""));
}

#[tokio::test]
async fn test_strategy_forwards_only_core_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(CARDS))
        .mount(&server)
        .await;

    let strategy = LibraryStrategy::new(HttpClient::new(5_000), listing_url(&server));
    let query = Query::new("data engineer", "remote").with_date_since_posted(DateSincePosted::Any);
    let records = strategy.fetch_jobs(&query).await.unwrap();
    assert_eq!(records.len(), 2);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let keys: Vec<String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, _)| k.into_owned())
        .collect();
    assert_eq!(keys, vec!["keywords", "location", "start"]);
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LISTING_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let strategy = LibraryStrategy::new(HttpClient::new(5_000), listing_url(&server));
    let err = strategy
        .fetch_jobs(&Query::new("rust", "Berlin"))
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::Upstream(503));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_error() {
    let client = HttpClient::new(1_000);
    let err = fetch_job_listings(
        &client,
        "http://127.0.0.1:9/jobs",
        "rust",
        "Berlin",
        DateSincePosted::Any,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, FetchError::Request(_)));
}
