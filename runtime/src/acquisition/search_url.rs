//! Search URLs for the public job search pages.

use job_scout::{DateSincePosted, FetchError, Query, RemoteFilter, SortBy};
use url::Url;

/// Search results page rendered by the browser strategy.
pub const SEARCH_PAGE_URL: &str = "https://www.linkedin.com/jobs/search";

/// Guest listing endpoint requested by the library strategy.
pub const LISTING_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// `f_TPR` value for a posting-age restriction (seconds, `r` prefixed).
pub fn time_posted_param(date: DateSincePosted) -> Option<&'static str> {
    match date {
        DateSincePosted::Any => None,
        DateSincePosted::Past24Hours => Some("r86400"),
        DateSincePosted::PastWeek => Some("r604800"),
        DateSincePosted::PastMonth => Some("r2592000"),
    }
}

/// `f_WT` value for a workplace-type filter.
pub fn workplace_param(filter: RemoteFilter) -> Option<&'static str> {
    match filter {
        RemoteFilter::Any => None,
        RemoteFilter::OnSite => Some("1"),
        RemoteFilter::Remote => Some("2"),
        RemoteFilter::Hybrid => Some("3"),
    }
}

/// `f_E` value for an experience level.
pub fn experience_param(level: &str) -> Option<&'static str> {
    let level = level.trim().to_ascii_lowercase().replace(['_', '-'], " ");
    match level.as_str() {
        "internship" => Some("1"),
        "entry level" => Some("2"),
        "associate" => Some("3"),
        "senior" | "mid senior level" | "mid senior" => Some("4"),
        "director" => Some("5"),
        "executive" => Some("6"),
        _ => None,
    }
}

/// `sortBy` value for a result ordering.
pub fn sort_param(sort: SortBy) -> Option<&'static str> {
    match sort {
        SortBy::Any => None,
        SortBy::Recent => Some("DD"),
        SortBy::Relevant => Some("R"),
    }
}

/// Search results page for the browser strategy.
///
/// Always starts at the first position of the first page; optional filters
/// are appended only when set.
pub fn search_page_url(base: &str, query: &Query) -> Result<Url, FetchError> {
    let mut params: Vec<(&str, &str)> = vec![
        ("keywords", query.keywords.as_str()),
        ("location", query.location.as_str()),
    ];
    if let Some(tpr) = time_posted_param(query.date_since_posted) {
        params.push(("f_TPR", tpr));
    }
    if let Some(wt) = workplace_param(query.remote_filter) {
        params.push(("f_WT", wt));
    }
    if let Some(e) = query.experience_level.as_deref().and_then(experience_param) {
        params.push(("f_E", e));
    }
    if let Some(sort) = sort_param(query.sort_by) {
        params.push(("sortBy", sort));
    }
    params.push(("position", "1"));
    params.push(("pageNum", "0"));

    Url::parse_with_params(base, &params)
        .map_err(|e| FetchError::Request(format!("invalid search URL {base}: {e}")))
}

/// Guest listing URL for the library strategy.
pub fn listing_url(
    base: &str,
    keywords: &str,
    location: &str,
    date: DateSincePosted,
) -> Result<Url, FetchError> {
    let mut params: Vec<(&str, &str)> = vec![("keywords", keywords), ("location", location)];
    if let Some(tpr) = time_posted_param(date) {
        params.push(("f_TPR", tpr));
    }
    params.push(("start", "0"));

    Url::parse_with_params(base, &params)
        .map_err(|e| FetchError::Request(format!("invalid listing URL {base}: {e}")))
}
