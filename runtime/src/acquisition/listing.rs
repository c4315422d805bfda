//! Guest listing fetcher and job-card parser.
//!
//! The guest listing endpoint answers with an HTML fragment of `<li>` job
//! cards. Parsing is synchronous because the `scraper` crate's types are
//! `!Send`; the parsed records are plain data and cross await points freely.

use super::http_client::HttpClient;
use super::search_url::listing_url;
use job_scout::{DateSincePosted, FetchError, RawJobRecord};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Fetch and parse one page of job listings.
pub async fn fetch_job_listings(
    client: &HttpClient,
    base_url: &str,
    keywords: &str,
    location: &str,
    date_since_posted: DateSincePosted,
) -> Result<Vec<RawJobRecord>, FetchError> {
    let url = listing_url(base_url, keywords, location, date_since_posted)?;
    debug!("requesting listings from {url}");

    let resp = client
        .get(url.as_str())
        .await
        .map_err(|e| FetchError::Request(format!("{e:#}")))?;

    if !resp.is_success() {
        return Err(FetchError::Upstream(resp.status));
    }

    let records = parse_job_cards(&resp.body);
    debug!(
        "parsed {} job cards ({} bytes) from {}",
        records.len(),
        resp.body.len(),
        resp.final_url
    );
    Ok(records)
}

/// Parse every job card in a listing fragment.
///
/// A `<li>` counts as a card when it wraps a `base-card` element. Missing
/// fields come back as empty strings.
pub fn parse_job_cards(html: &str) -> Vec<RawJobRecord> {
    let document = Html::parse_fragment(html);
    let item_sel = Selector::parse("li").expect("item selector is valid");
    let card_sel = Selector::parse(".base-card, .base-search-card, .job-search-card")
        .expect("card selector is valid");
    let title_sel = Selector::parse(".base-search-card__title").expect("title selector is valid");
    let company_sel =
        Selector::parse(".base-search-card__subtitle").expect("company selector is valid");
    let location_sel =
        Selector::parse(".job-search-card__location").expect("location selector is valid");
    let link_sel = Selector::parse("a.base-card__full-link, a[href]").expect("link selector is valid");
    let time_sel = Selector::parse("time").expect("time selector is valid");
    let snippet_sel =
        Selector::parse(".job-search-card__snippet").expect("snippet selector is valid");

    document
        .select(&item_sel)
        .filter(|li| li.select(&card_sel).next().is_some())
        .map(|li| RawJobRecord {
            title: Some(first_text(li, &title_sel)),
            company: Some(first_text(li, &company_sel)),
            location: Some(first_text(li, &location_sel)),
            link: Some(first_attr(li, &link_sel, "href")),
            posted_date: Some(first_attr(li, &time_sel, "datetime")),
            description: Some(first_text(li, &snippet_sel)),
        })
        .collect()
}

/// Whitespace-collapsed text of the first match, or empty.
fn first_text(root: ElementRef<'_>, selector: &Selector) -> String {
    root.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn first_attr(root: ElementRef<'_>, selector: &Selector, attr: &str) -> String {
    root.select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
    <li>
      <div class="base-card base-search-card job-search-card">
        <a class="base-card__full-link" href="https://www.linkedin.com/jobs/view/rust-engineer-123?refId=abc&trackingId=xyz">
          <span class="sr-only">Rust Engineer</span>
        </a>
        <div class="base-search-card__info">
          <h3 class="base-search-card__title">
            Senior   Rust Engineer
          </h3>
          <h4 class="base-search-card__subtitle"><a href="https://example.com/acme">Acme Corp</a></h4>
          <div class="base-search-card__metadata">
            <span class="job-search-card__location">Berlin, Germany</span>
            <time class="job-search-card__listdate" datetime="2024-05-01">2 weeks ago</time>
          </div>
          <p class="job-search-card__snippet">Tokio, AWS and Kubernetes.</p>
        </div>
      </div>
    </li>
    <li>
      <div class="base-card">
        <h3 class="base-search-card__title">Frontend Developer</h3>
      </div>
    </li>
    <li class="footer-link">Not a job card</li>
    "#;

    #[test]
    fn test_parse_job_cards_extracts_fields() {
        let records = parse_job_cards(FRAGMENT);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.title.as_deref(), Some("Senior Rust Engineer"));
        assert_eq!(first.company.as_deref(), Some("Acme Corp"));
        assert_eq!(first.location.as_deref(), Some("Berlin, Germany"));
        assert_eq!(
            first.link.as_deref(),
            Some("https://www.linkedin.com/jobs/view/rust-engineer-123?refId=abc&trackingId=xyz")
        );
        assert_eq!(first.posted_date.as_deref(), Some("2024-05-01"));
        assert_eq!(first.description.as_deref(), Some("Tokio, AWS and Kubernetes."));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let records = parse_job_cards(FRAGMENT);
        let second = &records[1];
        assert_eq!(second.title.as_deref(), Some("Frontend Developer"));
        assert_eq!(second.company.as_deref(), Some(""));
        assert_eq!(second.link.as_deref(), Some(""));
        assert_eq!(second.posted_date.as_deref(), Some(""));
        assert_eq!(second.description.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_fragment_yields_no_records() {
        assert!(parse_job_cards("").is_empty());
        assert!(parse_job_cards("<html><body>No jobs</body></html>").is_empty());
    }
}
