//! Library strategy: call the guest listing fetcher directly.

use super::http_client::HttpClient;
use super::listing::fetch_job_listings;
use job_scout::{FetchError, Query, RawJobRecord};

/// Fetches listings over plain HTTP; no browser involved.
pub struct LibraryStrategy {
    client: HttpClient,
    listing_url: String,
}

impl LibraryStrategy {
    pub fn new(client: HttpClient, listing_url: impl Into<String>) -> Self {
        Self {
            client,
            listing_url: listing_url.into(),
        }
    }

    /// Only keywords, location, and posting age are forwarded to the fetcher.
    pub async fn fetch_jobs(&self, query: &Query) -> Result<Vec<RawJobRecord>, FetchError> {
        fetch_job_listings(
            &self.client,
            &self.listing_url,
            &query.keywords,
            &query.location,
            query.date_since_posted,
        )
        .await
    }
}
