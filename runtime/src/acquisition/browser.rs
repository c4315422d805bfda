//! Browser strategy: render the public search page and scrape its job cards.

use super::http_client::USER_AGENT;
use super::search_url::search_page_url;
use crate::renderer::{BrowserGuard, Launcher, RenderContext};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use job_scout::{FetchError, Query, RawJobRecord};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Container that holds the job cards on the search page.
pub const RESULTS_SELECTOR: &str = "ul.jobs-search__results-list";

/// Network counts as idle after this long without a new resource load.
const NETWORK_QUIET_MS: u64 = 500;

/// Extract every job card inside the results list, trimmed, empty when absent.
const EXTRACT_CARDS_JS: &str = r#"(() => {
  const text = (root, sel) => ((root.querySelector(sel) || {}).textContent || '').trim();
  const attr = (root, sel, name) => {
    const el = root.querySelector(sel);
    return ((el && el.getAttribute(name)) || '').trim();
  };
  const items = document.querySelectorAll('ul.jobs-search__results-list > li');
  return Array.from(items).map((li) => ({
    title: text(li, '.base-search-card__title'),
    company: text(li, '.base-search-card__subtitle'),
    location: text(li, '.job-search-card__location'),
    link: attr(li, 'a.base-card__full-link', 'href') || attr(li, 'a[href]', 'href'),
    date: attr(li, 'time', 'datetime'),
    description: text(li, '.job-search-card__snippet'),
  }));
})()"#;

/// One job card as returned by the in-page extraction script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrapedCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub link: String,
    pub date: String,
    pub description: String,
}

impl ScrapedCard {
    /// Reduce to a raw record: links lose their query string, dates become ISO-8601.
    pub fn into_record(self) -> RawJobRecord {
        let date = self.date.trim();
        RawJobRecord {
            title: Some(self.title.trim().to_string()),
            company: Some(self.company.trim().to_string()),
            location: Some(self.location.trim().to_string()),
            link: Some(strip_query(self.link.trim()).to_string()),
            posted_date: (!date.is_empty()).then(|| to_iso8601(date)),
            description: Some(self.description.trim().to_string()),
        }
    }
}

/// Drop everything from the first `?` on.
pub fn strip_query(link: &str) -> &str {
    link.split_once('?').map_or(link, |(path, _)| path)
}

/// Convert a scraped date to `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Accepts RFC 3339 timestamps and bare `YYYY-MM-DD` dates (taken as UTC
/// midnight). Anything else is returned unchanged.
pub fn to_iso8601(raw: &str) -> String {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return midnight
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    raw.to_string()
}

/// Scrapes the search results page with a freshly launched browser.
pub struct BrowserStrategy {
    launcher: Arc<dyn Launcher>,
    search_url: String,
    navigation_timeout_ms: u64,
    selector_timeout_ms: u64,
}

impl BrowserStrategy {
    pub fn new(
        launcher: Arc<dyn Launcher>,
        search_url: impl Into<String>,
        navigation_timeout_ms: u64,
        selector_timeout_ms: u64,
    ) -> Self {
        Self {
            launcher,
            search_url: search_url.into(),
            navigation_timeout_ms,
            selector_timeout_ms,
        }
    }

    /// Launch a browser, scrape one results page, and close the browser.
    ///
    /// The browser is released before returning on every path.
    pub async fn fetch_jobs(&self, query: &Query) -> Result<Vec<RawJobRecord>, FetchError> {
        let url = search_page_url(&self.search_url, query)?;

        let renderer = self
            .launcher
            .launch()
            .await
            .map_err(|e| FetchError::BrowserLaunch(format!("{e:#}")))?;
        let guard = BrowserGuard::new(renderer);

        let result = self.scrape(&guard, url.as_str()).await;
        guard.release().await;

        let cards = result?;
        info!("scraped {} job cards from search page", cards.len());
        Ok(cards.into_iter().map(ScrapedCard::into_record).collect())
    }

    async fn scrape(&self, guard: &BrowserGuard, url: &str) -> Result<Vec<ScrapedCard>, FetchError> {
        let mut page = guard
            .new_context()
            .await
            .map_err(|e| FetchError::BrowserLaunch(format!("{e:#}")))?;

        let result = self.scrape_page(page.as_mut(), url).await;
        if let Err(e) = page.close().await {
            warn!("failed to close page: {e:#}");
        }
        result
    }

    async fn scrape_page(
        &self,
        page: &mut dyn RenderContext,
        url: &str,
    ) -> Result<Vec<ScrapedCard>, FetchError> {
        let navigation = |e: anyhow::Error| FetchError::Navigation(format!("{e:#}"));

        page.set_user_agent(USER_AGENT).await.map_err(navigation)?;
        let nav = page
            .navigate(url, self.navigation_timeout_ms)
            .await
            .map_err(navigation)?;
        debug!("loaded {} in {}ms", nav.final_url, nav.load_time_ms);

        page.wait_for_network_idle(NETWORK_QUIET_MS, self.navigation_timeout_ms)
            .await
            .map_err(navigation)?;

        let found = page
            .wait_for_selector(RESULTS_SELECTOR, self.selector_timeout_ms)
            .await
            .map_err(navigation)?;
        if !found {
            return Err(FetchError::SelectorTimeout);
        }

        let value = page
            .execute_js(EXTRACT_CARDS_JS)
            .await
            .map_err(|e| FetchError::Extraction(format!("{e:#}")))?;
        serde_json::from_value(value).map_err(|e| FetchError::Extraction(e.to_string()))
    }
}
