//! Job listing acquisition.
//!
//! Two mutually exclusive strategies produce the same [`RawJobRecord`] shape:
//! the browser strategy renders the search page in headless Chromium, the
//! library strategy requests the guest listing endpoint over HTTP. Which one
//! runs is decided once at startup.

pub mod browser;
pub mod http_client;
pub mod library;
pub mod listing;
pub mod search_url;

use crate::config::{ScoutConfig, StrategyKind};
use crate::renderer::chromium::ChromiumLauncher;
use browser::BrowserStrategy;
use http_client::HttpClient;
use job_scout::{FetchError, Query, RawJobRecord};
use library::LibraryStrategy;
use std::sync::Arc;

/// The acquisition strategy chosen for this process.
pub enum FetchStrategy {
    Browser(BrowserStrategy),
    Library(LibraryStrategy),
}

impl FetchStrategy {
    /// Build the strategy named by the configuration.
    pub fn from_config(config: &ScoutConfig) -> Self {
        match config.strategy {
            StrategyKind::Browser => {
                let launcher = ChromiumLauncher::new(
                    config.chromium_path.clone(),
                    config.serverless,
                    config.navigation_timeout_ms,
                );
                FetchStrategy::Browser(BrowserStrategy::new(
                    Arc::new(launcher),
                    config.search_url.clone(),
                    config.navigation_timeout_ms,
                    config.selector_timeout_ms,
                ))
            }
            StrategyKind::Library => FetchStrategy::Library(LibraryStrategy::new(
                HttpClient::new(config.http_timeout_ms),
                config.listing_url.clone(),
            )),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            FetchStrategy::Browser(_) => StrategyKind::Browser,
            FetchStrategy::Library(_) => StrategyKind::Library,
        }
    }

    /// Fetch one page of raw job records. Single attempt, no retries.
    pub async fn fetch_jobs(&self, query: &Query) -> Result<Vec<RawJobRecord>, FetchError> {
        match self {
            FetchStrategy::Browser(strategy) => strategy.fetch_jobs(query).await,
            FetchStrategy::Library(strategy) => strategy.fetch_jobs(query).await,
        }
    }
}
