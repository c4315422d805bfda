//! Runtime configuration resolved once at startup.
//!
//! Every value comes from a `JOBSCOUT_*` environment variable with a built-in
//! default. `JOBSCOUT_SERVERLESS` is the only input to strategy selection:
//! serverless deployments scrape with a headless browser, everything else
//! uses the listing fetcher.

use crate::acquisition::search_url::{LISTING_URL, SEARCH_PAGE_URL};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const SERVERLESS_ENV: &str = "JOBSCOUT_SERVERLESS";
pub const ADDR_ENV: &str = "JOBSCOUT_ADDR";
pub const CHROMIUM_PATH_ENV: &str = "JOBSCOUT_CHROMIUM_PATH";
pub const SEARCH_URL_ENV: &str = "JOBSCOUT_SEARCH_URL";
pub const LISTING_URL_ENV: &str = "JOBSCOUT_LISTING_URL";
pub const SELECTOR_TIMEOUT_ENV: &str = "JOBSCOUT_SELECTOR_TIMEOUT_MS";
pub const NAVIGATION_TIMEOUT_ENV: &str = "JOBSCOUT_NAVIGATION_TIMEOUT_MS";
pub const HTTP_TIMEOUT_ENV: &str = "JOBSCOUT_HTTP_TIMEOUT_MS";

/// Default bind address for the REST API.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Which acquisition strategy the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Headless Chromium against the search results page.
    Browser,
    /// Plain HTTP against the guest listing endpoint.
    Library,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Browser => f.write_str("browser"),
            StrategyKind::Library => f.write_str("library"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub strategy: StrategyKind,
    /// Whether the deployment environment reported itself as serverless.
    pub serverless: bool,
    pub addr: String,
    pub chromium_path: Option<PathBuf>,
    pub search_url: String,
    pub listing_url: String,
    pub selector_timeout_ms: u64,
    pub navigation_timeout_ms: u64,
    pub http_timeout_ms: u64,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Library,
            serverless: false,
            addr: DEFAULT_ADDR.to_string(),
            chromium_path: None,
            search_url: SEARCH_PAGE_URL.to_string(),
            listing_url: LISTING_URL.to_string(),
            selector_timeout_ms: 8_000,
            navigation_timeout_ms: 30_000,
            http_timeout_ms: 30_000,
        }
    }
}

impl ScoutConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let serverless = lookup(SERVERLESS_ENV).is_some_and(|v| is_truthy(&v));
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str, default: u64| {
            non_empty(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            strategy: if serverless {
                StrategyKind::Browser
            } else {
                StrategyKind::Library
            },
            serverless,
            addr: non_empty(ADDR_ENV).unwrap_or(defaults.addr),
            chromium_path: non_empty(CHROMIUM_PATH_ENV).map(PathBuf::from),
            search_url: non_empty(SEARCH_URL_ENV).unwrap_or(defaults.search_url),
            listing_url: non_empty(LISTING_URL_ENV).unwrap_or(defaults.listing_url),
            selector_timeout_ms: millis(SELECTOR_TIMEOUT_ENV, defaults.selector_timeout_ms),
            navigation_timeout_ms: millis(NAVIGATION_TIMEOUT_ENV, defaults.navigation_timeout_ms),
            http_timeout_ms: millis(HTTP_TIMEOUT_ENV, defaults.http_timeout_ms),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
