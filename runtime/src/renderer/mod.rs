//! Renderer abstraction for browser-based page scraping.
//!
//! A [`Launcher`] starts a browser, a [`Renderer`] is one running browser, and
//! a [`RenderContext`] is a single page (tab) inside it. The browser strategy
//! only talks to these traits; Chromium via chromiumoxide is the production
//! engine; the `scripted` module (`test-support` feature) provides an
//! in-process engine for tests.

pub mod chromium;
pub mod guard;
#[cfg(any(test, feature = "test-support"))]
pub mod scripted;

pub use guard::BrowserGuard;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// Starts browser instances. One launch per scrape.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Renderer>>;
}

/// A running browser that can create rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Create a new browser context (tab).
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
    /// Close the browser and reap its process.
    async fn shutdown(self: Box<Self>) -> Result<()>;
}

/// A single browser context (tab) for rendering pages.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Override the user-agent sent by this page.
    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()>;
    /// Navigate to a URL with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;
    /// Wait until no new network resources have loaded for `quiet_ms`.
    ///
    /// Fails if the page is still loading resources after `timeout_ms`.
    async fn wait_for_network_idle(&self, quiet_ms: u64, timeout_ms: u64) -> Result<()>;
    /// Wait for an element matching `selector`. Returns `false` on timeout.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<bool>;
    /// Execute JavaScript in the page context and return the result.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;
    /// Close this context.
    async fn close(self: Box<Self>) -> Result<()>;
}
