//! In-process renderer that replays canned page content.
//!
//! Used to exercise the browser strategy without a Chromium binary. Every
//! launch, page, and shutdown is counted so callers can assert that browser
//! resources were released.

use super::{Launcher, NavigationResult, RenderContext, Renderer};
use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Outcome {
    Cards(Value),
    MissingResults,
    NavigationError(String),
}

#[derive(Default)]
struct Counters {
    launches: AtomicUsize,
    shutdowns: AtomicUsize,
    dropped: AtomicUsize,
    open_pages: AtomicUsize,
    visited: Mutex<Vec<String>>,
    user_agents: Mutex<Vec<String>>,
}

/// Launcher whose browsers serve a fixed outcome for every page.
#[derive(Clone)]
pub struct ScriptedLauncher {
    outcome: Outcome,
    launch_error: Option<String>,
    shutdown_error: bool,
    page_close_error: bool,
    counters: Arc<Counters>,
}

impl ScriptedLauncher {
    fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            launch_error: None,
            shutdown_error: false,
            page_close_error: false,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Pages render a results list; the extraction script returns `cards`.
    pub fn with_cards(cards: Value) -> Self {
        Self::new(Outcome::Cards(cards))
    }

    /// Pages never render the results list.
    pub fn missing_results() -> Self {
        Self::new(Outcome::MissingResults)
    }

    /// Navigation fails with `message`.
    pub fn failing_navigation(message: impl Into<String>) -> Self {
        Self::new(Outcome::NavigationError(message.into()))
    }

    /// The browser never starts.
    pub fn failing_launch(message: impl Into<String>) -> Self {
        let mut launcher = Self::new(Outcome::MissingResults);
        launcher.launch_error = Some(message.into());
        launcher
    }

    /// Browser shutdown reports an error (after counting the attempt).
    pub fn failing_shutdown(mut self) -> Self {
        self.shutdown_error = true;
        self
    }

    /// Closing a page reports an error (after the page is counted closed).
    pub fn failing_page_close(mut self) -> Self {
        self.page_close_error = true;
        self
    }

    pub fn launches(&self) -> usize {
        self.counters.launches.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.counters.shutdowns.load(Ordering::SeqCst)
    }

    /// Browsers whose handle has been dropped, gracefully or not.
    pub fn dropped(&self) -> usize {
        self.counters.dropped.load(Ordering::SeqCst)
    }

    pub fn open_pages(&self) -> usize {
        self.counters.open_pages.load(Ordering::SeqCst)
    }

    /// Every launched browser was shut down and every page closed.
    pub fn all_released(&self) -> bool {
        self.launches() == self.shutdowns() && self.launches() == self.dropped() && self.open_pages() == 0
    }

    pub fn visited_urls(&self) -> Vec<String> {
        self.counters
            .visited
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    pub fn user_agents(&self) -> Vec<String> {
        self.counters
            .user_agents
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Launcher for ScriptedLauncher {
    async fn launch(&self) -> Result<Box<dyn Renderer>> {
        if let Some(message) = &self.launch_error {
            bail!("{message}");
        }
        self.counters.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedRenderer {
            outcome: self.outcome.clone(),
            shutdown_error: self.shutdown_error,
            page_close_error: self.page_close_error,
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct ScriptedRenderer {
    outcome: Outcome,
    shutdown_error: bool,
    page_close_error: bool,
    counters: Arc<Counters>,
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        self.counters.open_pages.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedContext {
            outcome: self.outcome.clone(),
            close_error: self.page_close_error,
            counters: Arc::clone(&self.counters),
        }))
    }

    async fn shutdown(self: Box<Self>) -> Result<()> {
        self.counters.shutdowns.fetch_add(1, Ordering::SeqCst);
        if self.shutdown_error {
            bail!("scripted shutdown failure");
        }
        Ok(())
    }
}

impl Drop for ScriptedRenderer {
    fn drop(&mut self) {
        self.counters.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

struct ScriptedContext {
    outcome: Outcome,
    close_error: bool,
    counters: Arc<Counters>,
}

#[async_trait]
impl RenderContext for ScriptedContext {
    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        if let Ok(mut agents) = self.counters.user_agents.lock() {
            agents.push(user_agent.to_string());
        }
        Ok(())
    }

    async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> Result<NavigationResult> {
        if let Ok(mut visited) = self.counters.visited.lock() {
            visited.push(url.to_string());
        }
        if let Outcome::NavigationError(message) = &self.outcome {
            bail!("{message}");
        }
        Ok(NavigationResult {
            final_url: url.to_string(),
            load_time_ms: 0,
        })
    }

    async fn wait_for_network_idle(&self, _quiet_ms: u64, _timeout_ms: u64) -> Result<()> {
        Ok(())
    }

    async fn wait_for_selector(&self, _selector: &str, _timeout_ms: u64) -> Result<bool> {
        Ok(!matches!(self.outcome, Outcome::MissingResults))
    }

    async fn execute_js(&self, _script: &str) -> Result<Value> {
        match &self.outcome {
            Outcome::Cards(cards) => Ok(cards.clone()),
            _ => Ok(Value::Array(Vec::new())),
        }
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.counters.open_pages.fetch_sub(1, Ordering::SeqCst);
        if self.close_error {
            bail!("scripted page close failure");
        }
        Ok(())
    }
}
