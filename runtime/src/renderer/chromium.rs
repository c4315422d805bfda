//! Chromium-based renderer using chromiumoxide.

use super::{Launcher, NavigationResult, RenderContext, Renderer};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Poll interval for selector and network-idle waits.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Resource entries loaded so far, or -1 while the document is still loading.
const RESOURCE_COUNT_JS: &str = "document.readyState === 'complete' \
    ? performance.getEntriesByType('resource').length : -1";

/// Find the Chromium binary path.
pub fn find_chromium(explicit: Option<&Path>) -> Option<PathBuf> {
    // 1. Explicit path from configuration
    if let Some(path) = explicit {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. ~/.job-scout/chromium/
    if let Some(home) = dirs::home_dir() {
        let candidates = if cfg!(target_os = "macos") {
            vec![
                home.join(".job-scout/chromium/chrome-mac-arm64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".job-scout/chromium/chrome-mac-x64/Google Chrome for Testing.app/Contents/MacOS/Google Chrome for Testing"),
                home.join(".job-scout/chromium/chrome"),
            ]
        } else {
            vec![
                home.join(".job-scout/chromium/chrome-linux64/chrome"),
                home.join(".job-scout/chromium/chrome"),
            ]
        };
        for c in candidates {
            if c.exists() {
                return Some(c);
            }
        }
    }

    // 3. System PATH
    for name in ["chromium", "chromium-browser", "google-chrome", "headless-shell"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    // 4. Well-known locations (serverless layers, macOS app bundle)
    let common = [
        "/opt/chromium/chromium",
        "/tmp/chromium",
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    ];
    common.iter().map(PathBuf::from).find(|p| p.exists())
}

/// Launch arguments for headless Chromium.
///
/// Serverless sandboxes have no zygote support, a tiny `/dev/shm`, and a
/// single CPU, so they get a single-process profile.
pub fn launch_args(serverless: bool) -> Vec<&'static str> {
    let mut args = vec![
        "--headless=new",
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
        "--disable-extensions",
        "--disable-background-networking",
    ];
    if serverless {
        args.extend([
            "--single-process",
            "--no-zygote",
            "--disable-setuid-sandbox",
            "--no-first-run",
            "--hide-scrollbars",
            "--mute-audio",
        ]);
    }
    args
}

/// Launches a fresh headless Chromium per call.
pub struct ChromiumLauncher {
    executable: Option<PathBuf>,
    serverless: bool,
    request_timeout: Duration,
}

impl ChromiumLauncher {
    pub fn new(executable: Option<PathBuf>, serverless: bool, request_timeout_ms: u64) -> Self {
        Self {
            executable,
            serverless,
            request_timeout: Duration::from_millis(request_timeout_ms),
        }
    }
}

#[async_trait]
impl Launcher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn Renderer>> {
        let renderer = ChromiumRenderer::launch(
            self.executable.as_deref(),
            self.serverless,
            self.request_timeout,
        )
        .await?;
        Ok(Box::new(renderer))
    }
}

/// Chromium-based renderer.
pub struct ChromiumRenderer {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumRenderer {
    /// Launch a headless Chromium instance.
    pub async fn launch(
        executable: Option<&Path>,
        serverless: bool,
        request_timeout: Duration,
    ) -> Result<Self> {
        let chrome_path = find_chromium(executable)
            .context("Chromium not found. Set JOBSCOUT_CHROMIUM_PATH or install chromium.")?;

        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .request_timeout(request_timeout);
        for arg in launch_args(serverless) {
            builder = builder.arg(arg);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        // Spawn the handler task
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self { browser, handler })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        Ok(Box::new(ChromiumContext { page }))
    }

    async fn shutdown(self: Box<Self>) -> Result<()> {
        let ChromiumRenderer {
            mut browser,
            handler,
        } = *self;
        let closed = browser.close().await.context("failed to close Chromium");
        let _ = browser.wait().await;
        handler.abort();
        closed.map(|_| ())
    }
}

/// A single Chromium page context.
pub struct ChromiumContext {
    page: Page,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn set_user_agent(&mut self, user_agent: &str) -> Result<()> {
        self.page
            .set_user_agent(user_agent)
            .await
            .context("failed to set user agent")?;
        Ok(())
    }

    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult> {
        let start = Instant::now();

        let result =
            tokio::time::timeout(Duration::from_millis(timeout_ms), self.page.goto(url)).await;

        let load_time_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Ok(_)) => {
                let final_url = self
                    .page
                    .url()
                    .await
                    .unwrap_or_default()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| url.to_string());

                Ok(NavigationResult {
                    final_url,
                    load_time_ms,
                })
            }
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {timeout_ms}ms"),
        }
    }

    async fn wait_for_network_idle(&self, quiet_ms: u64, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        let quiet = Duration::from_millis(quiet_ms);
        let mut last_count: Option<i64> = None;
        let mut quiet_since = Instant::now();

        loop {
            let count = self
                .execute_js(RESOURCE_COUNT_JS)
                .await?
                .as_i64()
                .unwrap_or(-1);

            if count < 0 || last_count != Some(count) {
                last_count = Some(count);
                quiet_since = Instant::now();
            } else if quiet_since.elapsed() >= quiet {
                return Ok(());
            }

            if Instant::now() >= deadline {
                bail!("network did not settle within {timeout_ms}ms");
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<bool> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("JS execution failed")?;

        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert JS result: {e:?}"))
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.page.close().await.context("failed to close page")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serverless_args_extend_base_profile() {
        let base = launch_args(false);
        let serverless = launch_args(true);
        assert!(base.contains(&"--headless=new"));
        assert!(!base.contains(&"--single-process"));
        assert!(serverless.starts_with(&base));
        assert!(serverless.contains(&"--single-process"));
        assert!(serverless.contains(&"--no-zygote"));
    }

    #[test]
    fn test_find_chromium_prefers_existing_explicit_path() {
        let exe = std::env::current_exe().unwrap();
        assert_eq!(find_chromium(Some(&exe)), Some(exe));
    }

    #[tokio::test]
    #[ignore] // Requires Chromium to be installed
    async fn test_chromium_scrapes_data_url() {
        let launcher = ChromiumLauncher::new(None, false, 10_000);
        let renderer = launcher.launch().await.expect("failed to launch Chromium");
        let mut ctx = renderer
            .new_context()
            .await
            .expect("failed to create context");

        ctx.set_user_agent("job-scout-test")
            .await
            .expect("set_user_agent failed");
        ctx.navigate(
            "data:text/html,<ul class='jobs-search__results-list'><li>Hello</li></ul>",
            10_000,
        )
        .await
        .expect("navigation failed");

        ctx.wait_for_network_idle(200, 5_000)
            .await
            .expect("network never settled");
        assert!(ctx
            .wait_for_selector("ul.jobs-search__results-list", 2_000)
            .await
            .unwrap());
        assert!(!ctx.wait_for_selector("table.missing", 300).await.unwrap());

        let result = ctx
            .execute_js("document.querySelector('li').textContent")
            .await
            .expect("JS execution failed");
        assert_eq!(result.as_str().unwrap(), "Hello");

        ctx.close().await.expect("close failed");
        renderer.shutdown().await.expect("shutdown failed");
    }
}
