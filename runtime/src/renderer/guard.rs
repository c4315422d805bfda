//! Scoped ownership of a launched browser.

use super::{RenderContext, Renderer};
use anyhow::{bail, Result};
use tracing::warn;

/// Owns a browser for the duration of one scrape.
///
/// Call [`BrowserGuard::release`] on every exit path to close the browser
/// gracefully. If the guard is dropped instead (panic, cancelled request) the
/// renderer is dropped with it, which kills the browser process.
pub struct BrowserGuard {
    renderer: Option<Box<dyn Renderer>>,
}

impl BrowserGuard {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Self {
            renderer: Some(renderer),
        }
    }

    /// Open a new page in the guarded browser.
    pub async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        match &self.renderer {
            Some(renderer) => renderer.new_context().await,
            None => bail!("browser already released"),
        }
    }

    /// Close the browser. Close failures are logged, never returned.
    pub async fn release(mut self) {
        if let Some(renderer) = self.renderer.take() {
            if let Err(e) = renderer.shutdown().await {
                warn!("failed to close browser cleanly: {e:#}");
            }
        }
    }
}

impl Drop for BrowserGuard {
    fn drop(&mut self) {
        if self.renderer.take().is_some() {
            warn!("browser guard dropped without release; killing browser process");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scripted::ScriptedLauncher;
    use crate::renderer::Launcher;

    #[tokio::test]
    async fn test_release_shuts_browser_down() {
        let launcher = ScriptedLauncher::with_cards(serde_json::json!([]));
        let guard = BrowserGuard::new(launcher.launch().await.unwrap());
        let page = guard.new_context().await.unwrap();
        page.close().await.unwrap();
        guard.release().await;
        assert_eq!(launcher.launches(), 1);
        assert!(launcher.all_released());
    }

    #[tokio::test]
    async fn test_release_swallows_shutdown_errors() {
        let launcher = ScriptedLauncher::with_cards(serde_json::json!([])).failing_shutdown();
        let guard = BrowserGuard::new(launcher.launch().await.unwrap());
        guard.release().await;
        assert_eq!(launcher.shutdowns(), 1);
    }

    #[tokio::test]
    async fn test_drop_without_release_drops_browser() {
        let launcher = ScriptedLauncher::with_cards(serde_json::json!([]));
        {
            let _guard = BrowserGuard::new(launcher.launch().await.unwrap());
        }
        assert_eq!(launcher.shutdowns(), 0);
        assert_eq!(launcher.dropped(), 1);
    }
}
