//! Environment readiness check.

use crate::config::{ScoutConfig, StrategyKind};
use crate::renderer::chromium::{find_chromium, launch_args};
use anyhow::Result;

/// Report the resolved configuration and whether Chromium can be found.
pub async fn run() -> Result<()> {
    let config = ScoutConfig::from_env();

    println!("Job Scout Doctor");
    println!("================");
    println!();
    println!("OS:   {}", std::env::consts::OS);
    println!("Arch: {}", std::env::consts::ARCH);
    println!();

    println!("[OK] Strategy: {} (serverless: {})", config.strategy, config.serverless);
    println!("[OK] Bind address: {}", config.addr);
    println!("[OK] Search page: {}", config.search_url);
    println!("[OK] Listing endpoint: {}", config.listing_url);

    let chromium = find_chromium(config.chromium_path.as_deref());
    match &chromium {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None if config.strategy == StrategyKind::Browser => {
            println!("[!!] Chromium NOT found. Set JOBSCOUT_CHROMIUM_PATH or install Chromium.")
        }
        None => println!("[--] Chromium not found (not needed by the library strategy)"),
    }
    if config.strategy == StrategyKind::Browser {
        println!("     Launch args: {}", launch_args(config.serverless).join(" "));
    }

    println!();
    if is_ready(config.strategy, chromium.is_some()) {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }
    Ok(())
}

/// The browser strategy needs a Chromium binary; the library strategy does not.
fn is_ready(strategy: StrategyKind, chromium_found: bool) -> bool {
    match strategy {
        StrategyKind::Browser => chromium_found,
        StrategyKind::Library => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_depends_on_strategy() {
        assert!(is_ready(StrategyKind::Library, false));
        assert!(is_ready(StrategyKind::Browser, true));
        assert!(!is_ready(StrategyKind::Browser, false));
    }
}
