//! Run the REST API.

use crate::acquisition::FetchStrategy;
use crate::config::{ScoutConfig, StrategyKind};
use crate::rest;
use crate::service::JobService;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Resolve configuration, build the strategy once, and serve until Ctrl-C.
pub async fn run(addr: Option<String>, strategy: Option<StrategyKind>) -> Result<()> {
    let mut config = ScoutConfig::from_env();
    if let Some(addr) = addr {
        config.addr = addr;
    }
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }

    info!(
        strategy = %config.strategy,
        serverless = config.serverless,
        "starting job-scout v{}",
        env!("CARGO_PKG_VERSION")
    );

    let service = Arc::new(JobService::new(FetchStrategy::from_config(&config)));
    rest::start(&config.addr, service).await
}
