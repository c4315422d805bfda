//! One-shot search from the command line.

use crate::acquisition::FetchStrategy;
use crate::config::{ScoutConfig, StrategyKind};
use crate::rest::{run_search, SearchResponse};
use crate::service::JobService;
use anyhow::Result;
use job_scout::SearchRequest;

/// Fetch and normalize one page, then print the first `show` jobs as JSON.
pub async fn run(
    keywords: String,
    location: String,
    date: String,
    show: usize,
    strategy: Option<StrategyKind>,
) -> Result<()> {
    let mut config = ScoutConfig::from_env();
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    let service = JobService::new(FetchStrategy::from_config(&config));

    let request = SearchRequest {
        keywords: Some(keywords),
        location: Some(location),
        date_since_posted: Some(date),
        ..Default::default()
    };
    let response = run_search(&service, request).await?;

    println!("{}", serde_json::to_string_pretty(&preview(response, show))?);
    Ok(())
}

/// Keep `count` as the full total while trimming the job list.
fn preview(mut response: SearchResponse, show: usize) -> SearchResponse {
    response.jobs.truncate(show);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_scout::{JobStatus, NormalizedJob};

    fn job(title: &str) -> NormalizedJob {
        NormalizedJob {
            title: title.to_string(),
            description: None,
            required_skills: Default::default(),
            status: JobStatus::Open,
        }
    }

    #[test]
    fn test_preview_keeps_total_count() {
        let response = SearchResponse {
            success: true,
            count: 7,
            jobs: (0..7).map(|i| job(&format!("job {i}"))).collect(),
        };
        let shown = preview(response, 5);
        assert_eq!(shown.count, 7);
        assert_eq!(shown.jobs.len(), 5);
        assert_eq!(shown.jobs[4].title, "job 4");
    }
}
