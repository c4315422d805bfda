//! Job search pipeline: acquire raw records, then normalize them.

use crate::acquisition::FetchStrategy;
use crate::config::StrategyKind;
use job_scout::{normalize_with, NormalizedJob, Query, ScoutError, SkillVocabulary};
use std::time::Instant;
use tracing::{info, warn};

/// Runs searches against the process-wide acquisition strategy.
pub struct JobService {
    strategy: FetchStrategy,
    vocabulary: &'static SkillVocabulary,
}

impl JobService {
    /// Use the built-in skill vocabulary.
    pub fn new(strategy: FetchStrategy) -> Self {
        Self {
            strategy,
            vocabulary: SkillVocabulary::builtin(),
        }
    }

    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Fetch and normalize one page of jobs for a validated query.
    ///
    /// A failed fetch returns no jobs at all, never a partial list.
    pub async fn search(&self, query: &Query) -> Result<Vec<NormalizedJob>, ScoutError> {
        let started = Instant::now();
        let strategy = self.strategy.kind();

        let raw = match self.strategy.fetch_jobs(query).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    %strategy,
                    keywords = %query.keywords,
                    location = %query.location,
                    "fetch failed: {e}"
                );
                return Err(e.into());
            }
        };

        let jobs = normalize_with(self.vocabulary, &raw);
        info!(
            %strategy,
            keywords = %query.keywords,
            location = %query.location,
            count = jobs.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::browser::BrowserStrategy;
    use crate::acquisition::search_url::SEARCH_PAGE_URL;
    use crate::renderer::scripted::ScriptedLauncher;
    use job_scout::{FetchError, JobStatus};
    use serde_json::json;
    use std::sync::Arc;

    fn service(launcher: &ScriptedLauncher) -> JobService {
        JobService::new(FetchStrategy::Browser(BrowserStrategy::new(
            Arc::new(launcher.clone()),
            SEARCH_PAGE_URL,
            1_000,
            1_000,
        )))
    }

    #[tokio::test]
    async fn test_search_normalizes_every_record() {
        let launcher = ScriptedLauncher::with_cards(json!([
            { "title": "Python Developer", "description": "Django and PostgreSQL" },
            { "title": "", "description": "" }
        ]));
        let jobs = service(&launcher)
            .search(&Query::new("python", "remote"))
            .await
            .unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(
            jobs[0].required_skills.iter().collect::<Vec<_>>(),
            vec!["django", "postgresql", "python"]
        );
        assert_eq!(jobs[1].description, None);
        assert!(jobs.iter().all(|j| j.status == JobStatus::Open));
    }

    #[tokio::test]
    async fn test_search_surfaces_fetch_errors() {
        let launcher = ScriptedLauncher::missing_results();
        let err = service(&launcher)
            .search(&Query::new("python", "remote"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Fetch(FetchError::SelectorTimeout)));
    }
}
