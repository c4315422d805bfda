//! Map raw job records onto the canonical [`NormalizedJob`] schema.

use crate::skills::SkillVocabulary;
use crate::types::{JobStatus, NormalizedJob, RawJobRecord};

/// Normalize records with the built-in skill vocabulary.
///
/// One output job per input record, in input order.
pub fn normalize(raw: &[RawJobRecord]) -> Vec<NormalizedJob> {
    normalize_with(SkillVocabulary::builtin(), raw)
}

/// Normalize records with a caller-supplied vocabulary.
pub fn normalize_with(vocabulary: &SkillVocabulary, raw: &[RawJobRecord]) -> Vec<NormalizedJob> {
    raw.iter()
        .map(|record| normalize_record(vocabulary, record))
        .collect()
}

/// Normalize a single record. An empty description becomes `None`.
pub fn normalize_record(vocabulary: &SkillVocabulary, record: &RawJobRecord) -> NormalizedJob {
    let description = record
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(str::to_string);

    NormalizedJob {
        title: record.title.clone().unwrap_or_default(),
        required_skills: vocabulary
            .extract([record.title.as_deref(), description.as_deref()]),
        description,
        status: JobStatus::Open,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, description: &str) -> RawJobRecord {
        RawJobRecord {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_length_and_order_preserved() {
        let raw = vec![
            record("Rust Engineer", "Tokio and AWS"),
            RawJobRecord::default(),
            record("Rust Engineer", "Tokio and AWS"),
            record("Data Scientist", "pandas, numpy"),
        ];
        let jobs = normalize(&raw);
        assert_eq!(jobs.len(), raw.len());
        assert_eq!(jobs[0].title, "Rust Engineer");
        assert_eq!(jobs[0], jobs[2]);
        assert_eq!(jobs[3].title, "Data Scientist");
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_empty_description_becomes_none() {
        let jobs = normalize(&[record("Go Developer", "")]);
        assert_eq!(jobs[0].description, None);
        assert_eq!(
            jobs[0].required_skills.iter().collect::<Vec<_>>(),
            vec!["go"]
        );
    }

    #[test]
    fn test_empty_record_still_normalizes() {
        let jobs = normalize(&[RawJobRecord::default()]);
        assert_eq!(jobs[0].title, "");
        assert_eq!(jobs[0].description, None);
        assert!(jobs[0].required_skills.is_empty());
        assert_eq!(jobs[0].status, JobStatus::Open);
    }

    #[test]
    fn test_skills_from_title_and_description() {
        let jobs = normalize(&[record(
            "Senior Python Engineer",
            "Build ML pipelines on Airflow and Kubernetes",
        )]);
        assert_eq!(
            jobs[0].required_skills.iter().collect::<Vec<_>>(),
            vec!["airflow", "kubernetes", "ml", "python"]
        );
        assert_eq!(
            jobs[0].description.as_deref(),
            Some("Build ML pipelines on Airflow and Kubernetes")
        );
    }

    #[test]
    fn test_company_and_link_do_not_contribute_skills() {
        let raw = RawJobRecord {
            title: Some("Engineer".into()),
            company: Some("Docker Inc".into()),
            link: Some("https://example.com/react".into()),
            ..Default::default()
        };
        assert!(normalize(&[raw])[0].required_skills.is_empty());
    }
}
