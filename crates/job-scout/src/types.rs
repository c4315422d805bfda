//! Core data types for job search queries and listings.

use crate::error::ScoutError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// How recently a posting must have been published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateSincePosted {
    #[default]
    Any,
    Past24Hours,
    PastWeek,
    PastMonth,
}

impl DateSincePosted {
    /// Parse a wire value. Unknown and empty values mean no restriction.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "past_24h" | "24hr" | "past 24 hours" => Self::Past24Hours,
            "past_week" | "past week" => Self::PastWeek,
            "past_month" | "past month" => Self::PastMonth,
            _ => Self::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "",
            Self::Past24Hours => "past_24h",
            Self::PastWeek => "past_week",
            Self::PastMonth => "past_month",
        }
    }
}

/// Workplace type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoteFilter {
    #[default]
    Any,
    Remote,
    OnSite,
    Hybrid,
}

impl RemoteFilter {
    /// Parse a wire value. Accepts both `on_site` and `on site`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Self::Remote,
            "on_site" | "on site" | "onsite" | "on-site" => Self::OnSite,
            "hybrid" => Self::Hybrid,
            _ => Self::Any,
        }
    }
}

/// Result ordering requested from the upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Any,
    Recent,
    Relevant,
}

impl SortBy {
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "recent" => Self::Recent,
            "relevant" => Self::Relevant,
            _ => Self::Any,
        }
    }
}

/// Search request as received on the wire, before validation.
///
/// Every field is optional here; [`SearchRequest::validate`] turns it into a
/// [`Query`] or rejects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub keywords: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date_since_posted: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub limit: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub experience_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub remote_filter: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: Option<u32>,
}

impl SearchRequest {
    /// Read a request from an arbitrary JSON document.
    ///
    /// Anything other than an object is an empty request, so it fails
    /// validation rather than parsing.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Check required fields and convert loosely typed values.
    ///
    /// Fails with [`ScoutError::MissingFields`] when `keywords` or `location`
    /// is absent or blank.
    pub fn validate(self) -> Result<Query, ScoutError> {
        let (Some(keywords), Some(location)) = (non_blank(self.keywords), non_blank(self.location))
        else {
            return Err(ScoutError::MissingFields);
        };

        Ok(Query {
            keywords,
            location,
            date_since_posted: self
                .date_since_posted
                .as_deref()
                .map(DateSincePosted::parse_lenient)
                .unwrap_or_default(),
            limit: self.limit,
            experience_level: non_blank(self.experience_level),
            remote_filter: self
                .remote_filter
                .as_deref()
                .map(RemoteFilter::parse_lenient)
                .unwrap_or_default(),
            sort_by: self
                .sort_by
                .as_deref()
                .map(SortBy::parse_lenient)
                .unwrap_or_default(),
            page: self.page,
        })
    }
}

/// A validated job search query.
///
/// `keywords` and `location` are guaranteed non-blank. `limit` and `page` are
/// carried through but not enforced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub keywords: String,
    pub location: String,
    pub date_since_posted: DateSincePosted,
    pub limit: Option<u32>,
    pub experience_level: Option<String>,
    pub remote_filter: RemoteFilter,
    pub sort_by: SortBy,
    pub page: Option<u32>,
}

impl Query {
    /// Build a query with only the required fields set.
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            date_since_posted: DateSincePosted::Any,
            limit: None,
            experience_level: None,
            remote_filter: RemoteFilter::Any,
            sort_by: SortBy::Any,
            page: None,
        }
    }

    pub fn with_date_since_posted(mut self, date: DateSincePosted) -> Self {
        self.date_since_posted = date;
        self
    }
}

/// A job listing as produced by an acquisition strategy.
///
/// No field is guaranteed to be present or non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobRecord {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    /// ISO-8601 timestamp when the source date was parseable, raw text otherwise.
    pub posted_date: Option<String>,
    pub description: Option<String>,
}

/// Whether a posting is still accepting applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    /// Reserved; no source signal currently produces it.
    Closed,
}

/// Canonical job representation returned to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedJob {
    pub title: String,
    pub description: Option<String>,
    pub required_skills: BTreeSet<String>,
    pub status: JobStatus,
}

/// Parse a count from a query-string value. Non-numeric input means absent.
pub fn parse_count(s: &str) -> Option<u32> {
    s.trim().parse().ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Strings pass through, numbers and booleans are written out as text,
/// anything else counts as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => parse_count(&s),
        _ => None,
    }))
}
