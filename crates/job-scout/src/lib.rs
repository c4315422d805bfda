//! Job Scout core library for job search queries, skill tagging, and listing normalization.

pub mod error;
pub mod normalize;
pub mod skills;
pub mod types;

pub use error::{FetchError, ScoutError};
pub use normalize::{normalize, normalize_record, normalize_with};
pub use skills::{extract_skills, SkillVocabulary, KNOWN_SKILLS};
pub use types::*;
