//! Keyword-based skill tagging over free text.
//!
//! A [`SkillVocabulary`] compiles one case-insensitive pattern per skill. The
//! skill's literal text is regex-escaped, so punctuated skills such as `c++`,
//! `ci/cd`, or `next.js` match verbatim, and multi-word skills such as
//! `machine learning` match their literal spacing.
//!
//! Word-boundary anchors are placed only on edges where the skill begins or
//! ends with a word character. `\b` next to a `+` or `#` would demand a word
//! character on the other side, which would make `c++` unmatchable in
//! "C++ developer".

use crate::error::ScoutError;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Built-in skill vocabulary.
pub const KNOWN_SKILLS: &[&str] = &[
    "javascript",
    "typescript",
    "react",
    "next.js",
    "node",
    "node.js",
    "python",
    "django",
    "flask",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "postgresql",
    "postgres",
    "sql",
    "mongodb",
    "graphql",
    "rest",
    "tailwind",
    "redux",
    "vue",
    "angular",
    "swift",
    "kotlin",
    "java",
    "c#",
    "c++",
    "ci/cd",
    "terraform",
    "ansible",
    "scala",
    "go",
    "rust",
    "ml",
    "machine learning",
    "nlp",
    "pandas",
    "numpy",
    "tensorflow",
    "pytorch",
    "spark",
    "airflow",
];

struct SkillPattern {
    skill: String,
    pattern: Regex,
}

/// An ordered, read-only set of recognized skills with precompiled patterns.
pub struct SkillVocabulary {
    entries: Vec<SkillPattern>,
}

impl SkillVocabulary {
    /// Compile a vocabulary. Blank entries are skipped.
    pub fn new<I, S>(skills: I) -> Result<Self, ScoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries = Vec::new();
        for skill in skills {
            let skill: String = skill.into();
            if skill.trim().is_empty() {
                continue;
            }
            let pattern = Regex::new(&boundary_pattern(&skill))?;
            entries.push(SkillPattern { skill, pattern });
        }
        Ok(Self { entries })
    }

    /// The process-wide built-in vocabulary, compiled on first use.
    pub fn builtin() -> &'static SkillVocabulary {
        static BUILTIN: OnceLock<SkillVocabulary> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            SkillVocabulary::new(KNOWN_SKILLS.iter().copied())
                .expect("built-in skill patterns are valid")
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Skills in vocabulary order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.skill.as_str())
    }

    /// Find every vocabulary skill mentioned in the given texts.
    ///
    /// Non-empty texts are joined with a single space and lower-cased before
    /// matching. The result is sorted and free of duplicates.
    pub fn extract<'a, I>(&self, texts: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let text = texts
            .into_iter()
            .flatten()
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        if text.is_empty() {
            return BTreeSet::new();
        }

        self.entries
            .iter()
            .filter(|e| e.pattern.is_match(&text))
            .map(|e| e.skill.clone())
            .collect()
    }
}

/// Extract skills using the built-in vocabulary.
pub fn extract_skills<'a, I>(texts: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    SkillVocabulary::builtin().extract(texts)
}

fn boundary_pattern(skill: &str) -> String {
    let lead = if skill.chars().next().is_some_and(is_word_char) {
        r"(?-u:\b)"
    } else {
        ""
    };
    let trail = if skill.chars().last().is_some_and(is_word_char) {
        r"(?-u:\b)"
    } else {
        ""
    };
    format!("(?i){lead}{}{trail}", regex::escape(skill))
}

/// Word characters for boundary purposes are ASCII only; accented letters
/// next to a skill do not join it into a longer word.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(texts: &[Option<&str>]) -> Vec<String> {
        extract_skills(texts.iter().copied()).into_iter().collect()
    }

    #[test]
    fn test_react_and_redux() {
        assert_eq!(skills(&[Some("I know React and Redux")]), vec!["react", "redux"]);
    }

    #[test]
    fn test_cpp_matches_literal_plus_signs() {
        assert!(skills(&[Some("C++ developer")]).contains(&"c++".to_string()));
        assert!(skills(&[Some("C developer")]).is_empty());
        assert_eq!(
            skills(&[Some("Embedded C# / C++ role")]),
            vec!["c#", "c++"]
        );
    }

    #[test]
    fn test_absent_and_empty_inputs() {
        assert!(skills(&[None, None, Some("")]).is_empty());
        assert!(skills(&[]).is_empty());
    }

    #[test]
    fn test_whole_word_matching() {
        assert_eq!(skills(&[Some("Senior JavaScript engineer")]), vec!["javascript"]);
        assert!(skills(&[Some("Golang and Rustacean interest")]).is_empty());
        assert_eq!(
            skills(&[Some("Next.js and Node.js services")]),
            vec!["next.js", "node", "node.js"]
        );
    }

    #[test]
    fn test_word_boundaries_are_ascii() {
        assert_eq!(skills(&[Some("Join the Goé team")]), vec!["go"]);
        assert_eq!(skills(&[Some("éjava café")]), vec!["java"]);
        assert!(skills(&[Some("golang")]).is_empty());
    }

    #[test]
    fn test_multi_word_and_punctuated_skills() {
        assert_eq!(
            skills(&[Some("Machine Learning platform with CI/CD pipelines")]),
            vec!["ci/cd", "machine learning"]
        );
    }

    #[test]
    fn test_texts_are_joined_with_a_space() {
        assert_eq!(
            skills(&[Some("Machine"), None, Some("learning")]),
            vec!["machine learning"]
        );
    }

    #[test]
    fn test_results_strictly_ascending() {
        let samples = [
            "Python, Django, Flask, AWS, Docker, Kubernetes, PostgreSQL and SQL",
            "react react REACT typescript TypeScript",
            "Spark Airflow pandas numpy pytorch tensorflow nlp ml Scala Java Kotlin Swift",
            "GraphQL REST Vue Angular Tailwind MongoDB GCP Azure Terraform Ansible Go Rust",
        ];
        for text in samples {
            let found = skills(&[Some(text)]);
            assert!(!found.is_empty(), "no skills found in {text:?}");
            assert!(
                found.windows(2).all(|w| w[0] < w[1]),
                "not strictly ascending: {found:?}"
            );
        }
    }

    #[test]
    fn test_custom_vocabulary_skips_blank_entries() {
        let vocab = SkillVocabulary::new(["elixir", "  ", "", "f#"]).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.skills().collect::<Vec<_>>(), vec!["elixir", "f#"]);
        let found = vocab.extract([Some("Elixir and F# shop")]);
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec!["elixir", "f#"]);
    }

    #[test]
    fn test_builtin_vocabulary_is_complete() {
        assert_eq!(SkillVocabulary::builtin().len(), KNOWN_SKILLS.len());
    }
}
