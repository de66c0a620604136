//! Job posting parsing into structured requirements

use crate::error::Result;
use crate::processing::nlp::{self, NlpResources};
use crate::processing::vocabulary::{DEFAULT_EDUCATION, EXPERIENCE_LEVELS};
use crate::storage::{JobId, JobRecord, RecordStore};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Structured facts parsed from a job posting. All string sets are
/// lower-cased and trimmed; missing fields become empty containers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    pub required_skills: BTreeSet<String>,
    pub preferred_skills: BTreeSet<String>,
    pub min_experience: u32,
    pub education: String,
    pub responsibilities: Vec<String>,
    pub keywords: BTreeSet<String>,
}

impl Default for JobRequirements {
    fn default() -> Self {
        Self {
            required_skills: BTreeSet::new(),
            preferred_skills: BTreeSet::new(),
            min_experience: 0,
            education: DEFAULT_EDUCATION.to_string(),
            responsibilities: Vec::new(),
            keywords: BTreeSet::new(),
        }
    }
}

pub struct RequirementParser {
    nlp: &'static NlpResources,
}

impl RequirementParser {
    pub fn new() -> Result<Self> {
        Ok(Self { nlp: nlp::init()? })
    }

    /// Look up a job and parse it. A missing job is logged and reported as `None`.
    pub fn parse_job<S: RecordStore + ?Sized>(&self, store: &S, job_id: JobId) -> Option<JobRequirements> {
        match store.get_job(job_id) {
            Ok(Some(job)) => Some(self.parse(&job)),
            Ok(None) => {
                warn!("Job with ID {} not found", job_id);
                None
            }
            Err(e) => {
                error!("Failed to load job {}: {}", job_id, e);
                None
            }
        }
    }

    pub fn parse(&self, job: &JobRecord) -> JobRequirements {
        let education = job
            .education_requirements
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EDUCATION)
            .to_string();

        let requirements = JobRequirements {
            required_skills: parse_skills(job.required_skills.as_deref()),
            preferred_skills: parse_skills(job.preferred_skills.as_deref()),
            min_experience: parse_experience_level(job.experience_level.as_deref()),
            education,
            responsibilities: parse_responsibilities(job.responsibilities.as_deref()),
            keywords: self.extract_keywords(job.description.as_deref()),
        };

        debug!(
            "Parsed job {}: {} required, {} preferred, min {} years, {} keywords",
            job.id,
            requirements.required_skills.len(),
            requirements.preferred_skills.len(),
            requirements.min_experience,
            requirements.keywords.len()
        );

        requirements
    }

    /// Word tokens of the description, lower-cased, minus stopwords.
    pub fn extract_keywords(&self, description: Option<&str>) -> BTreeSet<String> {
        let Some(description) = description else {
            return BTreeSet::new();
        };
        let lower = description.to_lowercase();

        self.nlp
            .word
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|word| !self.nlp.is_stopword(word))
            .map(str::to_string)
            .collect()
    }
}

/// Comma separated skills, trimmed and lower-cased. Blank entries are dropped.
pub fn parse_skills(text: Option<&str>) -> BTreeSet<String> {
    text.unwrap_or_default()
        .split(',')
        .map(|skill| skill.trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

/// Minimum years implied by a seniority label; first matching level wins.
pub fn parse_experience_level(text: Option<&str>) -> u32 {
    let lower = text.unwrap_or_default().to_lowercase();
    if lower.trim().is_empty() {
        return 0;
    }

    EXPERIENCE_LEVELS
        .iter()
        .find(|(label, _)| lower.contains(*label))
        .map(|(_, years)| *years)
        .unwrap_or(0)
}

pub fn parse_responsibilities(text: Option<&str>) -> Vec<String> {
    text.unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn job() -> JobRecord {
        JobRecord {
            id: 1,
            title: "Backend Engineer".to_string(),
            description: Some("We are hiring a Python engineer to build the SQL platform.".to_string()),
            required_skills: Some(" Python , SQL,,Docker ".to_string()),
            preferred_skills: None,
            experience_level: Some("Senior Manager".to_string()),
            education_requirements: None,
            responsibilities: Some("Design services\n\n  Review code  \n".to_string()),
        }
    }

    #[test]
    fn test_parse_skills() {
        let skills = parse_skills(Some(" Python , SQL,,Docker "));
        let expected: BTreeSet<String> = ["python", "sql", "docker"].iter().map(|s| s.to_string()).collect();

        assert_eq!(skills, expected);
        assert!(parse_skills(None).is_empty());
        assert!(parse_skills(Some("")).is_empty());
    }

    #[test]
    fn test_experience_levels() {
        assert_eq!(parse_experience_level(Some("Entry level")), 1);
        assert_eq!(parse_experience_level(Some("JUNIOR")), 2);
        assert_eq!(parse_experience_level(Some("Mid-level")), 3);
        assert_eq!(parse_experience_level(Some("senior")), 5);
        assert_eq!(parse_experience_level(Some("Team Lead")), 7);
        assert_eq!(parse_experience_level(Some("Engineering Manager")), 10);
        // first entry in table order wins
        assert_eq!(parse_experience_level(Some("Senior Manager")), 5);
        assert_eq!(parse_experience_level(Some("Principal")), 0);
        assert_eq!(parse_experience_level(None), 0);
    }

    #[test]
    fn test_parse_responsibilities() {
        let lines = parse_responsibilities(Some("Design services\n\n  Review code  \n"));
        assert_eq!(lines, vec!["Design services".to_string(), "Review code".to_string()]);
    }

    #[test]
    fn test_keywords_drop_stopwords() {
        let parser = RequirementParser::new().unwrap();
        let keywords = parser.extract_keywords(Some("We are hiring a Python engineer to build the SQL platform."));

        assert!(keywords.contains("python"));
        assert!(keywords.contains("sql"));
        assert!(keywords.contains("hiring"));
        assert!(!keywords.contains("we"));
        assert!(!keywords.contains("the"));
        assert!(parser.extract_keywords(None).is_empty());
    }

    #[test]
    fn test_parse_job_defaults() {
        let parser = RequirementParser::new().unwrap();
        let requirements = parser.parse(&job());

        assert_eq!(requirements.min_experience, 5);
        assert_eq!(requirements.education, "Not specified");
        assert_eq!(requirements.required_skills.len(), 3);
        assert!(requirements.preferred_skills.is_empty());
        assert_eq!(requirements.responsibilities.len(), 2);
    }

    #[test]
    fn test_parse_missing_job() {
        let parser = RequirementParser::new().unwrap();
        let store = MemoryStore::new();
        store.insert_job(job()).unwrap();

        assert!(parser.parse_job(&store, 1).is_some());
        assert!(parser.parse_job(&store, 99).is_none());
    }
}
