//! Job and resume records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub type JobId = u64;
pub type ResumeId = u64;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma separated
    #[serde(default)]
    pub required_skills: Option<String>,
    /// Comma separated
    #[serde(default)]
    pub preferred_skills: Option<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub education_requirements: Option<String>,
    /// One responsibility per line
    #[serde(default)]
    pub responsibilities: Option<String>,
}

impl JobRecord {
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub id: ResumeId,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub job_id: Option<JobId>,
    pub file_path: PathBuf,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub score: f64,
}

impl ResumeRecord {
    pub fn new(job_id: Option<JobId>, file_path: impl Into<PathBuf>, owner: Option<String>) -> Self {
        Self {
            id: 0,
            owner,
            job_id,
            file_path: file_path.into(),
            uploaded_at: Utc::now(),
            score: 0.0,
        }
    }

    pub fn submitter(&self) -> &str {
        self.owner.as_deref().unwrap_or("anonymous")
    }
}
