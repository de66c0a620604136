//! Report structures handed to the formatters

use crate::processing::extractor::CandidateFeatures;
use crate::processing::ranking::{rank_position, RankedResult};
use crate::processing::scoring::{ScoreBreakdown, ScoreCard};
use crate::storage::{JobId, JobRecord, ResumeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ranking of all resumes for one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub job_id: JobId,
    pub job_title: String,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based
    pub rank: usize,
    pub resume_id: ResumeId,
    pub submitter: String,
    pub file_path: String,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub experience_years: u32,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub project_count: usize,
}

/// Score of a single resume, optionally placed within its job's ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub job_id: JobId,
    pub job_title: String,
    pub resume_id: Option<ResumeId>,
    pub file_path: String,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub rank: Option<usize>,
    pub ranked_count: usize,
    pub experience_years: u32,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub projects: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl RankingReport {
    pub fn from_ranking(job: &JobRecord, ranking: &[RankedResult]) -> Self {
        let entries = ranking
            .iter()
            .enumerate()
            .map(|(idx, result)| RankingEntry {
                rank: idx + 1,
                resume_id: result.resume_id,
                submitter: result.submitter.clone(),
                file_path: result.record.file_path.display().to_string(),
                total_score: result.total_score,
                breakdown: result.breakdown,
                experience_years: result.features.experience_years,
                skills: result.features.skills.iter().cloned().collect(),
                education: result.features.education.clone(),
                project_count: result.features.projects.len(),
            })
            .collect();

        Self {
            job_id: job.id,
            job_title: job.title.clone(),
            generated_at: Utc::now(),
            entries,
        }
    }
}

impl ScoreReport {
    pub fn new(job: &JobRecord, file_path: &str, features: &CandidateFeatures, card: &ScoreCard) -> Self {
        Self {
            job_id: job.id,
            job_title: job.title.clone(),
            resume_id: None,
            file_path: file_path.to_string(),
            total_score: card.total,
            breakdown: card.breakdown,
            rank: None,
            ranked_count: 0,
            experience_years: features.experience_years,
            skills: features.skills.iter().cloned().collect(),
            education: features.education.clone(),
            projects: features.projects.iter().cloned().collect(),
            generated_at: Utc::now(),
        }
    }

    /// Attach the resume's place in a ranking of its job
    pub fn with_ranking(mut self, resume_id: ResumeId, ranking: &[RankedResult]) -> Self {
        self.resume_id = Some(resume_id);
        self.rank = rank_position(ranking, resume_id);
        self.ranked_count = ranking.len();
        self
    }
}
