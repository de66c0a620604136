//! Ranking of every resume submitted for a job

use crate::config::Config;
use crate::error::Result;
use crate::processing::extractor::{CandidateFeatures, FeatureExtractor};
use crate::processing::requirements::{JobRequirements, RequirementParser};
use crate::processing::scoring::{ScoreBreakdown, ScoreCard, ScoringEngine};
use crate::storage::{JobId, RecordStore, ResumeId, ResumeRecord};
use log::{error, info, warn};
use serde::Serialize;

/// One scored resume in a ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub resume_id: ResumeId,
    pub features: CandidateFeatures,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    /// The resume record with its freshly persisted score
    pub record: ResumeRecord,
    pub submitter: String,
}

/// Runs extraction and scoring over a job's resumes and persists each score.
///
/// Resumes are processed one at a time: extract, score, save, then the next.
/// A resume that cannot be read is still ranked with empty features. Each
/// ranking run re-reads every file; the text cache only serves lookups made
/// between runs.
pub struct RankingOrchestrator<'s, S: RecordStore + ?Sized> {
    store: &'s S,
    extractor: FeatureExtractor,
    parser: RequirementParser,
    engine: ScoringEngine,
}

impl<'s, S: RecordStore + ?Sized> RankingOrchestrator<'s, S> {
    pub fn new(store: &'s S, config: &Config) -> Result<Self> {
        Ok(Self {
            store,
            extractor: FeatureExtractor::new(&config.extraction)?,
            parser: RequirementParser::new()?,
            engine: ScoringEngine::new(config.scoring.clone())?,
        })
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    pub fn extractor_mut(&mut self) -> &mut FeatureExtractor {
        &mut self.extractor
    }

    /// Requirements for a stored job, or `None` when the job is missing.
    pub fn requirements_for(&self, job_id: JobId) -> Option<JobRequirements> {
        self.parser.parse_job(self.store, job_id)
    }

    /// Extract and score a single resume without persisting anything.
    pub async fn score_resume(
        &mut self,
        resume: &ResumeRecord,
        requirements: &JobRequirements,
    ) -> (CandidateFeatures, ScoreCard) {
        let features = self.extractor.extract(&resume.file_path).await;
        let card = self.engine.score(&features, requirements);
        (features, card)
    }

    /// Rank all resumes for a job, highest score first.
    ///
    /// Returns an empty ranking when the job is missing or has no description.
    /// Ties keep the order in which the store listed the resumes.
    pub async fn rank_for_job(&mut self, job_id: JobId) -> Vec<RankedResult> {
        let job = match self.store.get_job(job_id) {
            Ok(Some(job)) => job,
            Ok(None) => {
                warn!("Job with ID {} not found", job_id);
                return Vec::new();
            }
            Err(e) => {
                error!("Failed to load job {}: {}", job_id, e);
                return Vec::new();
            }
        };

        if !job.has_description() {
            warn!("Job {} has no description text, cannot rank", job_id);
            return Vec::new();
        }

        let requirements = self.parser.parse(&job);

        let resumes = match self.store.list_resumes_for_job(job_id) {
            Ok(resumes) => resumes,
            Err(e) => {
                error!("Failed to list resumes for job {}: {}", job_id, e);
                return Vec::new();
            }
        };

        info!("Ranking {} resumes for job {} ({})", resumes.len(), job_id, job.title);

        // Resumes may have been replaced on disk since the last run
        self.extractor.clear_cache();

        let mut ranked = Vec::with_capacity(resumes.len());
        for mut resume in resumes {
            let (features, card) = self.score_resume(&resume, &requirements).await;

            match self.store.save_resume_score(resume.id, card.total) {
                Ok(()) => resume.score = card.total,
                Err(e) => warn!("Failed to save score for resume {}: {}", resume.id, e),
            }

            ranked.push(RankedResult {
                resume_id: resume.id,
                submitter: resume.submitter().to_string(),
                features,
                total_score: card.total,
                breakdown: card.breakdown,
                record: resume,
            });
        }

        ranked.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
        ranked
    }
}

/// 1-based position of a resume in a ranking
pub fn rank_position(ranking: &[RankedResult], resume_id: ResumeId) -> Option<usize> {
    ranking
        .iter()
        .position(|result| result.resume_id == resume_id)
        .map(|idx| idx + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JobRecord, MemoryStore};

    fn job(description: Option<&str>) -> JobRecord {
        JobRecord {
            title: "Platform Engineer".to_string(),
            description: description.map(str::to_string),
            required_skills: Some("python,kubernetes".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_job_ranks_nothing() {
        let store = MemoryStore::new();
        let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();

        assert!(orchestrator.rank_for_job(7).await.is_empty());
        assert!(orchestrator.requirements_for(7).is_none());
    }

    #[tokio::test]
    async fn test_job_without_description_ranks_nothing() {
        let store = MemoryStore::new();
        let job_id = store.insert_job(job(Some("   "))).unwrap();
        store.insert_resume(ResumeRecord::new(Some(job_id), "cv.txt", None)).unwrap();
        let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();

        assert!(orchestrator.rank_for_job(job_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_resume_is_still_ranked() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        std::fs::write(&good, "Python and Kubernetes operator").unwrap();

        let store = MemoryStore::new();
        let job_id = store.insert_job(job(Some("python kubernetes platform"))).unwrap();
        let missing_id = store
            .insert_resume(ResumeRecord::new(Some(job_id), dir.path().join("gone.pdf"), None))
            .unwrap();
        let good_id = store
            .insert_resume(ResumeRecord::new(Some(job_id), &good, Some("grace".into())))
            .unwrap();

        let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
        let ranking = orchestrator.rank_for_job(job_id).await;

        assert_eq!(ranking.len(), 2);
        assert_eq!(rank_position(&ranking, good_id), Some(1));
        assert_eq!(rank_position(&ranking, missing_id), Some(2));
        assert_eq!(ranking[0].submitter, "grace");
        assert_eq!(ranking[0].total_score, 30.0);
        assert_eq!(ranking[1].features, CandidateFeatures::default());
        assert_eq!(ranking[1].total_score, 0.0);
        assert_eq!(rank_position(&ranking, 404), None);
    }
}
