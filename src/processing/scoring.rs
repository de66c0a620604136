//! Weighted multi-factor scoring of candidate features against job requirements

use crate::config::ScoringConfig;
use crate::error::{RankerError, Result};
use crate::processing::extractor::CandidateFeatures;
use crate::processing::nlp::{self, NlpResources};
use crate::processing::requirements::JobRequirements;
use crate::processing::similarity::TfIdfSimilarity;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-category subscores. Field names are the category names shown to users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub required_skills: f64,
    pub preferred_skill: f64,
    pub experience: f64,
    pub education: f64,
    pub job_description: f64,
    pub projects: f64,
}

impl ScoreBreakdown {
    pub const CATEGORIES: [&'static str; 6] = [
        "required_skills",
        "preferred_skill",
        "experience",
        "education",
        "job_description",
        "projects",
    ];

    /// Category name and value pairs in display order
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            (Self::CATEGORIES[0], self.required_skills),
            (Self::CATEGORIES[1], self.preferred_skill),
            (Self::CATEGORIES[2], self.experience),
            (Self::CATEGORIES[3], self.education),
            (Self::CATEGORIES[4], self.job_description),
            (Self::CATEGORIES[5], self.projects),
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, value)| value).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

impl ScoreCard {
    pub fn zero() -> Self {
        Self::default()
    }

    fn from_breakdown(breakdown: ScoreBreakdown) -> Self {
        Self {
            total: breakdown.total(),
            breakdown,
        }
    }
}

pub struct ScoringEngine {
    config: ScoringConfig,
    nlp: &'static NlpResources,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self> {
        Ok(Self {
            config,
            nlp: nlp::init()?,
        })
    }

    /// Entry point for callers that may hold absent inputs. Missing or
    /// unusable inputs produce a zero score card, never an error.
    pub fn score_one(
        &self,
        features: Option<&CandidateFeatures>,
        requirements: Option<&JobRequirements>,
    ) -> ScoreCard {
        self.checked_score(features, requirements).unwrap_or_else(|e| {
            warn!("Scoring skipped: {}", e);
            ScoreCard::zero()
        })
    }

    /// Same as [`score`](Self::score), returning a zero card on malformed input.
    pub fn score(&self, features: &CandidateFeatures, requirements: &JobRequirements) -> ScoreCard {
        self.score_one(Some(features), Some(requirements))
    }

    /// Absent inputs and non-finite subscores are [`RankerError::MalformedInput`].
    pub fn checked_score(
        &self,
        features: Option<&CandidateFeatures>,
        requirements: Option<&JobRequirements>,
    ) -> Result<ScoreCard> {
        let (features, requirements) = match (features, requirements) {
            (Some(features), Some(requirements)) => (features, requirements),
            (None, _) => return Err(RankerError::MalformedInput("candidate features missing".to_string())),
            (_, None) => return Err(RankerError::MalformedInput("job requirements missing".to_string())),
        };

        let candidate_skills: BTreeSet<String> =
            features.skills.iter().map(|s| s.to_lowercase()).collect();

        let breakdown = ScoreBreakdown {
            required_skills: skill_score(
                &candidate_skills,
                &requirements.required_skills,
                self.config.required_skills_weight,
            ),
            preferred_skill: skill_score(
                &candidate_skills,
                &requirements.preferred_skills,
                self.config.preferred_skills_weight,
            ),
            experience: self.experience_score(features.experience_years, requirements.min_experience),
            education: self.education_score(&features.education, &requirements.education),
            job_description: self.job_description_score(&features.full_text, &requirements.keywords),
            projects: self.project_score(&features.projects, &requirements.keywords),
        };

        if let Some((category, value)) = breakdown.entries().into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(RankerError::MalformedInput(format!(
                "non-finite {} subscore ({})",
                category, value
            )));
        }

        let card = ScoreCard::from_breakdown(breakdown);
        debug!("Scored candidate: total {:.2} ({:?})", card.total, card.breakdown);
        Ok(card)
    }

    /// Surplus years earn points linearly; any shortfall gets the flat floor.
    fn experience_score(&self, years: u32, min_years: u32) -> f64 {
        if years >= min_years {
            f64::from(years - min_years) * self.config.experience_per_year
        } else {
            self.config.experience_floor
        }
    }

    fn education_score(&self, entries: &[String], required: &str) -> f64 {
        let required = required.to_lowercase();
        let matched = entries.iter().any(|entry| entry.to_lowercase().contains(&required));

        if matched {
            self.config.education_weight
        } else {
            0.0
        }
    }

    fn job_description_score(&self, resume_text: &str, keywords: &BTreeSet<String>) -> f64 {
        let keyword_document = keywords
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(&self.config.keyword_joiner);

        let similarity = TfIdfSimilarity::new(self.nlp).similarity(resume_text, &keyword_document);
        similarity * self.config.job_description_weight
    }

    /// Share of job keywords found in any project paragraph; each keyword counts once.
    fn project_score(&self, projects: &BTreeSet<String>, keywords: &BTreeSet<String>) -> f64 {
        let projects: Vec<String> = projects.iter().map(|p| p.to_lowercase()).collect();

        let matched = keywords
            .iter()
            .filter(|keyword| projects.iter().any(|project| project.contains(keyword.as_str())))
            .count();

        ratio(matched, keywords.len()) * self.config.projects_weight
    }
}

fn skill_score(candidate: &BTreeSet<String>, wanted: &BTreeSet<String>, weight: f64) -> f64 {
    let matched = wanted
        .iter()
        .filter(|skill| candidate.contains(&skill.to_lowercase()))
        .count();

    ratio(matched, wanted.len()) * weight
}

/// `matched / max(1, total)`
fn ratio(matched: usize, total: usize) -> f64 {
    matched as f64 / total.max(1) as f64
}
