//! Lexical extraction of candidate features from resume text
//!
//! Every extractor here is a best-effort heuristic. Unreadable documents
//! produce empty features rather than errors so one bad upload never stops
//! a ranking run.

use crate::config::ExtractionConfig;
use crate::error::{RankerError, Result};
use crate::input::manager::InputManager;
use crate::input::text_extractor::PdfExtractor;
use crate::processing::nlp::{self, NlpResources};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Structured facts pulled out of one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFeatures {
    pub full_text: String,
    /// Largest single value found by any experience pattern
    pub experience_years: u32,
    pub education: Vec<String>,
    pub skills: BTreeSet<String>,
    pub projects: BTreeSet<String>,
}

impl CandidateFeatures {
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

pub struct FeatureExtractor {
    nlp: &'static NlpResources,
    input: InputManager,
    min_project_chars: usize,
    max_project_chars: usize,
}

impl FeatureExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            nlp: nlp::init()?,
            input: InputManager::new().with_cache(config.enable_cache),
            min_project_chars: config.min_project_chars,
            max_project_chars: config.max_project_chars,
        })
    }

    /// Extract features from a resume file. Never fails: unreadable files
    /// are logged and yield default features.
    pub async fn extract(&mut self, path: &Path) -> CandidateFeatures {
        self.try_extract(path).await.unwrap_or_else(|e| {
            warn!("{}", e);
            CandidateFeatures::default()
        })
    }

    /// Fallible form of [`extract`](Self::extract). Read and parse errors are
    /// reported as [`RankerError::ExtractionFailure`] naming the file.
    pub async fn try_extract(&mut self, path: &Path) -> Result<CandidateFeatures> {
        let text = self.input.extract_text(path).await.map_err(|e| {
            RankerError::ExtractionFailure(format!("{}: {}", path.display(), e))
        })?;
        Ok(self.extract_from_text(&text))
    }

    /// Extract features from raw PDF bytes, with the same fallback as [`extract`](Self::extract).
    pub async fn extract_pdf_bytes(&self, bytes: Vec<u8>) -> CandidateFeatures {
        self.try_extract_pdf_bytes(bytes).await.unwrap_or_else(|e| {
            warn!("{}", e);
            CandidateFeatures::default()
        })
    }

    pub async fn try_extract_pdf_bytes(&self, bytes: Vec<u8>) -> Result<CandidateFeatures> {
        let text = PdfExtractor
            .extract_bytes(bytes)
            .await
            .map_err(|e| RankerError::ExtractionFailure(format!("in-memory PDF: {}", e)))?;
        Ok(self.extract_from_text(&text))
    }

    /// Forget cached document text so the next read sees the file as it is now.
    pub fn clear_cache(&mut self) {
        debug!("Dropping {} cached documents", self.input.cache_size());
        self.input.clear_cache();
    }

    pub fn extract_from_text(&self, text: &str) -> CandidateFeatures {
        let features = CandidateFeatures {
            full_text: text.to_string(),
            experience_years: self.extract_experience(text),
            education: self.extract_education(text),
            skills: self.extract_skills(text),
            projects: self.extract_projects(text),
        };

        debug!(
            "Extracted {} skills, {} projects, {} education entries, {} years",
            features.skills.len(),
            features.projects.len(),
            features.education.len(),
            features.experience_years
        );

        features
    }

    /// Years of experience: the maximum over all pattern hits, never a sum.
    pub fn extract_experience(&self, text: &str) -> u32 {
        let lower = text.to_lowercase();
        let patterns = &self.nlp.experience;
        let mut years = 0;

        let explicit = patterns
            .years_of
            .captures_iter(&lower)
            .chain(patterns.year_experience.captures_iter(&lower));
        for caps in explicit {
            if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) {
                years = years.max(n);
            }
        }

        for caps in patterns.year_range.captures_iter(&lower) {
            let start = caps[1].parse::<u32>().ok();
            let end = caps[2].parse::<u32>().ok();
            if let (Some(start), Some(end)) = (start, end) {
                if end > start {
                    years = years.max(end - start);
                }
            }
        }

        // Role mentions only signal experience; they carry no number.
        if let Some(caps) = patterns.worked_as.captures(&lower) {
            debug!("Found role mention: worked as {}", &caps[1]);
        }

        years
    }

    /// Education entries in pattern order. Duplicates are kept.
    ///
    /// Degrees are title-cased one whitespace word at a time, so an
    /// apostrophe does not start a new word (`Bachelor's`). A year span is a
    /// single date range, not a degree and institution pair, so it is written
    /// `2016-2023` rather than through the `<words> at <institution>` form.
    pub fn extract_education(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let patterns = &self.nlp.education;
        let mut entries = Vec::new();

        for degree in &patterns.degrees {
            for caps in degree.captures_iter(&lower) {
                entries.push(title_case(&caps[1]));
            }
        }

        for caps in patterns.year_range.captures_iter(&lower) {
            entries.push(format!("{}-{}", &caps[1], &caps[2]));
        }

        for caps in patterns.institution.captures_iter(&lower) {
            let words = self.nlp.whitespace.replace_all(&caps[1], " ");
            let words = words.trim();
            if words.is_empty() {
                continue;
            }
            entries.push(format!("{} at {}", title_case(words), capitalize(&caps[2])));
        }

        entries
    }

    /// Vocabulary terms present in the text on word boundaries.
    pub fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase();

        self.nlp
            .skill_patterns
            .matches(&lower)
            .into_iter()
            .map(|idx| self.nlp.skill_terms[idx].to_string())
            .collect()
    }

    /// Blank-line separated paragraphs that mention an action verb and fall
    /// strictly inside the configured length bounds once whitespace is collapsed.
    pub fn extract_projects(&self, text: &str) -> BTreeSet<String> {
        let lower = text.to_lowercase().replace("\r\n", "\n");

        self.nlp
            .paragraph_break
            .split(&lower)
            .filter(|para| self.nlp.action_verbs.is_match(para))
            .map(|para| self.nlp.whitespace.replace_all(para, " ").trim().to_string())
            .filter(|para| {
                let len = para.chars().count();
                len > self.min_project_chars && len < self.max_project_chars
            })
            .collect()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}
