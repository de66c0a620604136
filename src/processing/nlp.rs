//! Process-wide NLP resources
//!
//! Stopword lists, the skill matcher and every extraction pattern are built
//! once and shared. Call [`init`] at startup so a broken resource surfaces
//! before any document is processed; later calls return the same instance.

use crate::error::{RankerError, Result};
use crate::processing::vocabulary::{
    ACTION_VERBS, ENGLISH_STOPWORDS, PREDEFINED_SKILLS, TFIDF_STOPWORDS,
};
use aho_corasick::AhoCorasick;
use log::debug;
use once_cell::sync::OnceCell;
use regex::{Regex, RegexSet};
use std::collections::HashSet;

static RESOURCES: OnceCell<NlpResources> = OnceCell::new();

pub struct NlpResources {
    pub stopwords: HashSet<&'static str>,
    pub tfidf_stopwords: HashSet<&'static str>,
    pub skill_terms: &'static [&'static str],
    pub skill_patterns: RegexSet,
    pub action_verbs: AhoCorasick,
    pub experience: ExperiencePatterns,
    pub education: EducationPatterns,
    pub paragraph_break: Regex,
    pub whitespace: Regex,
    pub word: Regex,
    pub tfidf_token: Regex,
}

pub struct ExperiencePatterns {
    /// "5 years of experience", "3 yrs of experience"
    pub years_of: Regex,
    /// "2015 - 2019"
    pub year_range: Regex,
    /// "worked as engineer"
    pub worked_as: Regex,
    /// "2 year experience"
    pub year_experience: Regex,
}

pub struct EducationPatterns {
    /// Bare degree keywords, reported title-cased
    pub degrees: Vec<Regex>,
    pub year_range: Regex,
    /// "<words> university|college|institute|academy"
    pub institution: Regex,
}

/// Build the shared resources if needed and return them.
pub fn init() -> Result<&'static NlpResources> {
    RESOURCES.get_or_try_init(|| {
        debug!("Initializing NLP resources");
        NlpResources::build()
    })
}

/// Whether [`init`] has already completed successfully
pub fn is_initialized() -> bool {
    RESOURCES.get().is_some()
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| RankerError::Initialization(format!("bad pattern {:?}: {}", pattern, e)))
}

impl NlpResources {
    fn build() -> Result<Self> {
        let skill_patterns = RegexSet::new(
            PREDEFINED_SKILLS
                .iter()
                .map(|skill| format!(r"\b{}\b", regex::escape(skill))),
        )
        .map_err(|e| RankerError::Initialization(format!("skill patterns: {}", e)))?;

        let action_verbs = AhoCorasick::new(ACTION_VERBS)
            .map_err(|e| RankerError::Initialization(format!("action verbs: {}", e)))?;

        let experience = ExperiencePatterns {
            years_of: compile(r"\b([0-9]+)\s*(?:years?|yrs?|y)\s*of\s*experience\b")?,
            year_range: compile(r"\b([0-9]{4})\s*-\s*([0-9]{4})\b")?,
            worked_as: compile(r"\bworked\s*as\s*(\w+)\b")?,
            year_experience: compile(r"\b([0-9]+)\s*year\s*experience\b")?,
        };

        let education = EducationPatterns {
            degrees: vec![
                compile(r"\b(bachelor's|bachelor)\s*degree\b")?,
                compile(r"\b(master's|master)\s*degree\b")?,
                compile(r"\b(phd)\b")?,
                compile(r"\b(doctorate)\b")?,
            ],
            year_range: compile(r"\b([0-9]{4})\s*-*\s*([0-9]{4})\b")?,
            institution: compile(r"\b([a-z\s]+)\s*(university|college|institute|academy)\b")?,
        };

        Ok(Self {
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
            tfidf_stopwords: TFIDF_STOPWORDS.iter().copied().collect(),
            skill_terms: PREDEFINED_SKILLS,
            skill_patterns,
            action_verbs,
            experience,
            education,
            paragraph_break: compile(r"\n{2,}")?,
            whitespace: compile(r"\s+")?,
            word: compile(r"\w+")?,
            tfidf_token: compile(r"\b\w\w+\b")?,
        })
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }
}
