//! Resume ranker library
//!
//! Extracts candidate features from resumes, parses job postings into
//! structured requirements, scores the two against each other and ranks
//! every resume submitted for a job.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod storage;

pub use config::Config;
pub use error::{RankerError, Result};
pub use processing::extractor::{CandidateFeatures, FeatureExtractor};
pub use processing::ranking::{rank_position, RankedResult, RankingOrchestrator};
pub use processing::requirements::JobRequirements;
pub use processing::scoring::{ScoreBreakdown, ScoreCard, ScoringEngine};
pub use storage::{JobRecord, MemoryStore, RecordStore, ResumeRecord};
