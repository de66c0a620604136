//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("NLP resource initialization failed: {0}")]
    Initialization(String),
}

pub type Result<T> = std::result::Result<T, RankerError>;

impl RankerError {
    /// Shorthand for a missing job record
    pub fn job_not_found(job_id: u64) -> Self {
        RankerError::NotFound(format!("job {}", job_id))
    }

    /// Shorthand for a missing resume record
    pub fn resume_not_found(resume_id: u64) -> Self {
        RankerError::NotFound(format!("resume {}", resume_id))
    }
}
