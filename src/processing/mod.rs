//! Resume analysis and scoring pipeline

pub mod extractor;
pub mod nlp;
pub mod ranking;
pub mod requirements;
pub mod scoring;
pub mod similarity;
pub mod vocabulary;
