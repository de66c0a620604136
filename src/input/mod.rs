//! Input processing module
//! Handles file detection and raw text extraction from resumes

pub mod file_detector;
pub mod manager;
pub mod text_extractor;

pub use manager::InputManager;
