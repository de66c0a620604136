//! Configuration management for the resume ranker

use crate::error::{RankerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub extraction: ExtractionConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
}

/// Category weights used by the scoring engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub required_skills_weight: f64,
    pub preferred_skills_weight: f64,
    /// Points per year of experience above the job minimum
    pub experience_per_year: f64,
    /// Flat experience score for candidates below the job minimum
    pub experience_floor: f64,
    pub education_weight: f64,
    pub job_description_weight: f64,
    pub projects_weight: f64,
    /// Separator placed between job keywords when they are concatenated
    /// into the similarity document
    pub keyword_joiner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Exclusive lower bound on a cleaned project paragraph, in characters
    pub min_project_chars: usize,
    /// Exclusive upper bound on a cleaned project paragraph, in characters
    pub max_project_chars: usize,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub records_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_skills_weight: 30.0,
            preferred_skills_weight: 20.0,
            experience_per_year: 5.0,
            experience_floor: 10.0,
            education_weight: 10.0,
            job_description_weight: 25.0,
            projects_weight: 15.0,
            keyword_joiner: String::new(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_project_chars: 10,
            max_project_chars: 1000,
            enable_cache: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let records_path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("records.json");

        Self { records_path }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            extraction: ExtractionConfig::default(),
            storage: StorageConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the default location.
    ///
    /// An explicit path must exist. The default location is populated with
    /// defaults on first use.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(RankerError::Configuration(format!(
                        "Config file does not exist: {}",
                        path.display()
                    )));
                }
                Self::read(path)
            }
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::read(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| RankerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RankerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overwrite the default config file with defaults
    pub fn reset() -> Result<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }
}
