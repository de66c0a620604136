//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Score and rank resumes against job requirements")]
#[command(long_about = "Extract skills, experience, education and projects from resumes, score them against a job posting and rank every resume submitted for the job")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Record store path (overrides the configured one)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank every resume submitted for a job and persist their scores
    Rank {
        /// Job ID
        #[arg(short, long)]
        job: u64,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show the per-category breakdown for each resume
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show the score breakdown and rank of a stored resume
    Score {
        /// Resume ID
        #[arg(short, long)]
        resume: u64,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Score a resume file against a job without storing anything
    Analyze {
        /// Job ID
        #[arg(short, long)]
        job: u64,

        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        file: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the features extracted from a resume file as JSON
    Extract {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Job records
    Jobs {
        #[command(subcommand)]
        action: JobAction,
    },

    /// Resume records
    Resumes {
        #[command(subcommand)]
        action: ResumeAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum JobAction {
    /// Add a job from a TOML file
    Add {
        /// TOML file with title, description, required_skills, ...
        file: PathBuf,
    },

    /// List stored jobs
    List,
}

#[derive(Subcommand)]
pub enum ResumeAction {
    /// Submit a resume file for a job
    Add {
        /// Job ID
        #[arg(short, long)]
        job: u64,

        /// Path to resume file (PDF, TXT, MD)
        file: PathBuf,

        /// Submitter name
        #[arg(long)]
        owner: Option<String>,
    },

    /// List resumes submitted for a job
    List {
        /// Job ID
        #[arg(short, long)]
        job: u64,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
