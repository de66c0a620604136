//! Resume ranker: score and rank resumes against job requirements

use anyhow::{anyhow, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction, JobAction, ResumeAction};
use resume_ranker::config::{Config, OutputFormat};
use resume_ranker::output::formatter::suggest_filename;
use resume_ranker::output::{save_report_to_file, RankingReport, ReportGenerator, ScoreReport};
use resume_ranker::processing::nlp;
use resume_ranker::storage::{JobRecord, JsonFileStore, RecordStore, ResumeRecord};
use resume_ranker::{FeatureExtractor, RankerError, RankingOrchestrator, ScoreCard};
use std::path::Path;
use std::process;
use std::time::Duration;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // NLP resources must be usable before any document is touched.
    if let Err(e) = nlp::init() {
        error!("Failed to initialize NLP resources: {}", e);
        process::exit(1);
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let store_path = cli
        .store
        .clone()
        .unwrap_or_else(|| config.storage.records_path.clone());

    if let Err(e) = run_command(cli.command, config, &store_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, store_path: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Rank { job, output, detailed, save } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let store = open_store(store_path)?;
            let job_record = load_job(&store, job)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
            spinner.set_message(format!("Ranking resumes for '{}'", job_record.title));
            spinner.enable_steady_tick(Duration::from_millis(120));

            let mut orchestrator = RankingOrchestrator::new(&store, &config)?;
            let ranking = orchestrator.rank_for_job(job).await;
            spinner.finish_and_clear();

            info!("Ranked {} resumes for job {}", ranking.len(), job);

            let report = RankingReport::from_ranking(&job_record, &ranking);
            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
            );
            let content = generator.generate_ranking(&report, &format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&format, job, true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Score { resume, output } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let store = open_store(store_path)?;
            let resume_record = store
                .get_resume(resume)?
                .ok_or_else(|| RankerError::resume_not_found(resume))?;
            let job_id = resume_record
                .job_id
                .ok_or_else(|| anyhow!("resume {} was not submitted for a job", resume))?;
            let job_record = load_job(&store, job_id)?;

            let mut orchestrator = RankingOrchestrator::new(&store, &config)?;
            let ranking = orchestrator.rank_for_job(job_id).await;
            let file_path = resume_record.file_path.display().to_string();

            let report = match ranking.iter().find(|result| result.resume_id == resume) {
                Some(result) => {
                    let card = ScoreCard {
                        total: result.total_score,
                        breakdown: result.breakdown,
                    };
                    ScoreReport::new(&job_record, &file_path, &result.features, &card)
                }
                None => {
                    let requirements = orchestrator.requirements_for(job_id);
                    let features = orchestrator.extractor_mut().extract(&resume_record.file_path).await;
                    let card = orchestrator.engine().score_one(Some(&features), requirements.as_ref());
                    ScoreReport::new(&job_record, &file_path, &features, &card)
                }
            }
            .with_ranking(resume, &ranking);

            let generator = ReportGenerator::with_options(config.output.color_output, true);
            println!("{}", generator.generate_score(&report, &format)?);
        }

        Commands::Analyze { job, file, output } => {
            cli::validate_file_extension(&file, RESUME_EXTENSIONS).map_err(anyhow::Error::msg)?;
            let format = resolve_format(output.as_deref(), &config)?;
            let store = open_store(store_path)?;
            let job_record = load_job(&store, job)?;

            let mut orchestrator = RankingOrchestrator::new(&store, &config)?;
            let requirements = orchestrator.requirements_for(job);
            let features = orchestrator.extractor_mut().extract(&file).await;
            let card = orchestrator.engine().score_one(Some(&features), requirements.as_ref());

            let report = ScoreReport::new(&job_record, &file.display().to_string(), &features, &card);
            let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed);
            println!("{}", generator.generate_score(&report, &format)?);
        }

        Commands::Extract { file } => {
            cli::validate_file_extension(&file, RESUME_EXTENSIONS).map_err(anyhow::Error::msg)?;
            let mut extractor = FeatureExtractor::new(&config.extraction)?;
            let features = extractor.extract(&file).await;
            println!("{}", serde_json::to_string_pretty(&features)?);
        }

        Commands::Jobs { action } => {
            let store = open_store(store_path)?;
            match action {
                JobAction::Add { file } => {
                    let content = std::fs::read_to_string(&file)
                        .with_context(|| format!("reading job file {}", file.display()))?;
                    let job: JobRecord = toml::from_str(&content)
                        .with_context(|| format!("parsing job file {}", file.display()))?;
                    let id = store.insert_job(job)?;
                    println!("Added job {}", id);
                }
                JobAction::List => {
                    for job in store.list_jobs()? {
                        let level = job.experience_level.as_deref().unwrap_or("-");
                        println!("{:>5}  {:<40} {}", job.id, job.title, level);
                    }
                }
            }
        }

        Commands::Resumes { action } => {
            let store = open_store(store_path)?;
            match action {
                ResumeAction::Add { job, file, owner } => {
                    cli::validate_file_extension(&file, RESUME_EXTENSIONS).map_err(anyhow::Error::msg)?;
                    load_job(&store, job)?;
                    let path = std::fs::canonicalize(&file)
                        .with_context(|| format!("resolving resume file {}", file.display()))?;
                    let id = store.insert_resume(ResumeRecord::new(Some(job), path, owner))?;
                    println!("Added resume {} for job {}", id, job);
                }
                ResumeAction::List { job } => {
                    for resume in store.list_resumes_for_job(job)? {
                        println!(
                            "{:>5}  {:>8.2}  {:<20} {}",
                            resume.id,
                            resume.score,
                            resume.submitter(),
                            resume.file_path.display()
                        );
                    }
                }
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Reset => {
                Config::reset()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn resolve_format(output: Option<&str>, config: &Config) -> anyhow::Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format.clone()),
    }
}

fn open_store(path: &Path) -> anyhow::Result<JsonFileStore> {
    JsonFileStore::open(path).with_context(|| format!("opening record store {}", path.display()))
}

fn load_job(store: &JsonFileStore, job_id: u64) -> anyhow::Result<JobRecord> {
    Ok(store
        .get_job(job_id)?
        .ok_or_else(|| RankerError::job_not_found(job_id))?)
}
