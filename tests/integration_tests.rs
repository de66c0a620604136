//! Integration tests for the resume ranker

use resume_ranker::config::{Config, ScoringConfig};
use resume_ranker::input::manager::InputManager;
use resume_ranker::storage::{JobRecord, JsonFileStore, MemoryStore, RecordStore, ResumeRecord};
use resume_ranker::{rank_position, CandidateFeatures, FeatureExtractor, RankingOrchestrator, ScoringEngine};
use std::path::{Path, PathBuf};

fn write_resume(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn sample_job() -> JobRecord {
    let content = std::fs::read_to_string("tests/fixtures/sample_job.toml").unwrap();
    toml::from_str(&content).unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Backend Engineer"));
    assert!(text.contains("Kubernetes"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Kubernetes"));
    // Markdown syntax is stripped
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_sample_resume_features() {
    let mut extractor = FeatureExtractor::new(&Config::default().extraction).unwrap();
    let features = extractor.extract(Path::new("tests/fixtures/sample_resume.txt")).await;

    assert_eq!(features.experience_years, 7);
    for skill in ["python", "sql", "kubernetes", "react", "postgresql"] {
        assert!(features.skills.contains(skill), "missing skill {}", skill);
    }
    assert!(features.education.contains(&"Bachelor's".to_string()));
    assert!(features.education.contains(&"2016-2023".to_string()));
    assert_eq!(features.projects.len(), 2);
    assert!(features.projects.iter().all(|p| p == &p.to_lowercase()));
}

#[tokio::test]
async fn test_pdf_pages_joined_without_separator() {
    let mut extractor = FeatureExtractor::new(&Config::default().extraction).unwrap();
    let features = extractor.extract(Path::new("tests/fixtures/two_page.pdf")).await;

    // Page one ends with "experience", page two starts with "Skilled"
    assert!(features.full_text.contains("experienceSkilled"));
    assert!(features.full_text.find("Python") < features.full_text.find("Docker"));
    assert_eq!(features.experience_years, 6);
    let skills: Vec<&str> = features.skills.iter().map(String::as_str).collect();
    assert_eq!(skills, vec!["docker", "python", "sql"]);
}

#[tokio::test]
async fn test_pdf_bytes_match_path_extraction() {
    let path = Path::new("tests/fixtures/two_page.pdf");
    let mut extractor = FeatureExtractor::new(&Config::default().extraction).unwrap();

    let from_path = extractor.extract(path).await;
    let from_bytes = extractor.extract_pdf_bytes(std::fs::read(path).unwrap()).await;

    assert!(!from_bytes.is_empty());
    assert_eq!(from_bytes, from_path);
}

#[tokio::test]
async fn test_garbage_pdf_bytes_give_default_features() {
    let extractor = FeatureExtractor::new(&Config::default().extraction).unwrap();
    let features = extractor.extract_pdf_bytes(b"not a pdf at all".to_vec()).await;

    assert_eq!(features, CandidateFeatures::default());
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree_on_skills() {
    let mut extractor = FeatureExtractor::new(&Config::default().extraction).unwrap();
    let from_txt = extractor.extract(Path::new("tests/fixtures/sample_resume.txt")).await;
    let from_md = extractor.extract(Path::new("tests/fixtures/sample_resume.md")).await;

    assert_eq!(from_txt.experience_years, from_md.experience_years);
    assert!(from_md.skills.is_subset(&from_txt.skills));
}

#[tokio::test]
async fn test_sample_resume_against_sample_job() {
    let store = MemoryStore::new();
    let job_id = store.insert_job(sample_job()).unwrap();
    let resume_id = store
        .insert_resume(ResumeRecord::new(
            Some(job_id),
            "tests/fixtures/sample_resume.txt",
            Some("jane".to_string()),
        ))
        .unwrap();

    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
    let ranking = orchestrator.rank_for_job(job_id).await;

    assert_eq!(ranking.len(), 1);
    let result = &ranking[0];
    assert_eq!(result.resume_id, resume_id);
    assert_eq!(result.breakdown.required_skills, 30.0);
    assert_eq!(result.breakdown.preferred_skill, 0.0);
    assert_eq!(result.breakdown.experience, 10.0);
    assert_eq!(result.breakdown.education, 10.0);
    assert!(result.breakdown.projects > 0.0);
    assert!((result.total_score - result.breakdown.total()).abs() < 1e-9);
    assert_eq!(result.submitter, "jane");
}

#[tokio::test]
async fn test_end_to_end_single_resume() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_resume(
        dir.path(),
        "jane.txt",
        "Jane Roe\nPython and SQL specialist with 6 years of experience.",
    );

    let job = JobRecord {
        title: "Data Engineer".to_string(),
        description: Some("python sql engineer".to_string()),
        required_skills: Some("python,sql".to_string()),
        preferred_skills: Some("docker".to_string()),
        experience_level: Some("senior".to_string()),
        ..Default::default()
    };

    let store = MemoryStore::new();
    let job_id = store.insert_job(job).unwrap();
    store.insert_resume(ResumeRecord::new(Some(job_id), &path, None)).unwrap();

    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
    let ranking = orchestrator.rank_for_job(job_id).await;

    assert_eq!(ranking.len(), 1);
    let breakdown = ranking[0].breakdown;
    assert_eq!(breakdown.required_skills, 30.0);
    assert_eq!(breakdown.preferred_skill, 0.0);
    assert_eq!(breakdown.experience, 5.0);
    assert_eq!(breakdown.education, 0.0);
    // Keywords glued together form a single token the resume never contains
    assert_eq!(breakdown.job_description, 0.0);
    assert_eq!(breakdown.projects, 0.0);
    assert_eq!(ranking[0].total_score, 35.0);
    assert_eq!(ranking[0].submitter, "anonymous");

    // With a separator the keywords become separate terms and overlap the resume
    let mut config = Config::default();
    config.scoring = ScoringConfig {
        keyword_joiner: " ".to_string(),
        ..ScoringConfig::default()
    };
    let requirements = orchestrator.requirements_for(job_id).unwrap();
    let features = orchestrator.extractor_mut().extract(&path).await;
    let card = ScoringEngine::new(config.scoring).unwrap().score(&features, &requirements);

    assert!(card.breakdown.job_description > 0.0);
    assert!(card.breakdown.job_description <= 25.0);
    assert!((card.total - card.breakdown.total()).abs() < 1e-9);
}

#[tokio::test]
async fn test_ranking_order_and_persisted_scores() {
    let dir = tempfile::tempdir().unwrap();
    let job = JobRecord {
        title: "Backend Developer".to_string(),
        description: Some("backend developer python sql docker".to_string()),
        required_skills: Some("python,sql,docker".to_string()),
        ..Default::default()
    };

    let store = MemoryStore::new();
    let job_id = store.insert_job(job).unwrap();

    let low = write_resume(dir.path(), "low.txt", "Python gardener.");
    let high = write_resume(dir.path(), "high.txt", "Python, SQL and Docker engineer.");
    let mid = write_resume(dir.path(), "mid.txt", "Python and SQL analyst.");

    let low_id = store.insert_resume(ResumeRecord::new(Some(job_id), &low, None)).unwrap();
    let high_id = store.insert_resume(ResumeRecord::new(Some(job_id), &high, None)).unwrap();
    let mid_id = store.insert_resume(ResumeRecord::new(Some(job_id), &mid, None)).unwrap();

    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
    let ranking = orchestrator.rank_for_job(job_id).await;

    let scores: Vec<f64> = ranking.iter().map(|r| r.total_score).collect();
    assert_eq!(scores, vec![30.0, 20.0, 10.0]);
    assert_eq!(rank_position(&ranking, high_id), Some(1));
    assert_eq!(rank_position(&ranking, mid_id), Some(2));
    assert_eq!(rank_position(&ranking, low_id), Some(3));

    for result in &ranking {
        let stored = store.get_resume(result.resume_id).unwrap().unwrap();
        assert_eq!(stored.score, result.total_score);
        assert_eq!(result.record.score, result.total_score);
    }
}

#[tokio::test]
async fn test_ranking_ties_keep_store_order() {
    let dir = tempfile::tempdir().unwrap();
    let job = JobRecord {
        title: "Analyst".to_string(),
        description: Some("sql reporting".to_string()),
        required_skills: Some("sql".to_string()),
        ..Default::default()
    };

    let store = MemoryStore::new();
    let job_id = store.insert_job(job).unwrap();
    let first = write_resume(dir.path(), "first.txt", "SQL reports.");
    let second = write_resume(dir.path(), "second.txt", "SQL dashboards.");
    let first_id = store.insert_resume(ResumeRecord::new(Some(job_id), &first, None)).unwrap();
    let second_id = store.insert_resume(ResumeRecord::new(Some(job_id), &second, None)).unwrap();

    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
    let ranking = orchestrator.rank_for_job(job_id).await;

    assert_eq!(ranking[0].total_score, ranking[1].total_score);
    assert_eq!(rank_position(&ranking, first_id), Some(1));
    assert_eq!(rank_position(&ranking, second_id), Some(2));
}

#[tokio::test]
async fn test_rerank_reads_updated_resume() {
    let dir = tempfile::tempdir().unwrap();
    let job = JobRecord {
        title: "Analyst".to_string(),
        description: Some("python sql".to_string()),
        required_skills: Some("python,sql".to_string()),
        ..Default::default()
    };

    let store = MemoryStore::new();
    let job_id = store.insert_job(job).unwrap();
    let path = write_resume(dir.path(), "cv.txt", "Python gardener.");
    let resume_id = store.insert_resume(ResumeRecord::new(Some(job_id), &path, None)).unwrap();

    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
    assert_eq!(orchestrator.rank_for_job(job_id).await[0].total_score, 15.0);

    std::fs::write(&path, "Python and SQL analyst.").unwrap();
    let ranking = orchestrator.rank_for_job(job_id).await;

    assert_eq!(ranking[0].total_score, 30.0);
    assert_eq!(store.get_resume(resume_id).unwrap().unwrap().score, 30.0);
}

#[tokio::test]
async fn test_missing_job_gives_empty_ranking() {
    let store = MemoryStore::new();
    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();

    assert!(orchestrator.rank_for_job(99).await.is_empty());
}

#[tokio::test]
async fn test_broken_pdf_is_ranked_with_empty_features() {
    let job = JobRecord {
        title: "Backend Developer".to_string(),
        description: Some("python developer".to_string()),
        required_skills: Some("python".to_string()),
        ..Default::default()
    };

    let store = MemoryStore::new();
    let job_id = store.insert_job(job).unwrap();
    let resume_id = store
        .insert_resume(ResumeRecord::new(Some(job_id), "tests/fixtures/broken.pdf", None))
        .unwrap();

    let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
    let ranking = orchestrator.rank_for_job(job_id).await;

    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].resume_id, resume_id);
    assert!(ranking[0].features.is_empty());
    assert_eq!(ranking[0].total_score, 0.0);
    assert_eq!(store.get_resume(resume_id).unwrap().unwrap().score, 0.0);
}

#[tokio::test]
async fn test_json_store_persists_ranking_scores() {
    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records.json");
    let resume = write_resume(dir.path(), "cv.txt", "Python and SQL analyst.");

    let job = JobRecord {
        title: "Analyst".to_string(),
        description: Some("python sql".to_string()),
        required_skills: Some("python,sql".to_string()),
        ..Default::default()
    };

    let (job_id, resume_id) = {
        let store = JsonFileStore::open(&records).unwrap();
        let job_id = store.insert_job(job).unwrap();
        let resume_id = store.insert_resume(ResumeRecord::new(Some(job_id), &resume, None)).unwrap();

        let mut orchestrator = RankingOrchestrator::new(&store, &Config::default()).unwrap();
        orchestrator.rank_for_job(job_id).await;
        (job_id, resume_id)
    };

    let reopened = JsonFileStore::open(&records).unwrap();
    assert_eq!(reopened.get_resume(resume_id).unwrap().unwrap().score, 30.0);
    assert_eq!(reopened.list_resumes_for_job(job_id).unwrap().len(), 1);
}
