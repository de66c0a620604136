//! In-memory record store

use crate::error::{RankerError, Result};
use crate::storage::models::{JobId, JobRecord, ResumeId, ResumeRecord};
use crate::storage::RecordStore;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};

/// Serializable contents of a store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
    #[serde(default)]
    pub resumes: Vec<ResumeRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: StoreData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn snapshot(&self) -> Result<StoreData> {
        Ok(self.lock()?.clone())
    }

    /// Swap in new contents wholesale
    pub fn replace(&self, data: StoreData) -> Result<()> {
        *self.lock()? = data;
        Ok(())
    }

    pub fn into_data(self) -> Result<StoreData> {
        self.data
            .into_inner()
            .map_err(|_| RankerError::Storage("record store lock poisoned".to_string()))
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreData>> {
        self.data
            .lock()
            .map_err(|_| RankerError::Storage("record store lock poisoned".to_string()))
    }
}

impl RecordStore for MemoryStore {
    fn get_job(&self, id: JobId) -> Result<Option<JobRecord>> {
        Ok(self.lock()?.jobs.iter().find(|job| job.id == id).cloned())
    }

    fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        Ok(self.lock()?.jobs.clone())
    }

    fn get_resume(&self, id: ResumeId) -> Result<Option<ResumeRecord>> {
        Ok(self.lock()?.resumes.iter().find(|resume| resume.id == id).cloned())
    }

    fn list_resumes_for_job(&self, job_id: JobId) -> Result<Vec<ResumeRecord>> {
        Ok(self
            .lock()?
            .resumes
            .iter()
            .filter(|resume| resume.job_id == Some(job_id))
            .cloned()
            .collect())
    }

    fn save_resume_score(&self, resume_id: ResumeId, score: f64) -> Result<()> {
        let mut data = self.lock()?;
        let resume = data
            .resumes
            .iter_mut()
            .find(|resume| resume.id == resume_id)
            .ok_or_else(|| RankerError::resume_not_found(resume_id))?;
        resume.score = score;
        Ok(())
    }

    fn insert_job(&self, mut job: JobRecord) -> Result<JobId> {
        let mut data = self.lock()?;
        if job.id == 0 {
            job.id = data.jobs.iter().map(|j| j.id).max().unwrap_or(0) + 1;
        } else if data.jobs.iter().any(|j| j.id == job.id) {
            return Err(RankerError::InvalidInput(format!("job {} already exists", job.id)));
        }
        let id = job.id;
        data.jobs.push(job);
        Ok(id)
    }

    fn insert_resume(&self, mut resume: ResumeRecord) -> Result<ResumeId> {
        let mut data = self.lock()?;
        if resume.id == 0 {
            resume.id = data.resumes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        } else if data.resumes.iter().any(|r| r.id == resume.id) {
            return Err(RankerError::InvalidInput(format!("resume {} already exists", resume.id)));
        }
        let id = resume.id;
        data.resumes.push(resume);
        Ok(id)
    }
}
