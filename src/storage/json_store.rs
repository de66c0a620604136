//! Record store persisted as a single JSON document

use crate::error::{RankerError, Result};
use crate::storage::memory::{MemoryStore, StoreData};
use crate::storage::models::{JobId, JobRecord, ResumeId, ResumeRecord};
use crate::storage::RecordStore;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keeps records in memory and rewrites the whole file on every mutation.
///
/// A mutation is applied to a copy of the records and written out first. The
/// in-memory records only change once the file write succeeds, so a failed
/// write leaves both sides as they were.
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    writer: Mutex<()>,
}

impl JsonFileStore {
    /// Open a store, starting empty when the file does not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let data = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            info!("Record store {} not found, starting empty", path.display());
            StoreData::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStore::from_data(data),
            writer: Mutex::new(()),
        })
    }

    /// Run `mutation` against a staged copy, persist it, then publish it.
    fn commit<T>(&self, mutation: impl FnOnce(&MemoryStore) -> Result<T>) -> Result<T> {
        let _writer = self
            .writer
            .lock()
            .map_err(|_| RankerError::Storage("record store writer poisoned".to_string()))?;

        let staged = MemoryStore::from_data(self.inner.snapshot()?);
        let value = mutation(&staged)?;
        let data = staged.into_data()?;

        self.write(&data)?;
        self.inner.replace(data)?;
        Ok(value)
    }

    fn write(&self, data: &StoreData) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        debug!("Wrote record store {}", self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn get_job(&self, id: JobId) -> Result<Option<JobRecord>> {
        self.inner.get_job(id)
    }

    fn list_jobs(&self) -> Result<Vec<JobRecord>> {
        self.inner.list_jobs()
    }

    fn get_resume(&self, id: ResumeId) -> Result<Option<ResumeRecord>> {
        self.inner.get_resume(id)
    }

    fn list_resumes_for_job(&self, job_id: JobId) -> Result<Vec<ResumeRecord>> {
        self.inner.list_resumes_for_job(job_id)
    }

    fn save_resume_score(&self, resume_id: ResumeId, score: f64) -> Result<()> {
        self.commit(|staged| staged.save_resume_score(resume_id, score))
    }

    fn insert_job(&self, job: JobRecord) -> Result<JobId> {
        self.commit(|staged| staged.insert_job(job))
    }

    fn insert_resume(&self, resume: ResumeRecord) -> Result<ResumeId> {
        self.commit(|staged| staged.insert_resume(resume))
    }
}
