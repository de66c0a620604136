//! Record store for jobs and submitted resumes
//!
//! The scoring core only needs the narrow [`RecordStore`] interface. Two
//! implementations are provided: an in-memory store and a JSON file store
//! used by the command line front end.

pub mod json_store;
pub mod memory;
pub mod models;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use models::{JobId, JobRecord, ResumeId, ResumeRecord};

use crate::error::Result;

pub trait RecordStore {
    fn get_job(&self, id: JobId) -> Result<Option<JobRecord>>;

    fn list_jobs(&self) -> Result<Vec<JobRecord>>;

    fn get_resume(&self, id: ResumeId) -> Result<Option<ResumeRecord>>;

    /// Resumes submitted for a job, in no particular order
    fn list_resumes_for_job(&self, job_id: JobId) -> Result<Vec<ResumeRecord>>;

    /// Persist a computed score. Fails with `NotFound` for unknown resumes.
    fn save_resume_score(&self, resume_id: ResumeId, score: f64) -> Result<()>;

    /// Store a job; an `id` of 0 is replaced by the next free id.
    fn insert_job(&self, job: JobRecord) -> Result<JobId>;

    /// Store a resume; an `id` of 0 is replaced by the next free id.
    fn insert_resume(&self, resume: ResumeRecord) -> Result<ResumeId>;
}
