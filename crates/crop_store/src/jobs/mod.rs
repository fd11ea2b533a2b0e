use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::PipelineResult;

pub mod memory;

/// Registry of enqueued pipeline runs. The HTTP surface creates a job per
/// accepted request and the spawned run reports back through it.
pub trait JobStore {
    fn create_job(&self) -> impl Future<Output = anyhow::Result<Job>> + Send;

    fn update_status(
        &self,
        id: Uuid,
        status: JobStatus,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn get_job(&self, id: Uuid) -> impl Future<Output = anyhow::Result<Option<Job>>> + Send;
}

impl<T: JobStore + Send + Sync> JobStore for &T {
    async fn create_job(&self) -> anyhow::Result<Job> {
        (**self).create_job().await
    }

    async fn update_status(&self, id: Uuid, status: JobStatus) -> anyhow::Result<()> {
        (**self).update_status(id, status).await
    }

    async fn get_job(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        (**self).get_job(id).await
    }
}

#[derive(Debug, Clone)]
pub struct Job {
    pub id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn pending(id: Uuid) -> Self {
        let now = Utc::now();
        Job {
            id,
            status: JobStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn state(&self) -> JobState {
        match self.status {
            JobStatus::Pending => JobState::Pending,
            JobStatus::Running => JobState::Running,
            JobStatus::Success(_) => JobState::Success,
            JobStatus::Failure(_) => JobState::Failure,
        }
    }
}

/// Lifecycle of one enqueued run. Success carries the run's result, failure
/// a collaborator-defined error description.
#[derive(Debug, Clone)]
pub enum JobStatus {
    Pending,
    Running,
    Success(PipelineResult),
    Failure(String),
}

/// Coarse state reported on the poll surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Running,
    Success,
    Failure,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Running => "running",
            JobState::Success => "success",
            JobState::Failure => "failure",
        }
    }
}
