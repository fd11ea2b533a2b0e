use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{Job, JobStatus, JobStore};

/// In-process job registry shared between the HTTP handlers and spawned
/// pipeline runs. Entries live for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobStore {
    jobs: Arc<RwLock<HashMap<Uuid, Job>>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobStore for InMemoryJobStore {
    async fn create_job(&self) -> anyhow::Result<Job> {
        let job = Job::pending(Uuid::new_v4());
        let mut jobs = self.jobs.write().await;
        jobs.insert(job.id, job.clone());
        tracing::debug!(job_id = %job.id, "Registered new job");
        Ok(job)
    }

    async fn update_status(&self, id: Uuid, status: JobStatus) -> anyhow::Result<()> {
        let mut jobs = self.jobs.write().await;
        let job = jobs
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("Unknown job id: {id}"))?;
        job.status = status;
        job.updated_at = Utc::now();
        Ok(())
    }

    async fn get_job(&self, id: Uuid) -> anyhow::Result<Option<Job>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JobState, PipelineResultBuilder};

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = InMemoryJobStore::new();
        let job = store.create_job().await.unwrap();

        let fetched = store.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, job.id);
        assert_eq!(fetched.state(), JobState::Pending);
    }

    #[tokio::test]
    async fn update_status_transitions_to_success() {
        let store = InMemoryJobStore::new();
        let job = store.create_job().await.unwrap();

        let result = PipelineResultBuilder::new().finalize("done");
        store
            .update_status(job.id, JobStatus::Success(result.clone()))
            .await
            .unwrap();

        let fetched = store.get_job(job.id).await.unwrap().unwrap();
        assert_eq!(fetched.state(), JobState::Success);
        match fetched.status {
            JobStatus::Success(r) => assert_eq!(r, result),
            other => panic!("unexpected status: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_job_yields_none() {
        let store = InMemoryJobStore::new();
        assert!(store.get_job(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn updating_unknown_job_is_an_error() {
        let store = InMemoryJobStore::new();
        let err = store
            .update_status(Uuid::new_v4(), JobStatus::Running)
            .await;
        assert!(err.is_err());
    }
}
