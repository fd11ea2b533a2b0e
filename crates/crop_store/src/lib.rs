//! # crop_store
//!
//! Domain types shared across the crop-pulse pipeline: the immutable
//! [`PipelineResult`] produced by one run, and the job registry used by the
//! HTTP surface to track enqueued runs.

mod jobs;
mod result;

pub use jobs::memory::InMemoryJobStore;
pub use jobs::{Job, JobState, JobStatus, JobStore};
pub use result::{PipelineResult, PipelineResultBuilder};
