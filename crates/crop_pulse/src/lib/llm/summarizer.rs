use std::{fmt::Debug, future::Future};

use serde::Deserialize;

/// Chunked summarization collaborator.
///
/// `summarize` produces the per-file summary: one completion per chunk,
/// concatenated newline-separated in chunk order. `summarize_cumulative` is
/// the second-pass reduction applied once over the concatenation of all
/// per-file summaries, with a fixed output token budget.
pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug;

    fn summarize(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;

    fn summarize_cumulative(
        &self,
        content: &str,
        max_tokens: u32,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
