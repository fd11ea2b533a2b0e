use std::sync::{Arc, Mutex};

use crop_pulse::{Summarizer, SummaryResponse};

/// Summarizer double. Echoes its input back as the summary so assertions
/// can key off document content, and records both call kinds.
#[derive(Clone)]
pub struct MockSummarizer {
    pub fail_with: Option<String>,
    pub fail_cumulative_with: Option<String>,
    pub summarize_calls: Arc<Mutex<Vec<String>>>,
    pub cumulative_calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl MockSummarizer {
    pub fn echoing() -> Self {
        Self {
            fail_with: None,
            fail_cumulative_with: None,
            summarize_calls: Arc::new(Mutex::new(Vec::new())),
            cumulative_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::echoing()
        }
    }

    pub fn failing_cumulative(msg: &str) -> Self {
        Self {
            fail_cumulative_with: Some(msg.to_string()),
            ..Self::echoing()
        }
    }
}

impl Summarizer for MockSummarizer {
    const SUMMARIZER_MODEL: &'static str = "mock-summarizer";
    type Error = String;

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        self.summarize_calls.lock().unwrap().push(content.to_string());

        if let Some(ref msg) = self.fail_with {
            return Err(msg.clone());
        }

        Ok(SummaryResponse {
            summary: content.to_string(),
        })
    }

    async fn summarize_cumulative(
        &self,
        content: &str,
        max_tokens: u32,
    ) -> Result<SummaryResponse, Self::Error> {
        self.cumulative_calls
            .lock()
            .unwrap()
            .push((content.to_string(), max_tokens));

        if let Some(ref msg) = self.fail_cumulative_with {
            return Err(msg.clone());
        }

        Ok(SummaryResponse {
            summary: "cumulative advisory".to_string(),
        })
    }
}
