use std::sync::{Arc, Mutex};

use crop_pulse::{Classifier, LabelSet};

/// Classifier double keyed on substrings: the first keyword found in the
/// summary wins, otherwise `["none"]`.
#[derive(Clone)]
pub struct MockClassifier {
    pub keyed: Vec<(String, Vec<String>)>,
    pub fail_with: Option<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self {
            keyed: Vec::new(),
            fail_with: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_labels(mut self, keyword: &str, labels: &[&str]) -> Self {
        self.keyed.push((
            keyword.to_string(),
            labels.iter().map(|l| l.to_string()).collect(),
        ));
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new()
        }
    }
}

impl Classifier for MockClassifier {
    const CLASSIFIER_MODEL: &'static str = "mock-classifier";
    type Error = String;

    async fn classify(&self, summary: &str) -> Result<LabelSet, Self::Error> {
        self.calls.lock().unwrap().push(summary.to_string());

        if let Some(ref msg) = self.fail_with {
            return Err(msg.clone());
        }

        for (keyword, labels) in &self.keyed {
            if summary.contains(keyword.as_str()) {
                return Ok(labels.clone());
            }
        }

        Ok(vec!["none".to_string()])
    }
}
