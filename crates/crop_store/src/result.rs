use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The sole externally observable output of one pipeline run: per-file crop
/// labels plus one cumulative summary over all per-file summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Input filename mapped to the labels the classifier assigned to it.
    pub classes: BTreeMap<String, Vec<String>>,
    pub cumulative_summary: String,
}

/// Accumulates per-file entries and finalizes into an immutable
/// [`PipelineResult`] exactly once.
#[derive(Debug, Default)]
pub struct PipelineResultBuilder {
    classes: BTreeMap<String, Vec<String>>,
}

impl PipelineResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the label set for one input file. Recording the same filename
    /// twice replaces the earlier entry.
    pub fn record(&mut self, filename: impl Into<String>, labels: Vec<String>) {
        self.classes.insert(filename.into(), labels);
    }

    pub fn finalize(self, cumulative_summary: impl Into<String>) -> PipelineResult {
        PipelineResult {
            classes: self.classes,
            cumulative_summary: cumulative_summary.into(),
        }
    }
}
