use std::{fmt::Debug, future::Future};

use itertools::Itertools;

/// The fixed classification vocabulary: eight crop labels plus "none".
pub const LABEL_VOCABULARY: [&str; 9] = [
    "paddy", "wheat", "ragi", "garlic", "maize", "peas", "cabbage", "pumpkin", "none",
];

pub const NONE_LABEL: &str = "none";

/// Labels assigned to one summary. Invariant: if more than one label is
/// present, [`NONE_LABEL`] is not among them.
pub type LabelSet = Vec<String>;

/// Summary-to-labels collaborator.
pub trait Classifier {
    const CLASSIFIER_MODEL: &'static str;

    type Error: Debug;

    fn classify(
        &self,
        summary: &str,
    ) -> impl Future<Output = Result<LabelSet, Self::Error>> + Send;
}

/// Parses a raw model response: comma-split, trimmed, empties dropped,
/// duplicates removed with order preserved. Tokens outside the vocabulary
/// pass through but are logged.
pub fn parse_label_response(raw: &str) -> LabelSet {
    let labels: LabelSet = raw
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .unique()
        .collect();

    for label in &labels {
        if !LABEL_VOCABULARY.contains(&label.as_str()) {
            tracing::warn!(label, "Classifier returned a label outside the vocabulary");
        }
    }

    labels
}

/// Removes "none" when any other label is present. A singleton `["none"]`
/// is preserved unchanged.
pub fn drop_none_when_specific(mut labels: LabelSet) -> LabelSet {
    if labels.len() > 1 {
        labels.retain(|label| label != NONE_LABEL);
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_trims_and_drops_empties() {
        assert_eq!(
            parse_label_response(" wheat , garlic ,, maize "),
            vec!["wheat", "garlic", "maize"]
        );
        assert!(parse_label_response("").is_empty());
        assert!(parse_label_response(" , , ").is_empty());
    }

    #[test]
    fn parse_dedups_preserving_order() {
        assert_eq!(
            parse_label_response("wheat, garlic, wheat"),
            vec!["wheat", "garlic"]
        );
    }

    #[test]
    fn unknown_tokens_pass_through() {
        assert_eq!(parse_label_response("wheat, barley"), vec!["wheat", "barley"]);
    }

    #[test]
    fn none_is_removed_when_other_labels_present() {
        let labels = vec!["wheat".to_string(), "none".to_string(), "peas".to_string()];
        assert_eq!(drop_none_when_specific(labels), vec!["wheat", "peas"]);
    }

    #[test]
    fn singleton_none_is_preserved() {
        let labels = vec!["none".to_string()];
        assert_eq!(drop_none_when_specific(labels), vec!["none"]);
    }

    #[test]
    fn specific_labels_are_untouched() {
        let labels = vec!["cabbage".to_string(), "pumpkin".to_string()];
        assert_eq!(
            drop_none_when_specific(labels),
            vec!["cabbage", "pumpkin"]
        );
    }
}
