//! Word-count based text chunking.
//!
//! The threshold counts words rather than model tokens; the default of 1500
//! words leaves comfortable headroom under the completion model's real token
//! limit.

/// Splits `text` into chunks of at most `max_words` whitespace-separated
/// words. Chunks are non-overlapping, ordered, and together reproduce the
/// original word sequence. The final chunk may be shorter; empty input
/// yields no chunks.
pub fn split_words(text: &str, max_words: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        current.push(word);
        if current.len() >= max_words {
            chunks.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}
