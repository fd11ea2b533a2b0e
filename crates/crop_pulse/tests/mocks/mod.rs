pub mod classifier;
pub mod fetcher;
pub mod normalizer;
pub mod summarizer;
pub mod transcriber;
