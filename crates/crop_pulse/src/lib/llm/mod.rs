pub mod classifier;
pub mod openai;
pub mod summarizer;
pub mod transcriber;
