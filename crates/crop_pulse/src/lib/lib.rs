pub mod api;
mod chunker;
mod error;
mod extract;
mod fetch;
mod llm;
mod media;
mod processor;
pub mod sources;
pub mod tracing;

pub use chunker::split_words;
pub use error::{ExtractError, FetchError, MediaError};
pub use extract::{extract_text, DocumentKind};
pub use fetch::{Fetcher, MediaFetcher};
pub use llm::openai;
pub use llm::{
    classifier::{Classifier, LabelSet, LABEL_VOCABULARY, NONE_LABEL},
    summarizer::{Summarizer, SummaryResponse},
    transcriber::{TranscribeResponse, Transcriber},
};
pub use media::{FfmpegNormalizer, MediaNormalizer};
pub use processor::{builder::AdvisoryPipelineBuilder, AdvisoryPipeline};
