use std::path::PathBuf;

use crate::{AdvisoryPipeline, Classifier, Fetcher, MediaNormalizer, Summarizer, Transcriber};

pub struct AdvisoryPipelineBuilder<F = (), N = (), T = (), S = (), C = ()> {
    workdir: PathBuf,
    fetcher: F,
    normalizer: N,
    transcriber: T,
    summarizer: S,
    classifier: C,
    language: String,
}

impl AdvisoryPipelineBuilder {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            fetcher: (),
            normalizer: (),
            transcriber: (),
            summarizer: (),
            classifier: (),
            language: "en".into(),
        }
    }
}

impl<F, N, T, S, C> AdvisoryPipelineBuilder<F, N, T, S, C> {
    pub fn fetcher<F2: Fetcher + Send + Sync + 'static>(
        self,
        fetcher: F2,
    ) -> AdvisoryPipelineBuilder<F2, N, T, S, C> {
        AdvisoryPipelineBuilder {
            workdir: self.workdir,
            fetcher,
            normalizer: self.normalizer,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            classifier: self.classifier,
            language: self.language,
        }
    }

    pub fn normalizer<N2: MediaNormalizer + Send + Sync + 'static>(
        self,
        normalizer: N2,
    ) -> AdvisoryPipelineBuilder<F, N2, T, S, C> {
        AdvisoryPipelineBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            normalizer,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            classifier: self.classifier,
            language: self.language,
        }
    }

    pub fn transcriber<T2: Transcriber + Send + Sync + 'static>(
        self,
        transcriber: T2,
    ) -> AdvisoryPipelineBuilder<F, N, T2, S, C> {
        AdvisoryPipelineBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            normalizer: self.normalizer,
            transcriber,
            summarizer: self.summarizer,
            classifier: self.classifier,
            language: self.language,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> AdvisoryPipelineBuilder<F, N, T, S2, C> {
        AdvisoryPipelineBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            normalizer: self.normalizer,
            transcriber: self.transcriber,
            summarizer,
            classifier: self.classifier,
            language: self.language,
        }
    }

    pub fn classifier<C2: Classifier + Send + Sync + 'static>(
        self,
        classifier: C2,
    ) -> AdvisoryPipelineBuilder<F, N, T, S, C2> {
        AdvisoryPipelineBuilder {
            workdir: self.workdir,
            fetcher: self.fetcher,
            normalizer: self.normalizer,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            classifier,
            language: self.language,
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl<F, N, T, S, C> AdvisoryPipelineBuilder<F, N, T, S, C>
where
    F: Fetcher + Send + Sync + 'static,
    N: MediaNormalizer + Send + Sync + 'static,
    T: Transcriber + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: Classifier + Send + Sync + 'static,
{
    pub fn build(self) -> AdvisoryPipeline<F, N, T, S, C> {
        AdvisoryPipeline {
            workdir: self.workdir,
            fetcher: self.fetcher,
            normalizer: self.normalizer,
            transcriber: self.transcriber,
            summarizer: self.summarizer,
            classifier: self.classifier,
            language: self.language,
        }
    }
}
