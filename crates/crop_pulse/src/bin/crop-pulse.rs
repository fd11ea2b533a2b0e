use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crop_pulse::{
    api::{router, AppState, ServiceConfig},
    openai::OpenAiClient,
    sources::SourceLocator,
    tracing::init_tracing_subscriber,
    AdvisoryPipelineBuilder, FfmpegNormalizer, MediaFetcher,
};

#[derive(Parser)]
#[command(name = "crop-pulse", about = "Agricultural advisory media pipeline")]
struct Cli {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_key: String,

    /// Working directory for downloads and artifacts
    #[arg(long, env = "CROP_PULSE_WORKDIR", default_value = "/var/tmp/crop-pulse")]
    workdir: PathBuf,

    /// Maximum words per summarization chunk
    #[arg(long, env = "CHUNK_WORDS", default_value = "1500")]
    chunk_words: usize,

    /// Transcription language hint
    #[arg(long, env = "TRANSCRIPTION_LANGUAGE", default_value = "en")]
    language: String,

    /// Base URL of the S3-compatible object store, e.g. https://s3.example.com
    #[arg(long, env = "OBJECT_STORE_ENDPOINT")]
    object_store_endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline once over the given locators and print the result
    Run {
        /// Local paths, direct URLs, or YouTube URLs
        locators: Vec<String>,
    },
    /// Start the HTTP job server
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5000")]
        bind_address: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let config = ServiceConfig {
        openai_api_key: cli.openai_key,
        workdir: cli.workdir,
        chunk_words: cli.chunk_words,
        language: cli.language,
        object_store_endpoint: cli.object_store_endpoint,
    };

    match cli.command {
        Command::Run { locators } => {
            tracing::info!(count = locators.len(), "Running pipeline once...");

            let openai =
                OpenAiClient::new(&config.openai_api_key).with_chunk_words(config.chunk_words);
            let pipeline = AdvisoryPipelineBuilder::new(&config.workdir)
                .fetcher(MediaFetcher::new(config.object_store_endpoint.clone()))
                .normalizer(FfmpegNormalizer)
                .transcriber(openai.clone())
                .summarizer(openai.clone())
                .classifier(openai)
                .language(&config.language)
                .build();

            let locators = locators
                .iter()
                .map(|raw| SourceLocator::classify(raw))
                .collect();
            let result = pipeline.run(locators).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Serve { bind_address } => {
            tracing::info!(%bind_address, "Starting job server...");

            let state = AppState::new(config);
            let listener = tokio::net::TcpListener::bind(&bind_address).await?;
            axum::serve(listener, router(state)).await?;
        }
    }

    Ok(())
}
