//! Explain command handler.
//!
//! Reads a code file, runs the chunking pipeline with the explain prompt
//! set, and prints the assembled report. Reports are cached by source path
//! and served from the cache while the source is unchanged.

use crate::cache::ResultCache;
use chunkwise_core::{config::AppConfig, AppError, AppResult};
use chunkwise_llm::{create_client, RetryPolicy};
use chunkwise_pipeline::{Pipeline, PromptSet, SplitterConfig, Tokenizer};
use clap::Args;
use std::path::{Path, PathBuf};

/// Explain a code file section by section
#[derive(Args, Debug)]
pub struct ExplainCommand {
    /// Path of the code file
    pub file: PathBuf,

    /// Serve a cached report if the file is unchanged
    #[arg(long)]
    pub cache: bool,
}

impl ExplainCommand {
    /// Execute the explain command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Explaining {:?}", self.file);

        let cache = ResultCache::new(&config.save_dir, "explain");

        if self.cache {
            if let Some(report) = cache.read(&self.file) {
                tracing::info!("Serving cached report from {:?}", cache.cache_path(&self.file));
                println!("{}", report);
                return Ok(());
            }
        }

        let text = std::fs::read_to_string(&self.file)?;
        let report = run_explain(config, &text).await?;

        let rendered = format!("{}\n{}\n", explain_header(&self.file), report.render());

        let cache_path = cache.write(&self.file, &rendered)?;
        tracing::info!("Report cached at {:?}", cache_path);

        println!("{}", rendered);
        Ok(())
    }
}

/// Run the pipeline with the explain prompt set.
async fn run_explain(
    config: &AppConfig,
    text: &str,
) -> AppResult<chunkwise_pipeline::Report> {
    let tokenizer = Tokenizer::for_model(&config.model)?;

    let api_key = config.resolve_api_key();
    let client = create_client(
        &config.provider,
        &config.model,
        config.endpoint.as_deref(),
        api_key.as_deref(),
    )
    .map_err(AppError::Config)?;

    let prompts = PromptSet::explain(&config.language);
    let pipeline = Pipeline::new(
        SplitterConfig::default(),
        RetryPolicy::new(config.max_attempts, config.retry_delay()),
    );

    pipeline
        .run(client.as_ref(), &tokenizer, text, &prompts)
        .await
}

/// Header prepended to every explain report.
fn explain_header(path: &Path) -> String {
    let display = path.display();
    format!("# {}\n\n[Open](file:///{})\n", display, display)
}
