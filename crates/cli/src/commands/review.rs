//! Review command handler.
//!
//! Reads an existing patch/diff file, runs the chunking pipeline with the
//! review prompt set, and writes the review (including a suggested commit
//! message) under the save directory.

use chunkwise_core::{config::AppConfig, AppError, AppResult};
use chunkwise_llm::{create_client, RetryPolicy};
use chunkwise_pipeline::{Pipeline, PromptSet, SplitterConfig, Tokenizer};
use clap::Args;
use std::path::{Path, PathBuf};

/// Review a patch file and draft a commit message
#[derive(Args, Debug)]
pub struct ReviewCommand {
    /// Path of the patch/diff file to review
    pub patch: PathBuf,
}

impl ReviewCommand {
    /// Execute the review command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Reviewing patch {:?}", self.patch);

        let patch = std::fs::read_to_string(&self.patch)?;

        let tokenizer = Tokenizer::for_model(&config.model)?;
        let api_key = config.resolve_api_key();
        let client = create_client(
            &config.provider,
            &config.model,
            config.endpoint.as_deref(),
            api_key.as_deref(),
        )
        .map_err(AppError::Config)?;

        let prompts = PromptSet::review(&config.language);
        let pipeline = Pipeline::new(
            SplitterConfig::default(),
            RetryPolicy::new(config.max_attempts, config.retry_delay()),
        );

        let report = pipeline
            .run(client.as_ref(), &tokenizer, &patch, &prompts)
            .await?;

        let rendered = format!("{}\n{}\n", review_header(&self.patch), report.render());

        if config.auto_export {
            let result_path = self.result_path(config);
            if let Some(parent) = result_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&result_path, &rendered)?;
            tracing::info!("Review saved at {:?}", result_path);
        }

        println!("{}", rendered);
        Ok(())
    }

    /// Where the review is exported: `<save_dir>/review/<patch stem>.md`.
    fn result_path(&self, config: &AppConfig) -> PathBuf {
        let stem = self
            .patch
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "patch".to_string());
        config.save_dir.join("review").join(format!("{}.md", stem))
    }
}

/// Header prepended to every review report.
fn review_header(patch: &Path) -> String {
    format!("# Code review\n\nPatch: {}\n", patch.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_header() {
        let header = review_header(Path::new("changes.patch"));
        assert!(header.starts_with("# Code review\n"));
        assert!(header.contains("changes.patch"));
    }

    #[test]
    fn test_result_path_uses_patch_stem() {
        let cmd = ReviewCommand {
            patch: PathBuf::from("/tmp/my-change.patch"),
        };
        let mut config = AppConfig::default();
        config.save_dir = PathBuf::from("/save");

        assert_eq!(
            cmd.result_path(&config),
            PathBuf::from("/save/review/my-change.md")
        );
    }
}
