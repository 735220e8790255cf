//! Pipeline orchestrator.
//!
//! Drives the full sequence: split the text, ask the completion port per
//! chunk in strict order, then ask one roll-up question over the per-chunk
//! answers. Calls are sequential because each completion may extend a
//! shared server-side conversation; the summary depends on every prior
//! answer being in place.

use chunkwise_core::AppResult;
use chunkwise_llm::{with_retry, ChatClient, RetryPolicy};

use crate::prompts::PromptSet;
use crate::report::Report;
use crate::splitter::{split, SplitterConfig};
use crate::tokenizer::Tokenizer;

/// The chunking-and-summarization pipeline.
pub struct Pipeline {
    splitter: SplitterConfig,
    retry: RetryPolicy,
}

impl Pipeline {
    /// Create a pipeline with the given splitter and retry settings.
    pub fn new(splitter: SplitterConfig, retry: RetryPolicy) -> Self {
        Self { splitter, retry }
    }

    /// Run the pipeline over `text` and assemble the report.
    ///
    /// With more than one chunk this issues exactly one completion call per
    /// chunk plus one summary call; with a single chunk it issues only the
    /// single-chunk summary call over the whole text. Any terminal failure
    /// aborts the run; no partial report is returned.
    pub async fn run(
        &self,
        client: &dyn ChatClient,
        tokenizer: &Tokenizer,
        text: &str,
        prompts: &PromptSet,
    ) -> AppResult<Report> {
        let outcome = split(tokenizer, text, &self.splitter)?;
        let chunk_count = outcome.chunks.len();

        tracing::info!(
            "Input: {} chars, {} tokens, {} chunks",
            text.chars().count(),
            outcome.total_tokens,
            chunk_count
        );

        let mut answers = Vec::with_capacity(chunk_count + 1);

        if chunk_count > 1 {
            let mut partials = Vec::with_capacity(chunk_count);

            for (i, chunk) in outcome.chunks.iter().enumerate() {
                let instruction = if i == 0 {
                    &prompts.first_chunk
                } else {
                    &prompts.continuation_chunk
                };

                let prompt = format!("{}{}", instruction, chunk.text);
                let label = format!("chunk {}/{}", i + 1, chunk_count);

                tracing::info!("[{}] asking ({} chars)", label, chunk.text.chars().count());
                let answer = with_retry(&self.retry, &label, || client.ask(&prompt)).await?;

                partials.push(answer.clone());
                answers.push(answer);
            }

            let summary_prompt =
                format!("{}{}", prompts.multi_chunk_summary, partials.join("\n"));
            let summary = with_retry(&self.retry, "summary", || client.ask(&summary_prompt)).await?;
            answers.push(summary);
        } else {
            // One chunk: a single call covers both the chunk and the summary.
            let prompt = format!("{}{}", prompts.single_chunk_summary, text);
            let answer = with_retry(&self.retry, "summary", || client.ask(&prompt)).await?;
            answers.push(answer);
        }

        Ok(Report::new(answers))
    }
}
