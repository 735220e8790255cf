//! Chunking-and-summarization pipeline for the Chunkwise CLI.
//!
//! This crate turns an arbitrarily large text into a hierarchical summary:
//! it splits the text into model-sized windows, asks the completion port
//! about each window in order, then asks one final roll-up question over
//! the per-window answers.
//!
//! # Example
//! ```no_run
//! use chunkwise_llm::{create_client, RetryPolicy};
//! use chunkwise_pipeline::{Pipeline, PromptSet, SplitterConfig, Tokenizer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tokenizer = Tokenizer::for_model("gpt-3.5-turbo")?;
//! let client = create_client("openai", "gpt-3.5-turbo", None, Some("sk-..."))?;
//! let pipeline = Pipeline::new(SplitterConfig::default(), RetryPolicy::default());
//!
//! let prompts = PromptSet::explain("English");
//! let report = pipeline
//!     .run(client.as_ref(), &tokenizer, "fn main() {}", &prompts)
//!     .await?;
//! println!("{}", report.render());
//! # Ok(())
//! # }
//! ```

pub mod orchestrator;
pub mod prompts;
pub mod report;
pub mod splitter;
pub mod tokenizer;

// Re-export main types
pub use orchestrator::Pipeline;
pub use prompts::PromptSet;
pub use report::Report;
pub use splitter::{split, Chunk, SplitOutcome, SplitterConfig};
pub use tokenizer::Tokenizer;
