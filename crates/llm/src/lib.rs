//! Completion-port crate for the Chunkwise CLI.
//!
//! This crate provides a provider-agnostic abstraction over chat completion
//! services, plus the retry policy that wraps every call to them. A
//! completion call may fail transiently at any time; callers go through
//! [`with_retry`] rather than calling the port directly.
//!
//! # Providers
//! - **OpenAI-compatible**: any endpoint speaking the `/v1/chat/completions`
//!   JSON API (default)
//!
//! # Example
//! ```no_run
//! use chunkwise_llm::{ChatClient, OpenAiCompatClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiCompatClient::new("gpt-3.5-turbo", "sk-...");
//! let answer = client.ask("Hello, world!").await?;
//! println!("{}", answer);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod retry;

// Re-export main types
pub use client::ChatClient;
pub use factory::create_client;
pub use providers::OpenAiCompatClient;
pub use retry::{with_retry, RetryPolicy};
