//! Chat completion port.
//!
//! This module defines the abstraction the pipeline talks to. The port is
//! deliberately narrow: one prompt in, one decoded answer out. Conversation
//! state, if any, lives on the provider side, which is why callers must
//! expect a retried prompt to extend an existing server-side conversation
//! rather than restart it.

use chunkwise_core::AppResult;

/// Trait for chat completion providers.
///
/// Implementations send a prompt string to a completion service and return
/// the decoded answer text. Any call may fail transiently; recovery is the
/// caller's job (see [`crate::retry::with_retry`]).
#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    /// Get the provider name (e.g., "openai").
    fn provider_name(&self) -> &str;

    /// Send one prompt and return the answer text.
    async fn ask(&self, prompt: &str) -> AppResult<String>;
}
