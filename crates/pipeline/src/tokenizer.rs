//! Tokenizer adapter.
//!
//! Wraps the model-specific BPE encoder used to measure and slice text by
//! token count. The adapter is only used for chunk-size control; answers
//! from the completion port are never tokenized.

use chunkwise_core::{AppError, AppResult};
use tiktoken_rs::CoreBPE;

/// Model-specific tokenizer.
pub struct Tokenizer {
    bpe: CoreBPE,
    model: String,
}

impl Tokenizer {
    /// Create a tokenizer for the given model.
    ///
    /// An unrecognized model name is a fatal configuration error: chunk
    /// sizing would be meaningless with the wrong vocabulary.
    pub fn for_model(model: &str) -> AppResult<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model).map_err(|e| {
            AppError::Config(format!("No tokenizer available for model '{}': {}", model, e))
        })?;

        Ok(Self {
            bpe,
            model: model.to_string(),
        })
    }

    /// Model this tokenizer was built for.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Encode text into token ids.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.bpe.encode_with_special_tokens(text)
    }

    /// Decode token ids back into text.
    ///
    /// Fails when the token window does not decode to valid UTF-8, which
    /// can happen when a window boundary lands inside a multi-byte
    /// character. The splitter treats that the same as an oversized window.
    pub fn decode(&self, tokens: &[u32]) -> AppResult<String> {
        self.bpe
            .decode(tokens.to_vec())
            .map_err(|e| AppError::Chunking(format!("Failed to decode token window: {}", e)))
    }

    /// Count the tokens in a string.
    pub fn count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}
