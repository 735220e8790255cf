//! Token-aware chunk splitter.
//!
//! Splits a text into ordered, non-overlapping chunks bounded both by a
//! token budget and a hard character ceiling. When a decoded window
//! overshoots the ceiling the budget shrinks by a fixed ratio and the same
//! offset is retried with the smaller window. The shrunk budget carries
//! over to subsequent chunks instead of resetting per chunk, so irregular
//! texts converge on a window size that fits.

use chunkwise_core::{AppError, AppResult};

use crate::tokenizer::Tokenizer;

/// Ratio applied to the token budget when a window overshoots the ceiling.
const SHRINK_RATIO: f64 = 0.9;

/// Configuration for the chunk splitter.
#[derive(Debug, Clone)]
pub struct SplitterConfig {
    /// Starting token budget per window
    pub token_budget: usize,

    /// Hard ceiling on decoded chunk length, in characters
    pub char_ceiling: usize,

    /// Decode attempts per chunk before giving up
    pub max_shrink_attempts: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            token_budget: 2800,
            char_ceiling: 11500,
            max_shrink_attempts: 20,
        }
    }
}

/// One contiguous decoded slice of the source text.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Decoded chunk text
    pub text: String,

    /// Offset of the chunk's first token in the full token sequence
    pub start_token: usize,
}

/// Result of splitting a text.
#[derive(Debug)]
pub struct SplitOutcome {
    /// Chunks in source order
    pub chunks: Vec<Chunk>,

    /// Token count of the whole input
    pub total_tokens: usize,
}

/// Split `text` into chunks under `config`.
///
/// The chunk windows tile the token sequence left to right with no gaps
/// and no overlap; iteration stops once the next offset reaches or passes
/// the total token count. A text that fits in one window yields exactly
/// one chunk.
pub fn split(tokenizer: &Tokenizer, text: &str, config: &SplitterConfig) -> AppResult<SplitOutcome> {
    if config.token_budget == 0 {
        return Err(AppError::Chunking(
            "Token budget must be positive".to_string(),
        ));
    }

    let tokens = tokenizer.encode(text);
    let total_tokens = tokens.len();

    let mut chunks = Vec::new();
    let mut offset = 0usize;
    let mut budget = config.token_budget;

    loop {
        let chunk_text = next_window(tokenizer, &tokens, offset, &mut budget, config)?;
        chunks.push(Chunk {
            text: chunk_text,
            start_token: offset,
        });

        // Advance by the budget actually used, shrunk or not
        offset += budget;
        if offset >= total_tokens {
            break;
        }
    }

    tracing::debug!(
        "Split {} tokens into {} chunks (final budget: {})",
        total_tokens,
        chunks.len(),
        budget
    );

    Ok(SplitOutcome {
        chunks,
        total_tokens,
    })
}

/// Decode the window starting at `offset`, shrinking `budget` until the
/// decoded text fits under the character ceiling.
fn next_window(
    tokenizer: &Tokenizer,
    tokens: &[u32],
    offset: usize,
    budget: &mut usize,
    config: &SplitterConfig,
) -> AppResult<String> {
    for _ in 0..config.max_shrink_attempts {
        if *budget == 0 {
            break;
        }

        let end = (offset + *budget).min(tokens.len());
        let window = &tokens[offset..end];

        // A decode failure means the window boundary landed inside a
        // multi-byte character; shrinking moves the boundary just like an
        // oversized window.
        match tokenizer.decode(window) {
            Ok(text) if text.chars().count() <= config.char_ceiling => return Ok(text),
            Ok(_) | Err(_) => {
                *budget = (*budget as f64 * SHRINK_RATIO) as usize;
            }
        }
    }

    Err(AppError::Chunking(format!(
        "Cannot produce a chunk under {} characters at token offset {} within {} attempts",
        config.char_ceiling, offset, config.max_shrink_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::for_model("gpt-3.5-turbo").unwrap()
    }

    #[test]
    fn test_short_text_yields_one_chunk() {
        let tok = tokenizer();
        let text = "a".repeat(100);

        let outcome = split(&tok, &text, &SplitterConfig::default()).unwrap();

        assert_eq!(outcome.chunks.len(), 1);
        assert_eq!(outcome.chunks[0].text, text);
        assert_eq!(outcome.chunks[0].start_token, 0);
        assert_eq!(outcome.total_tokens, tok.count(&text));
    }

    #[test]
    fn test_chunks_tile_the_token_sequence() {
        let tok = tokenizer();
        let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
        let config = SplitterConfig {
            token_budget: 50,
            ..SplitterConfig::default()
        };

        let outcome = split(&tok, &text, &config).unwrap();
        assert!(outcome.chunks.len() > 1);

        // Windows tile left to right: concatenating decoded chunks
        // reconstructs the input with nothing dropped or duplicated.
        let rejoined: String = outcome.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);

        // Offsets are strictly increasing and start at zero.
        assert_eq!(outcome.chunks[0].start_token, 0);
        for pair in outcome.chunks.windows(2) {
            assert!(pair[0].start_token < pair[1].start_token);
        }
    }

    #[test]
    fn test_char_ceiling_is_respected() {
        let tok = tokenizer();
        let text = "word ".repeat(2000);
        let config = SplitterConfig {
            token_budget: 100,
            char_ceiling: 300,
            ..SplitterConfig::default()
        };

        let outcome = split(&tok, &text, &config).unwrap();
        for chunk in &outcome.chunks {
            assert!(chunk.text.chars().count() <= 300);
        }
    }

    #[test]
    fn test_shrunk_budget_carries_over() {
        let tok = tokenizer();
        // ~5 chars per token, so a 100-token window decodes far past the
        // 300-char ceiling and forces a shrink on the first chunk.
        let text = "word ".repeat(2000);
        let config = SplitterConfig {
            token_budget: 100,
            char_ceiling: 300,
            ..SplitterConfig::default()
        };

        let outcome = split(&tok, &text, &config).unwrap();
        assert!(outcome.chunks.len() > 2);

        let first_step = outcome.chunks[1].start_token - outcome.chunks[0].start_token;
        let second_step = outcome.chunks[2].start_token - outcome.chunks[1].start_token;

        // First window shrank below the starting budget, and the next
        // chunk reused the shrunk value instead of resetting.
        assert!(first_step < config.token_budget);
        assert_eq!(second_step, first_step);
    }

    #[test]
    fn test_shrink_exhaustion_is_terminal() {
        let tok = tokenizer();
        let text = "word ".repeat(5000);
        // 0.9^20 * 10000 is still well over one character per window.
        let config = SplitterConfig {
            token_budget: 10_000,
            char_ceiling: 1,
            max_shrink_attempts: 20,
        };

        match split(&tok, &text, &config) {
            Err(AppError::Chunking(msg)) => assert!(msg.contains("20 attempts")),
            other => panic!("expected Chunking error, got {:?}", other.map(|o| o.chunks.len())),
        }
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let tok = tokenizer();
        let config = SplitterConfig {
            token_budget: 0,
            ..SplitterConfig::default()
        };

        assert!(split(&tok, "some text", &config).is_err());
    }
}
