//! Prompt sets for the pipeline.
//!
//! A prompt set holds the four instruction strings one pipeline run needs:
//! one for the first chunk, one for every following chunk, one for the
//! roll-up over the per-chunk answers, and one used when the whole text
//! fits in a single chunk. The set is supplied once per run and never
//! mutated.

/// The four instructions driving one pipeline run.
#[derive(Debug, Clone)]
pub struct PromptSet {
    /// Prepended to the first chunk
    pub first_chunk: String,

    /// Prepended to every chunk after the first
    pub continuation_chunk: String,

    /// Prepended to the joined per-chunk answers
    pub multi_chunk_summary: String,

    /// Prepended to the whole text when there is only one chunk
    pub single_chunk_summary: String,
}

impl PromptSet {
    /// Create a prompt set from explicit instructions.
    pub fn new(
        first_chunk: impl Into<String>,
        continuation_chunk: impl Into<String>,
        multi_chunk_summary: impl Into<String>,
        single_chunk_summary: impl Into<String>,
    ) -> Self {
        Self {
            first_chunk: first_chunk.into(),
            continuation_chunk: continuation_chunk.into(),
            multi_chunk_summary: multi_chunk_summary.into(),
            single_chunk_summary: single_chunk_summary.into(),
        }
    }

    /// Prompt set for the code explainer.
    pub fn explain(language: &str) -> Self {
        Self::new(
            format!(
                "The code I sent you is a part of a code file. \
                 Please help me generate a summary. Include the most unique and helpful points. \
                 No need to include all the details. 300 words or less. Reply in {}:\n",
                language
            ),
            format!(
                "The following code is a follow-up to the code I sent you before. \
                 Please help me generate a summary. Include the most unique and helpful points. \
                 No need to include all the details. 300 words or less. Reply in {}:\n",
                language
            ),
            format!(
                "The following content is a summary of different parts of the same code file. \
                 Please summarize them with the most unique and helpful points, \
                 into a list of key points and takeaways. Reply in {}:\n",
                language
            ),
            format!(
                "The texts I send to you all come from the same code file. \
                 Summarize them with the most unique and helpful points, \
                 into a list of key points and takeaways. Reply in {}:\n",
                language
            ),
        )
    }

    /// Prompt set for the code reviewer.
    pub fn review(language: &str) -> Self {
        Self::new(
            format!(
                "The content I sent you is a part of a code patch. \
                 Please help me do a brief code review. \
                 Any bug risks and improvement suggestions are welcome. Reply in {}:\n",
                language
            ),
            format!(
                "Please continue the code review. \
                 Any bug risks and improvement suggestions are welcome. Reply in {}:\n",
                language
            ),
            format!(
                "The following content is code reviews of different parts of the same code patch. \
                 First, please summarize them with the most unique and helpful points, \
                 into a list of key points and takeaways. \
                 Then, please provide a commit message of 30 words or less. Reply in {}:\n",
                language
            ),
            format!(
                "Below is a code patch. First, please help me do a brief code review; \
                 any bug risks and improvement suggestions are welcome. \
                 Then, please provide a commit message of 30 words or less. Reply in {}:\n",
                language
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_set_uses_language() {
        let prompts = PromptSet::explain("Chinese");
        assert!(prompts.first_chunk.contains("Reply in Chinese"));
        assert!(prompts.continuation_chunk.contains("Reply in Chinese"));
        assert!(prompts.multi_chunk_summary.contains("Reply in Chinese"));
        assert!(prompts.single_chunk_summary.contains("Reply in Chinese"));
    }

    #[test]
    fn test_review_set_mentions_commit_message() {
        let prompts = PromptSet::review("English");
        assert!(prompts.multi_chunk_summary.contains("commit message"));
        assert!(prompts.single_chunk_summary.contains("commit message"));
    }
}
