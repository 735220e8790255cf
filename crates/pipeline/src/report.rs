//! Final report assembly.
//!
//! A report owns the ordered answers from one pipeline run: one per chunk,
//! plus the trailing summary. Rendering labels every answer but the last
//! with its position (`i/N`) and the last one as the summary, regardless
//! of how many chunks there were.

/// The assembled output of one pipeline run.
#[derive(Debug, Clone)]
pub struct Report {
    answers: Vec<String>,
}

impl Report {
    /// Build a report from the ordered answer list.
    ///
    /// The last answer is always the summary; with a single-chunk run it is
    /// the only answer. An empty answer list renders to an empty report.
    pub fn new(answers: Vec<String>) -> Self {
        Self { answers }
    }

    /// All answers in order, summary last.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Number of sections the rendered report will have.
    pub fn section_count(&self) -> usize {
        self.answers.len()
    }

    /// Render the report as markdown.
    pub fn render(&self) -> String {
        let part_count = self.answers.len().saturating_sub(1);
        let mut sections = Vec::new();

        for (i, answer) in self.answers.iter().enumerate() {
            if i > 0 {
                sections.push(String::new());
            }

            if i < part_count {
                sections.push(format!("## Part {}/{}\n\n{}", i + 1, part_count, answer));
            } else {
                sections.push(format!("## Summary\n\n{}", answer));
            }
        }

        sections.join("\n")
    }
}
