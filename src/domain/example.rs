// ============================================================
// Layer 3 — Example Domain Type
// ============================================================
// Represents one question point in the corpus: the narrative
// facts accumulated so far, the question asked at that point,
// and the single-token answer.
//
// This is single-token Q&A: the model scores every vocabulary
// word as the candidate answer, so the answer here is always
// exactly one token that appears in the vocabulary.
//
// Reference: Rust Book §5 (Structs and Methods)
//            Weston et al. (2015) - bAbI tasks

use serde::{Deserialize, Serialize};

/// One (story, question, answer) triple parsed from a bAbI-style file.
///
/// Created once per question line during parsing and immutable
/// afterwards; consumed by vocabulary building and vectorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Tokens of every fact line seen since the last narrative
    /// restart, flattened into one ordered sequence
    pub story: Vec<String>,

    /// The tokenized question
    pub question: Vec<String>,

    /// The answer, always a single vocabulary token
    pub answer: String,

    /// Ids of the facts the corpus marks as supporting the answer.
    /// Parsed for validation and traceability; the model never
    /// reads them.
    pub support: Vec<usize>,
}

impl Example {
    pub fn new(
        story:    Vec<String>,
        question: Vec<String>,
        answer:   impl Into<String>,
        support:  Vec<usize>,
    ) -> Self {
        Self {
            story,
            question,
            answer: answer.into(),
            support,
        }
    }

    /// Number of tokens in the story context
    pub fn story_len(&self) -> usize {
        self.story.len()
    }

    /// Number of tokens in the question
    pub fn question_len(&self) -> usize {
        self.question.len()
    }
}
