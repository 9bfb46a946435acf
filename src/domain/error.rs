// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Typed errors for the failures the core must report precisely.
// Higher layers plumb these through anyhow::Result; the CLI
// downcasts where it needs to degrade gracefully (an empty
// input becomes "no answer", not a stack trace).
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QaError {
    /// A corpus line the parser cannot interpret. Fatal for the whole
    /// file: vocabulary determinism depends on seeing the full corpus,
    /// so the load aborts instead of silently skipping.
    #[error("malformed corpus line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// Vectorization met a token absent from the word index. This only
    /// happens when vectorizing against a vocabulary the examples were
    /// not drawn from — a model/vocabulary mismatch. Never zero-filled:
    /// that would corrupt the training signal.
    #[error("token '{token}' is not in the word index")]
    UnknownToken { token: String },

    /// `predict` was called with a story or question that tokenizes
    /// to nothing. No prediction is attempted.
    #[error("{side} is empty after tokenization")]
    EmptyInput { side: &'static str },

    /// A sequence longer than the fixed input width, under the
    /// `Reject` overflow policy.
    #[error("sequence of {len} tokens exceeds the maximum of {max}")]
    TooLong { len: usize, max: usize },

    /// A checkpoint whose recorded vocabulary size disagrees with the
    /// word index it is being paired with. Loading anyway would produce
    /// silently wrong predictions.
    #[error(
        "checkpoint was trained with a vocabulary of {expected} slots \
         but the loaded word index provides {found}"
    )]
    ArtifactMismatch { expected: usize, found: usize },
}
