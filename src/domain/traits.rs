// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them:
//   - BabiLoader implements CorpusSource
//   - A future in-memory generator could too
//   - The application layer only sees CorpusSource
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::example::Example;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can produce parsed Examples.
///
/// Implementations:
///   - BabiLoader → reads a bAbI task file from disk
pub trait CorpusSource {
    /// Load and parse every example from this source.
    fn load(&self) -> Result<Vec<Example>>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that can answer a question about a story.
///
/// Implementations:
///   - AskUseCase → memory network prediction + rule-based refinement
pub trait QuestionAnswerer {
    /// Given a story and a question, return a refined answer sentence.
    fn answer(&self, story: &str, question: &str) -> Result<String>;
}
