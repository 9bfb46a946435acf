// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw bAbI text files
// all the way to tensor batches for the model.
//
// The pipeline flows in this order:
//
//   bAbI task file
//       │
//       ▼
//   BabiLoader        → reads the file, hands lines to the parser
//       │
//       ▼
//   parser            → rebuilds per-question story contexts,
//       │               emits (story, question, answer) Examples
//       ▼
//   Vocabulary        → sorted token set + length statistics
//       │               (domain layer)
//       ▼
//   Vectorizer        → token ids, left padding, one-hot targets
//       │
//       ▼
//   QaDataset         → implements Burn's Dataset trait
//       │
//       ▼
//   QaBatcher         → stacks samples into tensor batches
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Splits text into word/punctuation tokens
pub mod tokenizer;

/// Parses fact-id-annotated story lines into Examples
pub mod parser;

/// Loads a bAbI task file from disk
pub mod loader;

/// Token sequences -> padded id vectors and one-hot targets
pub mod vectorizer;

/// Implements Burn's Dataset trait for vectorized samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
