// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Handles all cross-cutting concerns that don't belong in
// any specific business layer:
//
//   checkpoint.rs  — Saving and loading model weights with
//                    Burn's CompactRecorder, plus the network
//                    architecture config as JSON so inference
//                    can rebuild the exact same model.
//
//   vocab_store.rs — Vocabulary persistence. The word index is
//                    derived from the vocabulary, and a model
//                    is only meaningful together with the
//                    vocabulary it was trained on, so the
//                    vocabulary JSON lives next to the weights.
//
//   metrics.rs     — Training metrics logging. Writes epoch-
//                    level metrics (loss, accuracy) to a CSV
//                    file for later analysis and plotting.
//
// Why is this a separate layer?
//   These concerns are used by multiple other layers but
//   don't belong to any one of them. Keeping them here
//   prevents duplication and makes the storage scheme easy
//   to swap.
//
// Reference: Rust Book §7 (Modules)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Vocabulary saving and loading
pub mod vocab_store;

/// Training metrics CSV logger
pub mod metrics;
