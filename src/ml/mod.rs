// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — only this one
// and the data batcher/dataset glue.
//
// What's in this layer:
//
//   model.rs      — The single-hop End-to-End Memory Network:
//                   • three embedding tables (U, M, C)
//                   • dot-product attention over story facts
//                   • LSTM answer decoder
//                   • dense projection to vocabulary logits
//
//   trainer.rs    — The training loop
//                   Handles forward pass, categorical cross-
//                   entropy against one-hot targets, backward
//                   pass, Adam step, held-out accuracy and
//                   checkpoint saving per epoch
//
//   inferencer.rs — The inference engine
//                   Loads a checkpoint (validated against the
//                   word index), vectorizes one live entry,
//                   runs the model, decodes the argmax token
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Sukhbaatar et al. (2015) End-To-End Memory Networks

/// Memory network architecture
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and predicts answers
pub mod inferencer;
