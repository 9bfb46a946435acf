// ============================================================
// Layer 4 — Story Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<StorySample>
// into tensor batches for the model forward pass.
//
// How batching works here:
//   Input:  Vec of N StorySamples with fixed-width rows
//   Output: QaBatch with
//     stories [N, story_len] Int, queries [N, query_len] Int,
//     targets [N, vocab_size] Float (one-hot rows)
//
//   We flatten all rows into one long Vec, then reshape:
//   [s1_t1, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// This is easy because the Vectorizer already padded everything
// to the same length. If it hadn't, we'd need dynamic padding
// here.
//
// Reference: Burn Book §4 (Batcher)

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::vectorizer::StorySample;

// ─── QaBatch ──────────────────────────────────────────────────────────────────
/// A batch of vectorized samples ready for the model.
/// All tensors have batch_size as their first dimension, and
/// row i of every tensor describes the same example.
#[derive(Debug, Clone)]
pub struct QaBatch<B: Backend> {
    /// Padded story id sequences — shape: [batch_size, story_len]
    pub stories: Tensor<B, 2, Int>,

    /// Padded question id sequences — shape: [batch_size, query_len]
    pub queries: Tensor<B, 2, Int>,

    /// One-hot answer rows — shape: [batch_size, vocab_size]
    pub targets: Tensor<B, 2>,
}

// ─── QaBatcher ────────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the right place.
/// Generic over the backend so the same batcher serves both the
/// autodiff training loader and the plain validation loader.
#[derive(Clone, Debug)]
pub struct QaBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> QaBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<StorySample, QaBatch<B>> for QaBatcher<B> {
    fn batch(&self, items: Vec<StorySample>) -> QaBatch<B> {
        let batch_size = items.len();
        // All rows share the widths fixed by the Vectorizer
        let story_len = items[0].story.len();
        let query_len = items[0].query.len();
        let vocab_size = items[0].target.len();

        let story_flat: Vec<i32> = items.iter().flat_map(|s| s.story.iter().copied()).collect();
        let query_flat: Vec<i32> = items.iter().flat_map(|s| s.query.iter().copied()).collect();
        let target_flat: Vec<f32> = items.iter().flat_map(|s| s.target.iter().copied()).collect();

        let stories = Tensor::<B, 1, Int>::from_ints(story_flat.as_slice(), &self.device)
            .reshape([batch_size, story_len]);

        let queries = Tensor::<B, 1, Int>::from_ints(query_flat.as_slice(), &self.device)
            .reshape([batch_size, query_len]);

        let targets = Tensor::<B, 1>::from_floats(target_flat.as_slice(), &self.device)
            .reshape([batch_size, vocab_size]);

        QaBatch {
            stories,
            queries,
            targets,
        }
    }
}
