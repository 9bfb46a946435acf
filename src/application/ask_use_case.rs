// ============================================================
// Layer 2 — AskUseCase
// ============================================================
// Loads a trained checkpoint and answers live questions:
//
//   Step 1: Load the persisted vocabulary    (Layer 6)
//   Step 2: Rebuild the word index           (Layer 3)
//   Step 3: Restore model + config           (Layers 5/6)
//   Step 4: Predict the answer token         (Layer 5)
//   Step 5: Refine it into a sentence        (refine)
//
// Raw prediction and refinement stay separate methods so a caller
// can get the bare vocabulary token with its confidence when the
// templated sentence is not wanted.

use anyhow::{Context, Result};

use crate::domain::traits::QuestionAnswerer;
use crate::domain::vocabulary::WordIndex;
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::vocab_store::VocabStore;
use crate::ml::inferencer::Inferencer;
use crate::refine::AnswerRefiner;

pub struct AskUseCase {
    inferencer: Inferencer,
    refiner: AnswerRefiner,
}

impl AskUseCase {
    /// Restore everything needed for inference from a checkpoint directory.
    pub fn new(checkpoint_dir: &str) -> Result<Self> {
        let vocab = VocabStore::new(checkpoint_dir)
            .load()
            .with_context(|| format!("no trained model found in '{checkpoint_dir}'"))?;
        let index = WordIndex::from_vocabulary(&vocab);

        let ckpt_manager = CheckpointManager::new(checkpoint_dir);
        let inferencer = Inferencer::from_checkpoint(&ckpt_manager, index)?;

        Ok(Self {
            inferencer,
            refiner: AnswerRefiner::default(),
        })
    }

    /// Raw model prediction: the argmax vocabulary token and its
    /// softmax confidence in [0, 100].
    pub fn predict(&self, story: &str, question: &str) -> Result<(String, f32)> {
        self.inferencer.predict(story, question)
    }

    /// Turn a predicted token into a full answer sentence.
    pub fn refine(&self, question: &str, prediction: &str) -> String {
        self.refiner.refine(question, prediction)
    }
}

impl QuestionAnswerer for AskUseCase {
    fn answer(&self, story: &str, question: &str) -> Result<String> {
        let (token, confidence) = self.predict(story, question)?;
        tracing::debug!("Predicted '{}' at {:.1}% confidence", token, confidence);
        Ok(self.refine(question, &token))
    }
}
