// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{anyhow, Result};
use burn::prelude::*;

use crate::data::tokenizer::tokenize;
use crate::data::vectorizer::Vectorizer;
use crate::domain::error::QaError;
use crate::domain::vocabulary::WordIndex;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::MemoryNetwork;

type InferBackend = burn::backend::NdArray;

/// Runs single-example predictions against a trained memory network.
///
/// Owns the model together with the WordIndex it was trained with —
/// the two are one unit, and `from_checkpoint` refuses to pair a
/// checkpoint with an index of the wrong size.
#[derive(Debug)]
pub struct Inferencer {
    model: MemoryNetwork<InferBackend>,
    word_index: WordIndex,
    story_max_len: usize,
    query_max_len: usize,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Inferencer {
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        word_index: WordIndex,
    ) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let net_cfg = ckpt_manager.load_network_config()?;

        // ArtifactMismatch guard: a checkpoint loaded against any other
        // vocabulary would predict garbage without failing.
        net_cfg.validate_word_index(&word_index)?;

        let model: MemoryNetwork<InferBackend> = net_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        Ok(Self {
            model,
            word_index,
            story_max_len: net_cfg.story_max_len,
            query_max_len: net_cfg.query_max_len,
            device,
        })
    }

    /// Predict the answer token for one live (story, question) pair.
    ///
    /// The story may span several lines; each line is tokenized and the
    /// results are flattened in order, matching how the corpus parser
    /// flattens fact lines. Returns the argmax vocabulary token and the
    /// softmax probability mass at that token scaled to [0, 100].
    pub fn predict(&self, story_text: &str, question_text: &str) -> Result<(String, f32)> {
        let story: Vec<String> = story_text.lines().flat_map(tokenize).collect();
        let question = tokenize(question_text);

        if story.is_empty() {
            return Err(QaError::EmptyInput { side: "story" }.into());
        }
        if question.is_empty() {
            return Err(QaError::EmptyInput { side: "question" }.into());
        }

        let vectorizer = Vectorizer::new(&self.word_index, self.story_max_len, self.query_max_len);
        let (story_ids, query_ids) = vectorizer.vectorize_entry(&story, &question)?;

        let stories = Tensor::<InferBackend, 1, Int>::from_ints(story_ids.as_slice(), &self.device)
            .reshape([1, self.story_max_len]);
        let queries = Tensor::<InferBackend, 1, Int>::from_ints(query_ids.as_slice(), &self.device)
            .reshape([1, self.query_max_len]);

        // Forward pass → probability distribution over the vocabulary
        let logits = self.model.forward(stories, queries);
        let probs: Vec<f32> = burn::tensor::activation::softmax(logits, 1)
            .into_data()
            .to_vec::<f32>()
            .unwrap_or_default();

        // Slot 0 is the reserved padding sentinel and never a valid
        // answer, so the argmax runs over real tokens only.
        let (best_index, best_prob) = probs
            .iter()
            .copied()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| anyhow!("model produced an empty distribution"))?;

        let token = self
            .word_index
            .token(best_index)
            .ok_or_else(|| anyhow!("prediction index {best_index} has no token"))?;

        let confidence = best_prob * 100.0;
        tracing::debug!("Predicted '{}' at {:.2}%", token, confidence);

        Ok((token.to_string(), confidence))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Example;
    use crate::domain::vocabulary::Vocabulary;
    use crate::ml::model::MemoryNetworkConfig;

    fn fixture() -> (CheckpointManager, WordIndex, tempfile::TempDir) {
        type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;

        let examples = vec![Example::new(
            ["Mary", "moved", "to", "the", "bathroom", "."]
                .map(String::from)
                .to_vec(),
            ["Where", "is", "Mary", "?"].map(String::from).to_vec(),
            "bathroom",
            vec![1],
        )];
        let vocab = Vocabulary::build(&examples, &[]);
        let index = WordIndex::from_vocabulary(&vocab);

        let dir = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path());
        let net_cfg = MemoryNetworkConfig::new(
            index.len() + 1,
            vocab.story_max_len,
            vocab.query_max_len,
        )
        .with_embedding_dim(8)
        .with_cells_nb(4);
        ckpt.save_network_config(&net_cfg).unwrap();

        let device = Default::default();
        let model: MemoryNetwork<TrainBackend> = net_cfg.init(&device);
        ckpt.save_model(&model, 1).unwrap();

        (ckpt, index, dir)
    }

    #[test]
    fn test_predict_returns_vocabulary_token() {
        let (ckpt, index, _dir) = fixture();
        let inferencer = Inferencer::from_checkpoint(&ckpt, index.clone()).unwrap();

        let (token, confidence) = inferencer
            .predict("Mary moved to the bathroom.", "Where is Mary?")
            .unwrap();
        assert!(index.index(&token).is_some());
        assert!((0.0..=100.0).contains(&confidence));
    }

    #[test]
    fn test_empty_story_is_rejected() {
        let (ckpt, index, _dir) = fixture();
        let inferencer = Inferencer::from_checkpoint(&ckpt, index).unwrap();

        let err = inferencer.predict("   ", "Where is Mary?").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QaError>().unwrap(),
            QaError::EmptyInput { side: "story" }
        ));
    }

    #[test]
    fn test_empty_question_is_rejected() {
        let (ckpt, index, _dir) = fixture();
        let inferencer = Inferencer::from_checkpoint(&ckpt, index).unwrap();

        let err = inferencer
            .predict("Mary moved to the bathroom.", " ")
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QaError>().unwrap(),
            QaError::EmptyInput { side: "question" }
        ));
    }

    #[test]
    fn test_mismatched_vocabulary_is_rejected() {
        let (ckpt, _index, _dir) = fixture();

        // An index built from a different, larger corpus
        let other = vec![Example::new(
            ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"]
                .map(String::from)
                .to_vec(),
            ["m"].map(String::from).to_vec(),
            "n",
            vec![],
        )];
        let other_vocab = Vocabulary::build(&other, &[]);
        let other_index = WordIndex::from_vocabulary(&other_vocab);

        let err = Inferencer::from_checkpoint(&ckpt, other_index).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QaError>().unwrap(),
            QaError::ArtifactMismatch { .. }
        ));
    }
}
