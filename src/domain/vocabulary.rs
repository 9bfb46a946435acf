// ============================================================
// Layer 3 — Vocabulary and Word Index
// ============================================================
// The vocabulary is the sorted set of every distinct token in
// the corpus (stories, questions AND answers, across both the
// train and test splits). Sorting makes index assignment
// deterministic: identical corpora always produce byte-identical
// vocabularies, which is what lets a saved model be reloaded
// against a rebuilt index.
//
// Train and test share one vocabulary and one input geometry
// (story_max_len / query_max_len over the union of both splits)
// so a model trained on one split accepts inputs shaped for
// the other.
//
// The WordIndex maps each token to position + 1. Index 0 is
// reserved as the padding sentinel and is never assigned to a
// real token.
//
// Reference: Rust Book §8 (Collections)

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::example::Example;

/// Sorted, deduplicated token set plus the corpus length statistics
/// that fix the model's input tensor widths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Every distinct token, in sorted order
    pub words: Vec<String>,

    /// Maximum story length (in tokens) over train + test
    pub story_max_len: usize,

    /// Maximum question length (in tokens) over train + test
    pub query_max_len: usize,
}

impl Vocabulary {
    /// Build the vocabulary and length statistics from both corpus splits.
    ///
    /// A BTreeSet keeps the tokens deduplicated and sorted as they are
    /// inserted, so the resulting ordering is the total order over
    /// tokens regardless of corpus ordering.
    pub fn build(train: &[Example], test: &[Example]) -> Self {
        let mut words = BTreeSet::new();
        let mut story_max_len = 0;
        let mut query_max_len = 0;

        for example in train.iter().chain(test.iter()) {
            for token in example.story.iter().chain(example.question.iter()) {
                words.insert(token.clone());
            }
            words.insert(example.answer.clone());

            story_max_len = story_max_len.max(example.story_len());
            query_max_len = query_max_len.max(example.question_len());
        }

        Self {
            words: words.into_iter().collect(),
            story_max_len,
            query_max_len,
        }
    }

    /// Number of distinct tokens (excluding the reserved padding slot)
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Bijective token <-> id mapping derived from a Vocabulary snapshot.
///
/// Ids are 1-based; 0 is the padding sentinel. A WordIndex is immutable
/// for the lifetime of a trained model — the model and its index must
/// always be persisted and loaded together, since mismatched indices
/// silently corrupt predictions.
#[derive(Debug, Clone)]
pub struct WordIndex {
    forward: HashMap<String, usize>,
    reverse: Vec<String>,
}

impl WordIndex {
    /// Assign index `position + 1` to each token of the sorted vocabulary.
    pub fn from_vocabulary(vocab: &Vocabulary) -> Self {
        let mut forward = HashMap::with_capacity(vocab.words.len());
        for (position, word) in vocab.words.iter().enumerate() {
            forward.insert(word.clone(), position + 1);
        }
        Self {
            forward,
            reverse: vocab.words.clone(),
        }
    }

    /// Look up the id of a token. Never returns 0.
    pub fn index(&self, token: &str) -> Option<usize> {
        self.forward.get(token).copied()
    }

    /// Reverse lookup: id -> token. Id 0 (padding) has no token.
    pub fn token(&self, index: usize) -> Option<&str> {
        if index == 0 {
            return None;
        }
        self.reverse.get(index - 1).map(String::as_str)
    }

    /// Number of real tokens in the index (the padding slot is not counted,
    /// so one-hot vectors and the model's output layer have width len() + 1).
    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}
