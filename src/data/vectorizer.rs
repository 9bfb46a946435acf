// ============================================================
// Layer 4 — Vectorizer
// ============================================================
// Turns token sequences into the fixed-width numeric form the
// model consumes:
//
//   - every token is mapped through the WordIndex to its id
//   - story vectors are left-padded with zeros to story_max_len,
//     query vectors to query_max_len (0 is the padding sentinel,
//     never a real token)
//   - in training mode the answer is one-hot encoded into a
//     vector of width |WordIndex| + 1 (slot 0 is the reserved
//     padding slot and is never set)
//
// Row alignment invariant: sample i's story, query and target
// all describe the same Example.
//
// A token missing from the index is an UnknownToken error, never
// a silent zero-fill — it means the examples were drawn from a
// different vocabulary than the index, and zero-filling would
// corrupt the training signal.
//
// Over-length sequences cannot occur when vectorizing the same
// corpus the lengths were computed from, but live inputs at
// prediction time can exceed them. That case is governed by an
// explicit OverflowPolicy instead of a silent reshape.
//
// Reference: Rust Book §8 (Collections)

use anyhow::Result;

use crate::domain::error::QaError;
use crate::domain::example::Example;
use crate::domain::vocabulary::WordIndex;

/// What to do with a sequence longer than the fixed input width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Keep the newest tokens, dropping from the left. Matches the
    /// left-padding convention: the discarded tokens are the oldest
    /// facts, which are the least likely to be referenced.
    TruncateOldest,

    /// Refuse the input with a TooLong error.
    Reject,
}

/// One vectorized training sample.
#[derive(Debug, Clone)]
pub struct StorySample {
    /// Story token ids, left-padded with zeros to story_max_len
    pub story: Vec<i32>,

    /// Question token ids, left-padded with zeros to query_max_len
    pub query: Vec<i32>,

    /// One-hot answer vector of width |WordIndex| + 1
    pub target: Vec<f32>,
}

/// Maps token sequences to padded id vectors against one fixed
/// WordIndex and input geometry.
pub struct Vectorizer<'a> {
    index: &'a WordIndex,
    story_max_len: usize,
    query_max_len: usize,
    policy: OverflowPolicy,
}

impl<'a> Vectorizer<'a> {
    pub fn new(index: &'a WordIndex, story_max_len: usize, query_max_len: usize) -> Self {
        Self {
            index,
            story_max_len,
            query_max_len,
            policy: OverflowPolicy::TruncateOldest,
        }
    }

    pub fn with_policy(mut self, policy: OverflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Width of the one-hot target vectors and of the model's output
    /// layer: every real token plus the reserved padding slot.
    pub fn one_hot_width(&self) -> usize {
        self.index.len() + 1
    }

    /// Training/evaluation mode: vectorize a full list of Examples,
    /// answers included.
    pub fn vectorize_examples(&self, examples: &[Example]) -> Result<Vec<StorySample>> {
        examples
            .iter()
            .map(|e| {
                Ok(StorySample {
                    story: self.encode_padded(&e.story, self.story_max_len)?,
                    query: self.encode_padded(&e.question, self.query_max_len)?,
                    target: self.one_hot(&e.answer)?,
                })
            })
            .collect()
    }

    /// Entry mode: a single live (story, question) pair with no answer.
    pub fn vectorize_entry(
        &self,
        story: &[String],
        question: &[String],
    ) -> Result<(Vec<i32>, Vec<i32>)> {
        Ok((
            self.encode_padded(story, self.story_max_len)?,
            self.encode_padded(question, self.query_max_len)?,
        ))
    }

    /// Map tokens to ids and left-pad with zeros to `max_len`.
    fn encode_padded(&self, tokens: &[String], max_len: usize) -> Result<Vec<i32>> {
        let mut ids = Vec::with_capacity(tokens.len());
        for token in tokens {
            let id = self.index.index(token).ok_or_else(|| QaError::UnknownToken {
                token: token.clone(),
            })?;
            ids.push(id as i32);
        }

        if ids.len() > max_len {
            match self.policy {
                OverflowPolicy::TruncateOldest => {
                    tracing::warn!(
                        "truncating {} tokens to the newest {}",
                        ids.len(),
                        max_len
                    );
                    ids.drain(..ids.len() - max_len);
                }
                OverflowPolicy::Reject => {
                    return Err(QaError::TooLong {
                        len: ids.len(),
                        max: max_len,
                    }
                    .into());
                }
            }
        }

        let mut padded = vec![0; max_len - ids.len()];
        padded.extend(ids);
        Ok(padded)
    }

    /// One-hot encode the answer token over the vocabulary.
    fn one_hot(&self, answer: &str) -> Result<Vec<f32>> {
        let id = self.index.index(answer).ok_or_else(|| QaError::UnknownToken {
            token: answer.to_string(),
        })?;
        let mut target = vec![0.0; self.one_hot_width()];
        target[id] = 1.0;
        Ok(target)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vocabulary::Vocabulary;

    fn fixtures() -> (Vocabulary, Vec<Example>) {
        let examples = vec![Example::new(
            ["Mary", "moved", "to", "the", "bathroom", "."]
                .map(String::from)
                .to_vec(),
            ["Where", "is", "Mary", "?"].map(String::from).to_vec(),
            "bathroom",
            vec![1],
        )];
        (Vocabulary::build(&examples, &[]), examples)
    }

    #[test]
    fn test_left_padding_and_round_trip() {
        let (vocab, examples) = fixtures();
        let index = WordIndex::from_vocabulary(&vocab);
        // Pad beyond the natural lengths to make the padding visible
        let vectorizer = Vectorizer::new(&index, 10, 6);

        let samples = vectorizer.vectorize_examples(&examples).unwrap();
        let story = &samples[0].story;
        assert_eq!(story.len(), 10);
        // Zeros on the left, ids on the right
        assert_eq!(&story[..4], &[0, 0, 0, 0]);
        assert!(story[4..].iter().all(|&id| id > 0));

        // Decoding the non-zero suffix reconstructs the original tokens
        let decoded: Vec<&str> = story
            .iter()
            .filter(|&&id| id != 0)
            .map(|&id| index.token(id as usize).unwrap())
            .collect();
        assert_eq!(decoded, examples[0].story);
    }

    #[test]
    fn test_one_hot_invariant() {
        let (vocab, examples) = fixtures();
        let index = WordIndex::from_vocabulary(&vocab);
        let vectorizer = Vectorizer::new(&index, vocab.story_max_len, vocab.query_max_len);

        let samples = vectorizer.vectorize_examples(&examples).unwrap();
        let target = &samples[0].target;

        assert_eq!(target.len(), index.len() + 1);
        let ones = target.iter().filter(|&&v| v == 1.0).count();
        let zeros = target.iter().filter(|&&v| v == 0.0).count();
        assert_eq!(ones, 1);
        assert_eq!(zeros, target.len() - 1);
        // The hot slot is the answer's index, never the padding slot
        assert_eq!(target[index.index("bathroom").unwrap()], 1.0);
        assert_eq!(target[0], 0.0);
    }

    #[test]
    fn test_unknown_token_is_an_error() {
        let (vocab, _) = fixtures();
        let index = WordIndex::from_vocabulary(&vocab);
        let vectorizer = Vectorizer::new(&index, 10, 6);

        let stranger = Example::new(
            vec!["Quetzalcoatl".to_string()],
            vec!["Where".to_string()],
            "bathroom",
            vec![],
        );
        let err = vectorizer.vectorize_examples(&[stranger]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QaError>().unwrap(),
            QaError::UnknownToken { .. }
        ));
    }

    #[test]
    fn test_entry_mode_has_no_target() {
        let (vocab, examples) = fixtures();
        let index = WordIndex::from_vocabulary(&vocab);
        let vectorizer = Vectorizer::new(&index, vocab.story_max_len, vocab.query_max_len);

        let (story, query) = vectorizer
            .vectorize_entry(&examples[0].story, &examples[0].question)
            .unwrap();
        assert_eq!(story.len(), vocab.story_max_len);
        assert_eq!(query.len(), vocab.query_max_len);
    }

    #[test]
    fn test_overflow_truncates_oldest_by_default() {
        let (vocab, examples) = fixtures();
        let index = WordIndex::from_vocabulary(&vocab);
        // Story is 6 tokens, width only 3
        let vectorizer = Vectorizer::new(&index, 3, 6);

        let (story, _) = vectorizer
            .vectorize_entry(&examples[0].story, &examples[0].question)
            .unwrap();
        let decoded: Vec<&str> = story
            .iter()
            .map(|&id| index.token(id as usize).unwrap())
            .collect();
        // The newest three tokens survive
        assert_eq!(decoded, vec!["the", "bathroom", "."]);
    }

    #[test]
    fn test_overflow_reject_policy() {
        let (vocab, examples) = fixtures();
        let index = WordIndex::from_vocabulary(&vocab);
        let vectorizer = Vectorizer::new(&index, 3, 6).with_policy(OverflowPolicy::Reject);

        let err = vectorizer
            .vectorize_entry(&examples[0].story, &examples[0].question)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QaError>().unwrap(),
            QaError::TooLong { len: 6, max: 3 }
        ));
    }
}
