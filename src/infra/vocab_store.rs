// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Persists the vocabulary next to the model weights.
//
// The word index is rebuilt from the vocabulary on load, and
// index assignment is deterministic (sorted vocabulary, ids are
// position + 1), so saving the word list and the two length
// statistics is enough to reconstruct the exact mapping the
// model was trained with.
//
// A model artifact loaded against any other vocabulary is
// garbage; the Inferencer cross-checks the vocabulary size
// against the saved network config at load time.
//
// Reference: Rust Book §9 (Error Handling)

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::domain::vocabulary::Vocabulary;

pub struct VocabStore {
    dir: PathBuf,
}

impl VocabStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("vocabulary.json")
    }

    /// Save the vocabulary as pretty JSON.
    pub fn save(&self, vocab: &Vocabulary) -> Result<()> {
        fs::create_dir_all(&self.dir).ok();
        let path = self.path();
        let json = serde_json::to_string_pretty(vocab)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write vocabulary to '{}'", path.display()))?;
        tracing::info!(
            "Saved vocabulary ({} tokens) to '{}'",
            vocab.len(),
            path.display()
        );
        Ok(())
    }

    /// Load the vocabulary saved by a training run.
    pub fn load(&self) -> Result<Vocabulary> {
        let path = self.path();
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "cannot read vocabulary from '{}'. Run 'train' before 'ask'.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::example::Example;

    #[test]
    fn test_vocabulary_round_trip() {
        let examples = vec![Example::new(
            ["Mary", "moved", "."].map(String::from).to_vec(),
            ["Where", "?"].map(String::from).to_vec(),
            "bathroom",
            vec![1],
        )];
        let vocab = Vocabulary::build(&examples, &[]);

        let dir = tempfile::tempdir().unwrap();
        let store = VocabStore::new(dir.path());
        store.save(&vocab).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.words, vocab.words);
        assert_eq!(loaded.story_max_len, vocab.story_max_len);
        assert_eq!(loaded.query_max_len, vocab.query_max_len);
    }

    #[test]
    fn test_missing_vocabulary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(VocabStore::new(dir.path()).load().is_err());
    }
}
