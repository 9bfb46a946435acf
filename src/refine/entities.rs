// ============================================================
// Answer Refinement — Entity Heuristic
// ============================================================
// Finds the probable proper-noun entities (people, places) in a
// question, without any learned component:
//
//   Heuristic 1: title-cased words, excluding the first word of
//   the sentence (questions start capitalised regardless).
//
//   Fallback: tokens absent from a reference dictionary of
//   common words — names are exactly the words a dictionary
//   does not know.
//
// The dictionary is an injected read-only capability so tests
// can supply a tiny one and deployments can load a bigger one
// from disk. The embedded default covers the function words and
// everyday vocabulary of bAbI-style corpora.
//
// Reference: Rust Book §8 (Strings in Rust)

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Read-only set of common words used to tell names from vocabulary.
#[derive(Debug, Clone)]
pub struct KnownWords {
    words: HashSet<String>,
}

impl KnownWords {
    /// The embedded default word list.
    pub fn embedded() -> Self {
        Self::from_lines(include_str!("../../assets/known_words.txt"))
    }

    /// Load a word list from a file, one word per line.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read word list '{}'", path.display()))?;
        Ok(Self::from_lines(&content))
    }

    fn from_lines(content: &str) -> Self {
        let words = content
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for KnownWords {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().map(|w| w.to_lowercase()).collect(),
        }
    }
}

/// True for words shaped like "Mary": the first letter upper-case,
/// every following letter lower-case. Surrounding punctuation is
/// ignored ("Mary?" still counts).
fn is_title_case(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic());
    match letters.next() {
        Some(first) if first.is_uppercase() => letters.all(|c| c.is_lowercase()),
        _ => false,
    }
}

/// Strip non-alphanumeric characters from both ends of a word.
fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Extract candidate entity names from a sentence, in sentence order,
/// deduplicated. May be empty.
pub fn extract_entities(text: &str, known: &KnownWords) -> Vec<String> {
    // Heuristic 1: title-cased words, excluding the first word
    let mut entities: Vec<String> = Vec::new();
    for (i, word) in text.split_whitespace().enumerate() {
        if i == 0 || !is_title_case(word) {
            continue;
        }
        let clean = strip_punctuation(word);
        if !clean.is_empty() && !entities.iter().any(|e| e == clean) {
            entities.push(clean.to_string());
        }
    }

    // Fallback: difference with the reference dictionary
    if entities.is_empty() {
        for word in text.split_whitespace() {
            let clean = strip_punctuation(word).to_lowercase();
            if clean.is_empty() || known.contains(&clean) {
                continue;
            }
            if !entities.iter().any(|e| *e == clean) {
                entities.push(clean);
            }
        }
    }

    entities
}
