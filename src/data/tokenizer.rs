// ============================================================
// Layer 4 — Tokenizer
// ============================================================
// Splits a sentence into word and punctuation tokens.
//
// The rule: a run of word characters (alphanumeric or '_') is
// one token, and the separator run between two words is also a
// token once stripped of whitespace. That way punctuation such
// as '.' and '?' survives as its own token instead of being
// glued to the previous word, while plain spaces disappear.
//
//   "Mary moved to the bathroom."
//     → ["Mary", "moved", "to", "the", "bathroom", "."]
//
// No case folding happens here — callers lower-case where they
// need to (the entity heuristic does, the vocabulary does not).
//
// Reference: Rust Book §8 (Strings in Rust)

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize a sentence, keeping punctuation as standalone tokens.
///
/// Idempotent on its own output: re-joining the tokens with single
/// spaces and tokenizing again yields the same sequence.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    // None until the first character decides which kind of run we are in
    let mut in_word: Option<bool> = None;

    for c in sentence.chars() {
        let word = is_word_char(c);
        if in_word != Some(word) && !current.is_empty() {
            push_fragment(&mut tokens, &current);
            current.clear();
        }
        current.push(c);
        in_word = Some(word);
    }
    if !current.is_empty() {
        push_fragment(&mut tokens, &current);
    }

    tokens
}

/// Strip whitespace from a fragment and keep it if anything remains.
/// Separator runs like " . " become ".", runs of pure whitespace vanish.
fn push_fragment(tokens: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_string());
    }
}
