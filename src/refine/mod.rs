// ============================================================
// Answer Refinement
// ============================================================
// Deterministic post-processing that turns the model's raw
// predicted token into a grammatically plausible sentence.
//
// This is a closed rule table, not a learned component: the
// question is classified by its leading word into a QuestionKind
// and each (kind, entity-found?) pair maps to one template.
// Adding a question type means adding an enum variant and a
// match arm — every branch stays independently testable.
//
//   (Where, entity)  → "<entity> is in the <prediction>"
//   (Why,   _)       → "Because he/she is <prediction>"
//   (What,  _)       → "The <prediction><rest of the question>"
//   anything else    → the raw prediction token
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

/// Entity extraction heuristics and the known-words capability
pub mod entities;

use entities::{extract_entities, KnownWords};

/// The question types the rule table knows, keyed on the leading word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Where,
    Why,
    What,
    Other,
}

impl QuestionKind {
    /// Classify by the first word, case-insensitively.
    pub fn classify(question: &str) -> Self {
        let first = question
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        match first.as_str() {
            "where" => Self::Where,
            "why" => Self::Why,
            "what" => Self::What,
            _ => Self::Other,
        }
    }
}

/// Turns raw predicted tokens into sentences. Owns the injected
/// known-words set used by the entity heuristic.
pub struct AnswerRefiner {
    known_words: KnownWords,
}

impl AnswerRefiner {
    pub fn new(known_words: KnownWords) -> Self {
        Self { known_words }
    }

    /// Pure function of (question, prediction): deterministic, no model.
    pub fn refine(&self, question: &str, prediction: &str) -> String {
        let entities = extract_entities(question, &self.known_words);
        let kind = QuestionKind::classify(question);
        let pred = prediction.to_lowercase();

        match (kind, entities.first()) {
            (QuestionKind::Where, Some(entity)) => {
                format!("{entity} is in the {pred}")
            }
            (QuestionKind::Why, _) => format!("Because he/she is {pred}"),
            (QuestionKind::What, _) => {
                // "What is on the table?" → "The <pred> is on the table"
                let remainder = question.to_lowercase().replace("what", "").replace('?', "");
                format!("The {pred}{remainder}")
            }
            // No template applies: hand back the raw token
            _ => prediction.to_string(),
        }
    }
}

impl Default for AnswerRefiner {
    fn default() -> Self {
        Self::new(KnownWords::embedded())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_leading_word() {
        assert_eq!(QuestionKind::classify("Where is Mary?"), QuestionKind::Where);
        assert_eq!(QuestionKind::classify("WHY did he leave?"), QuestionKind::Why);
        assert_eq!(QuestionKind::classify("what is on the table?"), QuestionKind::What);
        assert_eq!(QuestionKind::classify("Is Mary home?"), QuestionKind::Other);
        assert_eq!(QuestionKind::classify(""), QuestionKind::Other);
    }

    #[test]
    fn test_where_with_entity() {
        let refiner = AnswerRefiner::default();
        assert_eq!(
            refiner.refine("Where is Mary?", "bathroom"),
            "Mary is in the bathroom"
        );
    }

    #[test]
    fn test_where_without_entity_returns_raw_prediction() {
        let refiner = AnswerRefiner::default();
        // No title-cased word and everything is in the dictionary
        assert_eq!(refiner.refine("Where is the ball?", "garden"), "garden");
    }

    #[test]
    fn test_why_template() {
        let refiner = AnswerRefiner::default();
        assert_eq!(
            refiner.refine("Why did he leave?", "angry"),
            "Because he/she is angry"
        );
    }

    #[test]
    fn test_what_template_reuses_the_question_remainder() {
        let refiner = AnswerRefiner::default();
        assert_eq!(
            refiner.refine("What is on the table?", "apple"),
            "The apple is on the table"
        );
    }

    #[test]
    fn test_other_question_returns_raw_prediction() {
        let refiner = AnswerRefiner::default();
        assert_eq!(refiner.refine("Is Sandra tired?", "yes"), "yes");
    }

    #[test]
    fn test_prediction_is_lowercased_inside_templates() {
        let refiner = AnswerRefiner::default();
        assert_eq!(
            refiner.refine("Where is John?", "Kitchen"),
            "John is in the kitchen"
        );
    }
}
