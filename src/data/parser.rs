// ============================================================
// Layer 4 — Corpus Parser
// ============================================================
// Parses bAbI-style annotated story files into Examples.
//
// File format, one line per fact or question:
//
//   1 Mary moved to the bathroom.
//   2 John went to the hallway.
//   3 Where is Mary?<TAB>bathroom<TAB>1
//
// Every line starts with a decimal fact id. An id of 1 marks
// the start of a new narrative and resets the running story.
// A question line carries a tab-separated three-field suffix:
// question text, answer token, supporting fact ids. The
// supporting ids are parsed (a malformed reference is still a
// corpus defect) but the core never uses them.
//
// The running story is a local accumulator threaded through the
// loop. Question lines are never appended to it, and nothing
// indexes the story by fact id, so no placeholder bookkeeping
// is needed to keep offsets aligned.
//
// Any malformed line aborts the whole load: vocabulary
// determinism depends on seeing the full corpus, so silently
// skipping lines is not an option.
//
// Reference: Weston et al. (2015) - bAbI tasks
//            Rust Book §9 (Error Handling)

use anyhow::Result;

use crate::data::tokenizer::tokenize;
use crate::domain::error::QaError;
use crate::domain::example::Example;

/// Parse corpus lines into Examples. Blank lines are skipped.
/// A corpus with no question lines yields an empty Vec, not an error.
pub fn parse_lines<'a, I>(lines: I) -> Result<Vec<Example>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut examples = Vec::new();
    // Tokenized fact sentences since the last narrative restart
    let mut story: Vec<Vec<String>> = Vec::new();

    for (number, raw) in lines.into_iter().enumerate() {
        let line_no = number + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let (id, rest) = split_fact_id(line, line_no)?;

        // Only the literal value 1 matters; ids are not required
        // to be contiguous.
        if id == 1 {
            story.clear();
        }

        if rest.contains('\t') {
            let (question, answer, support) = split_question_line(rest, line_no)?;

            // The sub-story for this example is everything accumulated
            // so far, flattened in order.
            let flat: Vec<String> = story.iter().flatten().cloned().collect();
            examples.push(Example::new(flat, question, answer, support));
        } else {
            story.push(tokenize(rest));
        }
    }

    Ok(examples)
}

/// Split the leading decimal fact id from the line text.
fn split_fact_id(line: &str, line_no: usize) -> Result<(usize, &str)> {
    let (id_str, rest) = line.split_once(' ').ok_or_else(|| QaError::Parse {
        line: line_no,
        reason: "missing space after the fact id".into(),
    })?;

    let id: usize = id_str.parse().map_err(|_| QaError::Parse {
        line: line_no,
        reason: format!("fact id '{id_str}' is not a decimal integer"),
    })?;

    Ok((id, rest))
}

/// Split a question line into (question tokens, answer, supporting ids).
/// Exactly three tab-separated fields are required.
fn split_question_line(
    rest: &str,
    line_no: usize,
) -> Result<(Vec<String>, String, Vec<usize>)> {
    let fields: Vec<&str> = rest.split('\t').collect();
    if fields.len() != 3 {
        return Err(QaError::Parse {
            line: line_no,
            reason: format!(
                "question line has {} tab-separated fields, expected 3",
                fields.len()
            ),
        }
        .into());
    }

    let question = tokenize(fields[0]);
    let answer = fields[1].trim().to_string();
    if answer.is_empty() {
        return Err(QaError::Parse {
            line: line_no,
            reason: "empty answer field".into(),
        }
        .into());
    }

    // Supporting ids are space-separated decimals, e.g. "1" or "2 6"
    let mut support = Vec::new();
    for part in fields[2].split_whitespace() {
        let id: usize = part.parse().map_err(|_| QaError::Parse {
            line: line_no,
            reason: format!("supporting fact id '{part}' is not a decimal integer"),
        })?;
        support.push(id);
    }

    Ok((question, answer, support))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_question_example() {
        let lines = [
            "1 Mary moved to the bathroom.",
            "2 John went to the hallway.",
            "3 Where is Mary?\tbathroom\t1",
        ];
        let examples = parse_lines(lines).unwrap();
        assert_eq!(examples.len(), 1);

        let e = &examples[0];
        assert_eq!(
            e.story,
            vec![
                "Mary", "moved", "to", "the", "bathroom", ".",
                "John", "went", "to", "the", "hallway", "."
            ]
        );
        assert_eq!(e.question, vec!["Where", "is", "Mary", "?"]);
        assert_eq!(e.answer, "bathroom");
        assert_eq!(e.support, vec![1]);
    }

    #[test]
    fn test_id_one_resets_the_story() {
        let lines = [
            "1 Mary moved to the bathroom.",
            "2 Where is Mary?\tbathroom\t1",
            "1 John went to the hallway.",
            "2 Where is John?\thallway\t1",
        ];
        let examples = parse_lines(lines).unwrap();
        assert_eq!(examples.len(), 2);
        // The second story must not contain Mary's facts
        assert!(!examples[1].story.contains(&"Mary".to_string()));
        assert!(examples[1].story.contains(&"John".to_string()));
    }

    #[test]
    fn test_later_questions_see_earlier_facts_only() {
        let lines = [
            "1 Mary moved to the bathroom.",
            "2 Where is Mary?\tbathroom\t1",
            "3 Mary went to the garden.",
            "4 Where is Mary?\tgarden\t3",
        ];
        let examples = parse_lines(lines).unwrap();
        assert_eq!(examples.len(), 2);
        // First question: only the first fact
        assert_eq!(examples[0].story.len(), 6);
        // Second question: both facts, question line itself excluded
        assert!(examples[1].story.contains(&"garden".to_string()));
        assert_eq!(examples[1].story.len(), 12);
    }

    #[test]
    fn test_non_contiguous_ids_do_not_reset() {
        let lines = [
            "1 Mary moved to the bathroom.",
            "7 John went to the hallway.",
            "9 Where is Mary?\tbathroom\t1",
        ];
        let examples = parse_lines(lines).unwrap();
        assert_eq!(examples.len(), 1);
        assert!(examples[0].story.contains(&"John".to_string()));
    }

    #[test]
    fn test_corpus_without_questions_yields_no_examples() {
        let lines = ["1 Mary moved to the bathroom.", "2 John went west."];
        assert!(parse_lines(lines).unwrap().is_empty());
    }

    #[test]
    fn test_missing_fact_id_is_a_parse_error() {
        let err = parse_lines(["no-id-here"]).unwrap_err();
        let qa = err.downcast_ref::<QaError>().unwrap();
        assert!(matches!(qa, QaError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_wrong_field_count_is_a_parse_error() {
        let lines = ["1 Where is Mary?\tbathroom"];
        let err = parse_lines(lines).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<QaError>().unwrap(),
            QaError::Parse { .. }
        ));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let lines = [
            "1 Mary moved to the bathroom.",
            "",
            "2 Where is Mary?\tbathroom\t1",
        ];
        assert_eq!(parse_lines(lines).unwrap().len(), 1);
    }
}
