// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Reads a bAbI task file from disk and hands its lines to the
// parser. Implements the CorpusSource trait from Layer 3 so the
// application layer can load examples without knowing about
// files at all.
//
// bAbI ships each task as a train/test pair, e.g.
//   qa1_single-supporting-fact_train.txt
//   qa1_single-supporting-fact_test.txt
// Each file is loaded through its own BabiLoader.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::data::parser::parse_lines;
use crate::domain::example::Example;
use crate::domain::traits::CorpusSource;

/// Loads one bAbI task file.
pub struct BabiLoader {
    path: PathBuf,
}

impl BabiLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for BabiLoader {
    fn load(&self) -> Result<Vec<Example>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("cannot read corpus file '{}'", self.path.display()))?;

        let examples = parse_lines(content.lines())
            .with_context(|| format!("cannot parse corpus file '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} examples from '{}'",
            examples.len(),
            self.path.display()
        );
        Ok(examples)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_examples_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa_train.txt");
        let mut f = fs::File::create(&path).unwrap();
        writeln!(f, "1 Mary moved to the bathroom.").unwrap();
        writeln!(f, "2 Where is Mary?\tbathroom\t1").unwrap();

        let examples = BabiLoader::new(&path).load().unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].answer, "bathroom");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = BabiLoader::new("/nonexistent/corpus.txt");
        assert!(loader.load().is_err());
    }
}
