// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load + parse the train and test corpora (Layer 4)
//   Step 2: Build the vocabulary over both splits    (Layer 3)
//   Step 3: Derive the word index                    (Layer 3)
//   Step 4: Persist the vocabulary                   (Layer 6)
//   Step 5: Vectorize both splits                    (Layer 4)
//   Step 6: Save the network config                  (Layer 6)
//   Step 7: Run the training loop                    (Layer 5)
//
// The test split doubles as the held-out set the trainer reports
// accuracy on — bAbI ships a dedicated test file per task, so no
// shuffled splitting happens here.
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{dataset::QaDataset, loader::BabiLoader, vectorizer::Vectorizer};
use crate::domain::traits::CorpusSource;
use crate::domain::vocabulary::{Vocabulary, WordIndex};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::vocab_store::VocabStore;
use crate::ml::model::MemoryNetworkConfig;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so the CLI
// layer can build it and tests can construct it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_file: String,
    pub test_file: String,
    pub checkpoint_dir: String,
    pub embedding_dim: usize,
    pub dropout: f64,
    pub cells_nb: usize,
    pub epochs: usize,
    pub batch_size: usize,
    pub lr: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_file: "data/qa1_single-supporting-fact_train.txt".to_string(),
            test_file: "data/qa1_single-supporting-fact_test.txt".to_string(),
            checkpoint_dir: "checkpoints".to_string(),
            embedding_dim: 64,
            dropout: 0.3,
            cells_nb: 32,
            epochs: 120,
            batch_size: 32,
            lr: 1e-3,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load and parse both corpus splits ─────────────────────────
        tracing::info!("Loading corpora: '{}', '{}'", cfg.train_file, cfg.test_file);
        let train_examples = BabiLoader::new(&cfg.train_file).load()?;
        let test_examples = BabiLoader::new(&cfg.test_file).load()?;
        ensure!(
            !train_examples.is_empty(),
            "training corpus '{}' contains no question lines",
            cfg.train_file
        );

        // ── Step 2: Build the shared vocabulary ───────────────────────────────
        // One vocabulary and one input geometry over the union of both
        // splits, so the model accepts inputs shaped for either.
        let vocab = Vocabulary::build(&train_examples, &test_examples);
        tracing::info!(
            "Vocabulary: {} tokens, story_max_len={}, query_max_len={}",
            vocab.len(),
            vocab.story_max_len,
            vocab.query_max_len
        );

        // ── Step 3: Derive the word index ─────────────────────────────────────
        let index = WordIndex::from_vocabulary(&vocab);

        // ── Step 4: Persist the vocabulary next to the weights ────────────────
        // The model artifact and its vocabulary are one unit.
        VocabStore::new(&cfg.checkpoint_dir).save(&vocab)?;

        // ── Step 5: Vectorize both splits ─────────────────────────────────────
        let vectorizer = Vectorizer::new(&index, vocab.story_max_len, vocab.query_max_len);
        let train_dataset = QaDataset::new(vectorizer.vectorize_examples(&train_examples)?);
        let val_dataset = QaDataset::new(vectorizer.vectorize_examples(&test_examples)?);
        tracing::info!(
            "Vectorized {} train / {} test samples",
            train_dataset.sample_count(),
            val_dataset.sample_count()
        );

        // ── Step 6: Save the network config for inference ─────────────────────
        let net_cfg = MemoryNetworkConfig::new(
            index.len() + 1,
            vocab.story_max_len,
            vocab.query_max_len,
        )
        .with_embedding_dim(cfg.embedding_dim)
        .with_cells_nb(cfg.cells_nb)
        .with_dropout(cfg.dropout);

        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_network_config(&net_cfg)?;

        // ── Step 7: Run the training loop (Layer 5) ───────────────────────────
        let outcome = run_training(cfg, &net_cfg, train_dataset, val_dataset, ckpt_manager)?;
        tracing::info!(
            "Final metrics: train_loss={:.4}, val_loss={:.4}, val_acc={:.1}%",
            outcome.final_train_loss,
            outcome.final_val_loss,
            outcome.final_val_accuracy * 100.0
        );

        Ok(())
    }
}
