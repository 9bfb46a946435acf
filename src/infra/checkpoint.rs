// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets saved per training run:
//   1. Model weights (.mpk.gz file)  — all learned parameters
//   2. latest_epoch.json             — which epoch was last saved
//   3. network_config.json           — model architecture config
//   4. vocabulary.json               — via VocabStore; the weights
//                                      and the vocabulary are one
//                                      unit and are loaded together
//
// Why save the config separately?
//   When loading for inference, we need the exact architecture
//   (vocab_size, input widths, embedding_dim, cells_nb) to
//   rebuild the model before loading the weights into it.
//
// File naming convention:
//   checkpoints/
//     model_epoch_1.mpk.gz   ← weights after epoch 1
//     ...
//     latest_epoch.json
//     network_config.json
//     vocabulary.json
//     metrics.csv
//
// Reference: Burn Book §5 (Records and Checkpointing)

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::ml::model::{MemoryNetwork, MemoryNetworkConfig};

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Save model weights for a given epoch and update the latest-epoch
    /// pointer the inferencer reads.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &MemoryNetwork<B>,
        epoch: usize,
    ) -> Result<()> {
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("failed to save checkpoint to '{}'", path.display()))?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "failed to write latest_epoch.json")?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load model weights from the latest saved checkpoint into a model
    /// with the matching architecture.
    pub fn load_model<B: Backend>(
        &self,
        model: MemoryNetwork<B>,
        device: &B::Device,
    ) -> Result<MemoryNetwork<B>> {
        let epoch = self.latest_epoch()?;
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Save the network architecture config. Must happen before training
    /// so `ask` can rebuild the model even if a run is interrupted.
    pub fn save_network_config(&self, cfg: &MemoryNetworkConfig) -> Result<()> {
        let path = self.dir.join("network_config.json");
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("cannot write network config to '{}'", path.display()))?;
        tracing::debug!("Saved network config to '{}'", path.display());
        Ok(())
    }

    /// Load the network architecture config saved by a training run.
    pub fn load_network_config(&self) -> Result<MemoryNetworkConfig> {
        let path = self.dir.join("network_config.json");
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "cannot read network config from '{}'. Run 'train' before 'ask'.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Read latest_epoch.json and return the epoch number.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");
        let s = fs::read_to_string(&path)
            .with_context(|| "cannot find 'latest_epoch.json'. Have you run 'train' first?")?;
        Ok(serde_json::from_str::<usize>(&s)?)
    }
}
